//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod todo;
pub mod validation;

pub use todo::{NewTodo, Todo, TodoDescription, TodoId, TodoPatch, TodoTitle};
pub use validation::ValidationError;
