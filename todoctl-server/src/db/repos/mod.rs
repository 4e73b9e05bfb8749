//! Repository implementations for database access
//!
//! Repositories borrow the pool and are cheap to build per request.

pub mod todos;

pub use todos::{DbError, TodoRepo};
