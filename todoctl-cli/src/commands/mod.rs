pub mod serve;
pub mod todos;
