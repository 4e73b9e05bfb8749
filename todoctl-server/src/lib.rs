//! todoctl-server: todo store and JSON API
//!
//! - `models`: the canonical `Todo` schema and validated input types
//! - `db`: SQLite pool, schema bootstrap and the todo repository
//! - `http`: axum router, handlers and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError, TodoRepo};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use models::Todo;
