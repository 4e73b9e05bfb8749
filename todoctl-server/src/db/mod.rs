//! Database layer - connection pool, schema and repositories
//!
//! - Connection pool shared through application state, never a global
//! - One transaction per write operation
//! - Rely on statement results for existence checks, no check-then-act

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use sqlx::SqlitePool;

/// Open a pool and make sure the schema exists.
pub async fn open(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = create_pool(database_url).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}
