//! Schema bootstrap for the todo table
//!
//! Idempotent: safe to run on every start. Column names must match the
//! fields of [`crate::models::Todo`].

use sqlx::SqlitePool;

/// Create the `todo` table if it doesn't exist.
///
/// AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::debug!("Ensuring todo schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todo (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            completed BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;

    #[tokio::test]
    async fn run_is_idempotent() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run(&pool).await.unwrap();
        run(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn columns_match_todo_fields() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run(&pool).await.unwrap();

        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('todo') ORDER BY cid")
                .fetch_all(&pool)
                .await
                .unwrap();
        let columns: Vec<String> = columns.into_iter().map(|(name,)| name).collect();

        assert_eq!(columns, ["id", "title", "description", "completed"]);
    }

    #[tokio::test]
    async fn completed_defaults_to_false() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run(&pool).await.unwrap();

        sqlx::query("INSERT INTO todo (title) VALUES ('raw insert')")
            .execute(&pool)
            .await
            .unwrap();
        let (completed,): (bool,) = sqlx::query_as("SELECT completed FROM todo")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(!completed);
    }
}
