//! Todo repository
//!
//! Every write runs in its own transaction and is committed before the
//! method returns. Existence is decided by the statement itself
//! (`RETURNING` / `rows_affected`), never by a separate lookup.

use sqlx::SqlitePool;

use crate::models::{NewTodo, Todo, TodoDescription, TodoId, TodoPatch, TodoTitle};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn todo_not_found(id: TodoId) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }
}

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every todo, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed
            FROM todo
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(todos)
    }

    /// Get a single todo by id.
    pub async fn get(&self, id: TodoId) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, completed
            FROM todo
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    /// Insert a todo and return it with its assigned id.
    pub async fn create(&self, new: NewTodo) -> Result<Todo, DbError> {
        let mut tx = self.pool.begin().await?;

        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todo (title, description, completed)
            VALUES (?, ?, ?)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(new.title.as_str())
        .bind(new.description.as_ref().map(TodoDescription::as_str))
        .bind(new.completed)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// Apply a partial update in a single statement.
    ///
    /// An empty patch still resolves the row, so a missing id is NotFound.
    pub async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, DbError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut tx = self.pool.begin().await?;

        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todo
            SET title = COALESCE(?1, title),
                description = CASE WHEN ?2 THEN ?3 ELSE description END,
                completed = COALESCE(?4, completed)
            WHERE id = ?5
            RETURNING id, title, description, completed
            "#,
        )
        .bind(patch.title.as_ref().map(TodoTitle::as_str))
        .bind(patch.description.is_some())
        .bind(
            patch
                .description
                .as_ref()
                .and_then(Option::as_ref)
                .map(TodoDescription::as_str),
        )
        .bind(patch.completed)
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))?;

        tx.commit().await?;
        tracing::debug!(id = todo.id, "todo updated");
        Ok(todo)
    }

    /// Delete a todo.
    ///
    /// Not idempotent: deleting an absent id is NotFound. When two callers
    /// race on the same id, SQLite serialises the writes and only one of
    /// them sees an affected row.
    pub async fn delete(&self, id: TodoId) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::todo_not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(%id, "todo deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    async fn test_pool() -> SqlitePool {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        migrations::run(&pool).await.unwrap();
        pool
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo::new(TodoTitle::new(title).unwrap())
    }

    fn id(raw: i64) -> TodoId {
        TodoId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn list_empty_store() {
        let pool = test_pool().await;
        let todos = TodoRepo::new(&pool).list_all().await.unwrap();
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn create_then_list_returns_created_items() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let first = repo.create(new_todo("Buy milk")).await.unwrap();
        let second = repo
            .create(
                new_todo("Call mum")
                    .with_description(TodoDescription::parse("Sunday afternoon").unwrap())
                    .completed(true),
            )
            .await
            .unwrap();

        assert_eq!(first.title, "Buy milk");
        assert_eq!(first.description, None);
        assert!(!first.completed);
        assert_eq!(second.description.as_deref(), Some("Sunday afternoon"));
        assert!(second.completed);
        assert!(second.id > first.id);

        let todos = repo.list_all().await.unwrap();
        assert_eq!(todos, vec![first, second]);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = test_pool().await;
        let err = TodoRepo::new(&pool).get(id(1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "todo", .. }));
    }

    #[tokio::test]
    async fn delete_removes_permanently() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let todo = repo.create(new_todo("Walk dog")).await.unwrap();
        repo.delete(id(todo.id)).await.unwrap();

        assert!(repo.list_all().await.unwrap().is_empty());
        let err = repo.delete(id(todo.id)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_missing_leaves_store_unchanged() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let kept = repo.create(new_todo("Keep me")).await.unwrap();

        let err = repo.delete(id(999_999)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref id, .. } if id == "999999"));

        assert_eq!(repo.list_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let first = repo.create(new_todo("one")).await.unwrap();
        repo.delete(id(first.id)).await.unwrap();
        let second = repo.create(new_todo("two")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);
        let todo = repo
            .create(new_todo("Walk dog").with_description(TodoDescription::parse("park").unwrap()))
            .await
            .unwrap();

        let updated = repo
            .update(
                id(todo.id),
                TodoPatch {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Walk dog");
        assert_eq!(updated.description.as_deref(), Some("park"));
        assert!(updated.completed);

        let updated = repo
            .update(
                id(todo.id),
                TodoPatch {
                    title: Some(TodoTitle::new("Walk cat").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Walk cat");
        assert_eq!(updated.description.as_deref(), Some("park"));
        assert!(updated.completed);

        let updated = repo
            .update(
                id(todo.id),
                TodoPatch {
                    description: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.title, "Walk cat");

        assert_eq!(repo.get(id(todo.id)).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = TodoRepo::new(&pool);

        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };
        assert!(matches!(
            repo.update(id(5), patch).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update(id(5), TodoPatch::default()).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
