//! Todo endpoints, mounted under `/api`

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::db::repos::TodoRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidTodoId};
use crate::http::server::AppState;
use crate::models::{NewTodo, Todo, TodoDescription, TodoPatch, TodoTitle, ValidationError};

/// Create todo request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodoRequest {
    fn validate(self) -> Result<NewTodo, ValidationError> {
        let title = TodoTitle::new(&self.title)?;
        let description = match self.description {
            Some(text) => TodoDescription::parse(&text)?,
            None => None,
        };

        Ok(NewTodo::new(title)
            .with_description(description)
            .completed(self.completed))
    }
}

/// Update todo request
///
/// Absent fields are left alone. `"description": null` (or a blank string)
/// clears the description.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    fn validate(self) -> Result<TodoPatch, ValidationError> {
        let title = self.title.as_deref().map(TodoTitle::new).transpose()?;
        let description = match self.description {
            Some(Some(text)) => Some(TodoDescription::parse(&text)?),
            Some(None) => Some(None),
            None => None,
        };

        Ok(TodoPatch {
            title,
            description,
            completed: self.completed,
        })
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// GET /api/todos - list all todos
async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = TodoRepo::new(&state.pool).list_all().await?;
    Ok(Json(todos))
}

/// POST /api/todos - create a todo
#[instrument(skip_all)]
async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new = req.validate()?;
    let todo = TodoRepo::new(&state.pool).create(new).await?;

    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /api/todos/{id} - get a single todo
async fn get_todo(
    State(state): State<Arc<AppState>>,
    ValidTodoId(id): ValidTodoId,
) -> Result<Json<Todo>, ApiError> {
    let todo = TodoRepo::new(&state.pool).get(id).await?;
    Ok(Json(todo))
}

/// PUT /api/todos/{id} - partial update
#[instrument(skip_all, fields(id = %id))]
async fn update_todo(
    State(state): State<Arc<AppState>>,
    ValidTodoId(id): ValidTodoId,
    ValidJson(req): ValidJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let patch = req.validate()?;
    let todo = TodoRepo::new(&state.pool).update(id, patch).await?;
    Ok(Json(todo))
}

/// DELETE /api/todos/{id} - delete a todo
#[instrument(skip_all, fields(id = %id))]
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    ValidTodoId(id): ValidTodoId,
) -> Result<Json<DeleteResponse>, ApiError> {
    TodoRepo::new(&state.pool).delete(id).await?;

    tracing::info!("todo deleted");
    Ok(Json(DeleteResponse {
        message: format!("todo {} deleted", id),
    }))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
