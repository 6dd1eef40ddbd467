//! Todo CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoPatch};
use crate::validate::required_text;

/// Creates the todos router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .with_state(state)
}

/// Request body for creating a todo.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub text: Option<String>,
}

/// Request body for updating a todo. Absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub completed: Option<bool>,
    pub text: Option<String>,
}

/// GET /api/todos - All todos, newest first.
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(state.store.list_todos().await?))
}

/// POST /api/todos - Create a todo from non-empty text.
async fn create_todo(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let text = required_text("Task text", req.text.as_deref())?;
    let todo = state.store.insert_todo(NewTodo { text }).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /api/todos/{id} - A single todo.
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let todo = state
        .store
        .get_todo(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;
    Ok(Json(todo))
}

/// PUT /api/todos/{id} - Update completion state and/or text.
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let text = match req.text {
        Some(ref t) => Some(required_text("Task text", Some(t))?),
        None => None,
    };

    let patch = TodoPatch { text, completed: req.completed };
    let todo = state
        .store
        .update_todo(&id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;
    Ok(Json(todo))
}

/// DELETE /api/todos/{id}
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .store
        .delete_todo(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;
    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
