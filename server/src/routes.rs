//! HTTP handlers for `/todos`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::error::ApiError;
use crate::model::{NewTodo, Todo, TodoPatch};
use crate::service::TodoService;

pub fn router(service: TodoService) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(service)
}

/// 200 with the record, or 404 with an empty body.
fn found_or_404(todo: Option<Todo>) -> Response {
    match todo {
        Some(todo) => (StatusCode::OK, Json(todo)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_todo(
    State(service): State<TodoService>,
    input: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(draft) = input?;
    let todo = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos(State(service): State<TodoService>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(service.list().await?))
}

async fn get_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(found_or_404(service.get(&id).await?))
}

async fn update_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
    input: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = input?;
    Ok(found_or_404(service.update(&id, patch).await?))
}

async fn delete_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(found_or_404(service.delete(&id).await?))
}
