use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tracing::{debug, info};

use crate::db::TodoStore;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router<S: TodoStore>(state: AppState<S>) -> Router {
    let todos: Router<AppState<S>> = Router::new()
        .route("/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route(
            "/todos/{id}",
            get(get_todo::<S>)
                .patch(toggle_todo::<S>)
                .delete(delete_todo::<S>),
        );

    Router::new()
        .route("/health", get(health::<S>))
        .nest("/api", todos)
        .with_state(state)
}

// only the canonical text form names a todo, so `+1` or `01` never alias id 1
fn parse_id<S: TodoStore>(raw: &str) -> Result<S::Id, AppError> {
    let id: S::Id = raw.parse().map_err(|_| AppError::InvalidId)?;
    if !id.to_string().eq_ignore_ascii_case(raw) {
        return Err(AppError::InvalidId);
    }
    Ok(id)
}

async fn health<S: TodoStore>(State(state): State<AppState<S>>) -> Result<StatusCode, AppError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_todos<S: TodoStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo<S::Id>>>, AppError> {
    let todos = state.store.find_all().await?;
    Ok(Json(todos))
}

async fn create_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<NewTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo<S::Id>>), AppError> {
    let Json(req) = payload?;
    let new = NewTodo::from_request(req).ok_or(AppError::EmptyBody)?;

    let todo = state.store.insert(new).await?;
    info!("created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo<S::Id>>, AppError> {
    let id = parse_id::<S>(&id)?;
    let todo = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo))
}

async fn toggle_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo<S::Id>>, AppError> {
    let id = parse_id::<S>(&id)?;
    let todo = state.store.toggle(&id).await?.ok_or(AppError::NotFound)?;
    debug!("todo {} completed={}", todo.id, todo.completed);
    Ok(Json(todo))
}

async fn delete_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id::<S>(&id)?;
    let deleted_count = state.store.delete_by_id(&id).await?;
    if deleted_count == 0 {
        return Err(AppError::NotFound);
    }

    info!("deleted todo {}", id);
    Ok(Json(DeleteResponse { deleted_count }))
}
