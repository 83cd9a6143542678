//! Task API endpoints
//!
//! JSON API over the task store, one endpoint per store operation.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskdeck_core::task::{Selection, Task, TaskDraft, TaskList, TaskRepository, TaskType};

use taskdeck_core::Error;

use super::{map_store_error, ErrorResponse};
use crate::state::AppState;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub reordered: usize,
}

/// Toggle and delete accept an optional `{ "selection": [...] }` body.
fn parse_selection(body: &Bytes) -> ApiResult<Selection> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Selection::new());
    }

    serde_json::from_slice::<SelectionRequest>(body)
        .map(|req| req.selection)
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid selection: {}", e),
                }),
            )
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - Load the stored snapshot
async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = state.task_store().load().await.map_err(map_store_error)?;
    Ok(Json(tasks.into_vec()))
}

/// PUT /api/tasks - Replace the stored snapshot
async fn replace_tasks(
    State(state): State<AppState>,
    Json(tasks): Json<Vec<Task>>,
) -> ApiResult<StatusCode> {
    state
        .task_store()
        .save(&TaskList::from(tasks))
        .await
        .map_err(map_store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = state
        .task_store()
        .add(draft)
        .await
        .map_err(map_store_error)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Task>> {
    let task = state.task_store().get(id).await.map_err(map_store_error)?;

    task.map(Json)
        .ok_or_else(|| map_store_error(Error::TaskNotFound(id.to_string())))
}

/// PUT /api/tasks/{id} - Overwrite type, title and deadline
async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TaskDraft>,
) -> ApiResult<Json<Task>> {
    let task = state
        .task_store()
        .edit(id, draft)
        .await
        .map_err(map_store_error)?;
    Ok(Json(task))
}

/// POST /api/tasks/{id}/toggle - Flip completion of the selection or the task
async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> ApiResult<Json<TasksResponse>> {
    let mut selection = parse_selection(&body)?;
    let tasks = state
        .task_store()
        .toggle_complete(id, &mut selection)
        .await
        .map_err(map_store_error)?;
    Ok(Json(TasksResponse { tasks }))
}

/// DELETE /api/tasks/{id} - Delete the selection or the task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> ApiResult<Json<TasksResponse>> {
    let mut selection = parse_selection(&body)?;
    let tasks = state
        .task_store()
        .delete(id, &mut selection)
        .await
        .map_err(map_store_error)?;
    Ok(Json(TasksResponse { tasks }))
}

/// POST /api/tasks/reorder - Store the displayed order of one category
async fn reorder_tasks(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<ReorderResponse>> {
    let reordered = state
        .task_store()
        .reorder(req.task_type, &req.ids)
        .await
        .map_err(map_store_error)?;
    Ok(Json(ReorderResponse { reordered }))
}

/// POST /api/tasks/clear-completed - Remove completed tasks of one category
async fn clear_completed(
    State(state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Json<TasksResponse>> {
    let tasks = state
        .task_store()
        .clear_completed(req.task_type)
        .await
        .map_err(map_store_error)?;
    Ok(Json(TasksResponse { tasks }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks).post(create_task).put(replace_tasks),
        )
        .route("/api/tasks/reorder", post(reorder_tasks))
        .route("/api/tasks/clear-completed", post(clear_completed))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(edit_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/toggle", post(toggle_task))
}
