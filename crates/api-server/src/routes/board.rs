//! Board projection endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use taskdeck_core::task::{Board, TaskRepository};

use super::{map_store_error, ErrorResponse};
use crate::state::AppState;

/// GET /api/board - Both category lists in display order
async fn get_board(
    State(state): State<AppState>,
) -> Result<Json<Board>, (StatusCode, Json<ErrorResponse>)> {
    let board = state.task_store().board().await.map_err(map_store_error)?;
    Ok(Json(board))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/board", get(get_board))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use taskdeck_core::task::{Selection, TaskDraft, TaskRepository, TaskType};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::state::AppState;

    #[tokio::test]
    async fn board_groups_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::new(temp_dir.path().to_path_buf());
        let store = state.task_store();

        store
            .add(TaskDraft::new(TaskType::Long, "Write report").with_deadline("2024-12-01"))
            .await
            .unwrap();
        let a = store.add(TaskDraft::new(TaskType::Todo, "A")).await.unwrap();
        let b = store.add(TaskDraft::new(TaskType::Todo, "B")).await.unwrap();
        store.reorder(TaskType::Todo, &[b.id, a.id]).await.unwrap();
        store
            .toggle_complete(a.id, &mut Selection::new())
            .await
            .unwrap();

        let app = super::router().with_state(state.clone());
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/board")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["long"][0]["title"], "Write report");
        assert_eq!(payload["todo"][0]["title"], "B");
        assert_eq!(payload["todo"][1]["title"], "A");
        assert_eq!(payload["todo"][1]["completed"], true);
    }
}
