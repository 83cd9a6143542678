//! Route handlers

pub mod board;
pub mod health;
pub mod task;

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn map_store_error(err: taskdeck_core::Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        taskdeck_core::Error::TaskNotFound(_) => StatusCode::NOT_FOUND,
        taskdeck_core::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}
