//! API Server for taskdeck
//!
//! Serves the task store as a local JSON API for the browser UI.

mod config;
mod routes;
mod state;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::AppState;

fn build_router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::task::router())
        .merge(routes::board::router())
        .with_state(state);

    let app = if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };

    app.layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskdeck_server=debug,taskdeck_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let app_state = AppState::new(config.data_dir.clone());
    let app = build_router(app_state, config.cors);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("REST API listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::build_router;
    use crate::state::AppState;

    #[tokio::test]
    async fn health_reports_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::new(temp_dir.path().to_path_buf());
        let app = build_router(state, true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status"], "ok");
        assert_eq!(
            payload["dataDir"],
            temp_dir.path().to_string_lossy().to_string()
        );
    }
}
