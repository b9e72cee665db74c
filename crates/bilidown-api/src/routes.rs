//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{download_file, health, serve_thumbnail, submit_job};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/jobs", post(submit_job));

    let file_routes = Router::new()
        .route("/download/:filename", get(download_file))
        .route("/thumbnail/:filename", get(serve_thumbnail));

    let health_routes = Router::new().route("/health", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(file_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.api_config.cors_origins))
        .with_state(state)
}
