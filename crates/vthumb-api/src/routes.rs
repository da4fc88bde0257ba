//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{generate_thumbnail, get_thumbnail, health, upload_video};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let video_routes = Router::new()
        .route("/upload", post(upload_video))
        .route("/generate-thumbnail", post(generate_thumbnail))
        .route("/get-thumbnail/:thumbnail_id", get(get_thumbnail));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .merge(video_routes)
        .merge(health_routes)
        // Axum's built-in limit defaults to 2MB; uploads are whole videos
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
