//! Axum HTTP API server for video thumbnail generation.
//!
//! This crate provides:
//! - Upload, generate-thumbnail, and get-thumbnail endpoints
//! - The thumbnail pipeline orchestrating storage and frame extraction
//! - CORS, request tracing, and body-size limiting

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{VideoError, VideoService};
pub use state::AppState;
