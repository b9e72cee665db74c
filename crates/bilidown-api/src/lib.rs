//! Axum HTTP API for BiliDown.
//!
//! This crate provides:
//! - The job submission endpoint driving the download/merge pipeline
//! - File download and thumbnail serving endpoints
//! - Request-id, request-logging and CORS middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
