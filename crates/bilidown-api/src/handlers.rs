//! API handlers.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::io::ReaderStream;
use tracing::warn;

use bilidown_models::JobOutcome;
use bilidown_pipeline::run_job;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Job submission request.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub url: String,
}

/// Submit a URL and run the download/merge pipeline to completion.
pub async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<JobOutcome>> {
    let outcome = run_job(
        state.pipeline_config.as_ref(),
        state.provider.as_ref(),
        state.muxer.as_ref(),
        &request.url,
    )
    .await
    .map_err(|e| {
        warn!(url = %request.url, "Job failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(outcome))
}

/// Serve a merged video file as an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    ensure_safe_filename(&filename)?;
    let path = state.pipeline_config.download_dir.join(&filename);

    let expired = || ApiError::gone("file not found or expired (files are kept for one hour)");

    let file = tokio::fs::File::open(&path).await.map_err(|_| expired())?;
    let metadata = file.metadata().await.map_err(|_| expired())?;
    if !metadata.is_file() {
        return Err(expired());
    }

    let stream = ReaderStream::new(file);
    let mut response = Body::from_stream(stream).into_response();

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    // Titles can carry non-ASCII; fall back to a bare attachment header
    // rather than failing the download.
    let disposition = format!("attachment; filename=\"{filename}\"")
        .parse()
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    Ok(response)
}

/// Serve a thumbnail image, or an empty 204 when absent.
pub async fn serve_thumbnail(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    ensure_safe_filename(&filename)?;
    let path = state.pipeline_config.download_dir.join(&filename);

    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/jpeg")],
            bytes,
        )
            .into_response()),
        Err(_) => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Reject path components in user-supplied filenames.
fn ensure_safe_filename(filename: &str) -> ApiResult<()> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(ApiError::bad_request("invalid filename"));
    }
    Ok(())
}
