//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use bilidown_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Gone: {0}")]
    Gone(String),

    #[error("Bad gateway: {0}")]
    BadGateway(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn gone(msg: impl Into<String>) -> Self {
        Self::Gone(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Gone(_) => StatusCode::GONE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Pipeline failures map to status codes per failed stage; only the short
/// user message crosses the API boundary, tool diagnostics stay in the
/// server logs.
impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        let detail = err.user_message().to_string();
        match err {
            PipelineError::InvalidUrl => ApiError::BadRequest(detail),
            PipelineError::NoStream(_) => ApiError::Unprocessable(detail),
            PipelineError::Resolve(_) | PipelineError::Download(_) => {
                ApiError::BadGateway(detail)
            }
            PipelineError::Merge(_) => ApiError::Internal(detail),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match &self {
            // The inner text of these variants is already user-facing.
            ApiError::BadRequest(d)
            | ApiError::Unprocessable(d)
            | ApiError::Gone(d)
            | ApiError::BadGateway(d)
            | ApiError::Internal(d) => d.clone(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
