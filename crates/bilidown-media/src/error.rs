//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving the external tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("metadata resolution failed: {message}")]
    ResolveFailed { message: String },

    #[error("download failed: {message}")]
    DownloadFailed { message: String },

    #[error("merge failed: {message}")]
    MergeFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a resolution failure error.
    pub fn resolve_failed(message: impl Into<String>) -> Self {
        Self::ResolveFailed {
            message: message.into(),
        }
    }

    /// Create a download failure error.
    pub fn download_failed(message: impl Into<String>) -> Self {
        Self::DownloadFailed {
            message: message.into(),
        }
    }

    /// Create a merge failure error.
    pub fn merge_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::MergeFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }
}
