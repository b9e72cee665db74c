//! Pipeline error taxonomy.

use thiserror::Error;

use bilidown_media::MediaError;
use bilidown_models::SelectError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Terminal job failures, tagged by the stage that produced them.
///
/// Each variant carries a distinct short user-facing message; the inner
/// diagnostics (tool stderr and the like) are logged server-side only.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid video URL")]
    InvalidUrl,

    #[error("resolution failed: {0}")]
    Resolve(MediaError),

    #[error("stream selection failed: {0}")]
    NoStream(#[from] SelectError),

    #[error("download failed: {0}")]
    Download(MediaError),

    #[error("merge failed: {0}")]
    Merge(MediaError),
}

impl PipelineError {
    /// Short human-readable message identifying the failed stage.
    ///
    /// Never includes internal diagnostic detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl => {
                "invalid video link (standard links and b23.tv short links are supported)"
            }
            PipelineError::Resolve(_) => "could not read the video page, please try again later",
            PipelineError::NoStream(_) => "no usable audio/video track for this video",
            PipelineError::Download(_) => "a media stream could not be downloaded",
            PipelineError::Merge(_) => "merging audio and video failed",
        }
    }
}
