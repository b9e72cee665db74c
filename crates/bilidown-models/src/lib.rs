//! Shared data models for the BiliDown backend.
//!
//! This crate provides:
//! - Stream format descriptors as returned by the extraction provider
//! - Resolved video metadata and job outcome types
//! - Source URL validation
//! - Filename sanitization
//! - The video/audio stream selection policy

pub mod filename;
pub mod select;
pub mod stream;
pub mod url;

// Re-export common types
pub use filename::sanitize_title;
pub use select::{select_audio, select_video, SelectError, SelectResult};
pub use stream::{JobOutcome, ResolvedVideo, StreamFormat};
pub use url::is_valid_video_url;
