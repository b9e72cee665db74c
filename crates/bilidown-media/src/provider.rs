//! Capability traits for the external collaborators.
//!
//! The pipeline is written against these narrow seams so tests can
//! substitute fakes without touching the network or spawning processes.

use std::path::Path;

use async_trait::async_trait;

use bilidown_models::{ResolvedVideo, StreamFormat};

use crate::error::MediaResult;

/// A metadata resolver and stream fetcher for one source site.
#[async_trait]
pub trait StreamProvider: Send + Sync {
    /// Resolve a video's metadata and available formats.
    ///
    /// Must not write any media bytes to disk.
    async fn resolve(&self, url: &str) -> MediaResult<ResolvedVideo>;

    /// Fetch exactly one format's media bytes to `dest`, overwriting if
    /// present.
    async fn fetch(&self, url: &str, format: &StreamFormat, dest: &Path) -> MediaResult<()>;
}

/// Combines one video file and one audio file into one output file.
#[async_trait]
pub trait Muxer: Send + Sync {
    /// Merge `video` and `audio` into `output`, copying the video stream
    /// and re-encoding the audio.
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> MediaResult<()>;
}
