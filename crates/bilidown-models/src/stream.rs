//! Stream descriptors and resolved video metadata.

use serde::{Deserialize, Serialize};

/// Uploader name used when the provider does not report one.
pub const UNKNOWN_UPLOADER: &str = "unknown uploader";

/// One downloadable track variant as reported by the extraction provider.
///
/// Produced entirely by yt-dlp's `--dump-single-json` output; the pipeline
/// only filters and ranks these records, it never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFormat {
    /// Provider-side format identifier, passed back verbatim on fetch.
    pub format_id: String,
    /// Video codec name; `"none"` or absent means no video track.
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Audio codec name; `"none"` or absent means no audio track.
    #[serde(default)]
    pub acodec: Option<String>,
    /// Video height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Audio sample rate in Hz.
    #[serde(default)]
    pub asr: Option<u32>,
    /// Container extension (e.g. "mp4", "m4a").
    #[serde(default)]
    pub ext: Option<String>,
}

impl StreamFormat {
    /// Whether this format carries a real video track.
    pub fn has_video(&self) -> bool {
        matches!(self.vcodec.as_deref(), Some(c) if c != "none")
    }

    /// Whether this format carries a real audio track.
    pub fn has_audio(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(c) if c != "none")
    }

    /// Video-only: a real video codec and no audio codec.
    pub fn is_video_only(&self) -> bool {
        self.has_video() && !self.has_audio()
    }

    /// Audio-only: a real audio codec and no video codec.
    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    /// Container extension, defaulting when the provider omits it.
    pub fn ext_or(&self, fallback: &str) -> String {
        self.ext.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// Metadata for one source video, resolved without downloading any media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedVideo {
    /// Display title, raw (not yet sanitized for the filesystem).
    pub title: String,
    /// Duration in whole seconds, 0 if unknown.
    pub duration_secs: u64,
    /// Uploader display name, [`UNKNOWN_UPLOADER`] if unknown.
    pub uploader: String,
    /// Thumbnail URL, if the provider reported one.
    pub thumbnail_url: Option<String>,
    /// All available stream format descriptors, in provider order.
    pub formats: Vec<StreamFormat>,
}

/// What a completed job hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    /// Final merged file name under the output directory.
    pub filename: String,
    /// Sanitized video title.
    pub title: String,
    /// Duration in seconds.
    pub duration_secs: u64,
    /// Uploader display name.
    pub uploader: String,
    /// Thumbnail file name under the output directory, if fetched.
    pub thumbnail: Option<String>,
}
