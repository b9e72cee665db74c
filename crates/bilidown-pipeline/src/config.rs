//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Process-wide pipeline configuration.
///
/// Constructed once at startup and passed by reference into each component;
/// never mutated at runtime.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Output directory for merged videos and thumbnails.
    pub download_dir: PathBuf,
    /// Working directory for transient per-job stream fragments.
    pub work_dir: PathBuf,
    /// Maximum file age before the janitor deletes it.
    pub max_file_age: Duration,
    /// Interval between janitor sweeps.
    pub sweep_interval: Duration,
    /// Timeout for the thumbnail fetch.
    pub thumbnail_timeout: Duration,
    /// Preferred audio sample rate in Hz.
    pub preferred_sample_rate: u32,
    /// Audio bitrate for the merged output.
    pub audio_bitrate: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloads"),
            work_dir: PathBuf::from("temp"),
            max_file_age: Duration::from_secs(3600), // 1 hour
            sweep_interval: Duration::from_secs(1800), // 30 minutes
            thumbnail_timeout: Duration::from_secs(10),
            preferred_sample_rate: 48000,
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            download_dir: std::env::var("BILIDOWN_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloads")),
            work_dir: std::env::var("BILIDOWN_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("temp")),
            max_file_age: Duration::from_secs(
                std::env::var("BILIDOWN_MAX_FILE_AGE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            sweep_interval: Duration::from_secs(
                std::env::var("BILIDOWN_SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1800),
            ),
            thumbnail_timeout: Duration::from_secs(
                std::env::var("BILIDOWN_THUMBNAIL_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            preferred_sample_rate: std::env::var("BILIDOWN_PREFERRED_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(48000),
            audio_bitrate: std::env::var("BILIDOWN_AUDIO_BITRATE")
                .unwrap_or_else(|_| "192k".to_string()),
        }
    }
}
