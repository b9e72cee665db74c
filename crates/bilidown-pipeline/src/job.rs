//! Per-job context and path derivation.

use std::path::PathBuf;

use chrono::Local;

use bilidown_models::{sanitize_title, StreamFormat};

use crate::config::PipelineConfig;

/// Timestamp format used in filename prefixes (second granularity).
const PREFIX_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Sanitize a raw title and derive the per-run filename prefix.
///
/// The prefix combines the sanitized title with the current wall-clock
/// timestamp so close-together submissions of the same video do not
/// collide. An empty or all-illegal title falls back to
/// `video_<timestamp>`. Returns `(title, prefix)`.
pub fn derive_title_and_prefix(raw_title: &str) -> (String, String) {
    let timestamp = Local::now().format(PREFIX_TIMESTAMP_FORMAT).to_string();

    let mut title = sanitize_title(raw_title);
    if title.is_empty() {
        title = format!("video_{timestamp}");
    }

    let prefix = format!("{title}_{timestamp}");
    (title, prefix)
}

/// Everything one pipeline run needs to know about its files.
///
/// Owned exclusively by that run and discarded when it finishes; only the
/// final output file outlives it, until the janitor reaps it.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Source video URL.
    pub url: String,
    /// Sanitized display title (placeholder if sanitization emptied it).
    pub title: String,
    /// Filename prefix: `<title>_<timestamp>`, unique per run.
    pub prefix: String,
    /// Temp path for the video-only stream.
    pub temp_video: PathBuf,
    /// Temp path for the audio-only stream.
    pub temp_audio: PathBuf,
    /// Staging path for the merge output, inside the work dir.
    pub staged_output: PathBuf,
    /// Final path under the output directory.
    pub final_output: PathBuf,
    /// Final file name.
    pub filename: String,
}

impl JobContext {
    /// Derive all paths for one run from the chosen streams.
    ///
    /// The merge output is staged in the work dir; it only appears under
    /// the final name once the merge has succeeded.
    pub fn new(
        config: &PipelineConfig,
        url: &str,
        title: String,
        prefix: String,
        video: &StreamFormat,
        audio: &StreamFormat,
    ) -> Self {
        let filename = format!("{prefix}.mp4");

        Self {
            url: url.to_string(),
            temp_video: config
                .work_dir
                .join(format!("{prefix}_video.{}", video.ext_or("mp4"))),
            temp_audio: config
                .work_dir
                .join(format!("{prefix}_audio.{}", audio.ext_or("m4a"))),
            staged_output: config.work_dir.join(format!("{prefix}_merged.mp4")),
            final_output: config.download_dir.join(&filename),
            title,
            prefix,
            filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(ext: Option<&str>) -> StreamFormat {
        StreamFormat {
            format_id: "1".to_string(),
            vcodec: None,
            acodec: None,
            height: None,
            asr: None,
            ext: ext.map(String::from),
        }
    }

    #[test]
    fn test_prefix_derivation_sanitizes_title() {
        let (title, prefix) = derive_title_and_prefix("my: video?");
        assert_eq!(title, "my video");
        assert!(prefix.starts_with("my video_"));
        // Second-granularity timestamp suffix.
        assert_eq!(prefix.len(), "my video_".len() + 14);
    }

    #[test]
    fn test_empty_title_falls_back_to_placeholder() {
        let (title, prefix) = derive_title_and_prefix(r#"\/:*?"<>|"#);
        assert!(title.starts_with("video_"));
        assert_eq!(prefix, format!("{title}_{}", &title["video_".len()..]));
    }

    #[test]
    fn test_paths_derive_from_prefix_and_extensions() {
        let config = PipelineConfig::default();
        let ctx = JobContext::new(
            &config,
            "https://www.bilibili.com/video/BV1x",
            "my video".to_string(),
            "my video_20240101120000".to_string(),
            &fmt(Some("mp4")),
            &fmt(Some("m4a")),
        );

        assert!(ctx
            .temp_video
            .to_string_lossy()
            .ends_with("my video_20240101120000_video.mp4"));
        assert!(ctx
            .temp_audio
            .to_string_lossy()
            .ends_with("my video_20240101120000_audio.m4a"));
        assert_eq!(ctx.filename, "my video_20240101120000.mp4");
        assert!(ctx.staged_output.starts_with(&config.work_dir));
        assert!(ctx.final_output.starts_with(&config.download_dir));
        assert_ne!(ctx.staged_output, ctx.final_output);
    }

    #[test]
    fn test_missing_extensions_use_defaults() {
        let config = PipelineConfig::default();
        let ctx = JobContext::new(
            &config,
            "https://b23.tv/abc",
            "t".to_string(),
            "t_20240101120000".to_string(),
            &fmt(None),
            &fmt(None),
        );

        assert!(ctx.temp_video.to_string_lossy().ends_with("_video.mp4"));
        assert!(ctx.temp_audio.to_string_lossy().ends_with("_audio.m4a"));
    }
}
