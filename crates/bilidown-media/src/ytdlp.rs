//! Stream metadata resolution and download using yt-dlp.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use bilidown_models::stream::UNKNOWN_UPLOADER;
use bilidown_models::{ResolvedVideo, StreamFormat};

use crate::error::{MediaError, MediaResult};
use crate::provider::StreamProvider;

/// Check if yt-dlp is available.
pub fn check_ytdlp() -> MediaResult<PathBuf> {
    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)
}

/// yt-dlp's `--dump-single-json` output, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct YtDlpInfo {
    title: Option<String>,
    duration: Option<f64>,
    uploader: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    formats: Vec<StreamFormat>,
}

impl YtDlpInfo {
    fn into_resolved(self) -> ResolvedVideo {
        ResolvedVideo {
            title: self.title.unwrap_or_default(),
            duration_secs: self.duration.map(|d| d as u64).unwrap_or(0),
            uploader: self
                .uploader
                .unwrap_or_else(|| UNKNOWN_UPLOADER.to_string()),
            thumbnail_url: self.thumbnail.filter(|t| !t.is_empty()),
            formats: self.formats,
        }
    }
}

/// Production stream provider backed by the yt-dlp CLI.
#[derive(Debug, Clone, Default)]
pub struct YtDlpProvider;

impl YtDlpProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StreamProvider for YtDlpProvider {
    /// Resolve a video's metadata with `yt-dlp -J`.
    ///
    /// Dump-JSON implies simulate mode, so no media bytes touch disk.
    async fn resolve(&self, url: &str) -> MediaResult<ResolvedVideo> {
        check_ytdlp()?;

        info!(url = %url, "Resolving video metadata");

        let output = Command::new("yt-dlp")
            .args(["-J", "--no-warnings", "--no-playlist"])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp -J stderr: {}", stderr);
            return Err(MediaError::resolve_failed(format!(
                "yt-dlp failed: {}",
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        let info: YtDlpInfo = serde_json::from_slice(&output.stdout)?;
        let resolved = info.into_resolved();

        info!(
            url = %url,
            formats = resolved.formats.len(),
            duration_secs = resolved.duration_secs,
            "Resolved video metadata"
        );

        Ok(resolved)
    }

    /// Download exactly one format's bytes with `yt-dlp -f <id> -o <dest>`.
    async fn fetch(&self, url: &str, format: &StreamFormat, dest: &Path) -> MediaResult<()> {
        check_ytdlp()?;

        let dest_str = dest.to_string_lossy();

        info!(
            url = %url,
            format_id = %format.format_id,
            output = %dest.display(),
            "Downloading stream"
        );

        let mut args: Vec<&str> = vec![
            "-f",
            &format.format_id,
            "--quiet",
            "--no-warnings",
            "--no-playlist",
            "--force-overwrites",
            "-o",
            &dest_str,
        ];
        args.push(url);

        let output = Command::new("yt-dlp")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("yt-dlp stderr: {}", stderr);
            return Err(MediaError::download_failed(format!(
                "yt-dlp failed: {}",
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        if !dest.exists() {
            return Err(MediaError::download_failed("output file not created"));
        }

        let file_size = dest.metadata()?.len();
        info!(
            output = %dest.display(),
            size_mb = file_size as f64 / (1024.0 * 1024.0),
            "Downloaded stream successfully"
        );

        Ok(())
    }
}
