//! FFmpeg mux command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::{MediaError, MediaResult};
use crate::provider::Muxer;

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Audio codec every merged file is transcoded to.
const MERGE_AUDIO_CODEC: &str = "aac";

/// Builder for the two-input merge command.
///
/// The video stream is copied unmodified; the audio stream is transcoded
/// to AAC at the configured bitrate.
#[derive(Debug, Clone)]
pub struct MuxCommand {
    video: PathBuf,
    audio: PathBuf,
    output: PathBuf,
    audio_bitrate: String,
    log_level: String,
}

impl MuxCommand {
    /// Create a merge command for one video file and one audio file.
    pub fn new(
        video: impl AsRef<Path>,
        audio: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Self {
        Self {
            video: video.as_ref().to_path_buf(),
            audio: audio.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            audio_bitrate: "192k".to_string(),
            log_level: "error".to_string(),
        }
    }

    /// Set the audio bitrate (e.g. "192k").
    pub fn audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.audio_bitrate = bitrate.into();
        self
    }

    /// Set the FFmpeg log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            self.video.to_string_lossy().to_string(),
            "-i".to_string(),
            self.audio.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            MERGE_AUDIO_CODEC.to_string(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
            "-strict".to_string(),
            "experimental".to_string(),
            "-loglevel".to_string(),
            self.log_level.clone(),
            self.output.to_string_lossy().to_string(),
        ]
    }

    /// Run the command to completion.
    ///
    /// Both input files must already exist; this is checked before FFmpeg
    /// is spawned so a missing input surfaces as [`MediaError::FileNotFound`]
    /// instead of an opaque tool diagnostic.
    pub async fn run(&self) -> MediaResult<()> {
        if !self.video.exists() {
            return Err(MediaError::FileNotFound(self.video.clone()));
        }
        if !self.audio.exists() {
            return Err(MediaError::FileNotFound(self.audio.clone()));
        }

        check_ffmpeg()?;

        let args = self.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            error!(
                exit_code = ?output.status.code(),
                "FFmpeg merge failed: {}",
                stderr.trim()
            );
            return Err(MediaError::merge_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr),
                output.status.code(),
            ));
        }

        info!(output = %self.output.display(), "Merged audio and video");
        Ok(())
    }
}

/// Production muxer backed by the FFmpeg CLI.
#[derive(Debug, Clone)]
pub struct FfmpegMuxer {
    audio_bitrate: String,
}

impl FfmpegMuxer {
    /// Create a muxer transcoding audio at the given bitrate.
    pub fn new(audio_bitrate: impl Into<String>) -> Self {
        Self {
            audio_bitrate: audio_bitrate.into(),
        }
    }
}

#[async_trait]
impl Muxer for FfmpegMuxer {
    async fn merge(&self, video: &Path, audio: &Path, output: &Path) -> MediaResult<()> {
        MuxCommand::new(video, audio, output)
            .audio_bitrate(self.audio_bitrate.as_str())
            .run()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mux_args() {
        let cmd = MuxCommand::new("v.mp4", "a.m4a", "out.mp4").audio_bitrate("128k");
        let args = cmd.build_args();

        assert_eq!(args[0], "-y");
        // Video input precedes audio input.
        let inputs: Vec<usize> = args
            .iter()
            .enumerate()
            .filter(|(_, a)| *a == "-i")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(args[inputs[0] + 1], "v.mp4");
        assert_eq!(args[inputs[1] + 1], "a.m4a");

        assert!(args.windows(2).any(|w| w == ["-c:v", "copy"]));
        assert!(args.windows(2).any(|w| w == ["-c:a", "aac"]));
        assert!(args.windows(2).any(|w| w == ["-b:a", "128k"]));
        assert!(args.windows(2).any(|w| w == ["-loglevel", "error"]));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[tokio::test]
    async fn test_missing_video_input_refuses_to_run() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("missing_video.mp4");
        let audio = dir.path().join("audio.m4a");
        let output = dir.path().join("out.mp4");
        tokio::fs::write(&audio, b"x").await.unwrap();

        let err = MuxCommand::new(&video, &audio, &output)
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::FileNotFound(p) if p == video));
        // FFmpeg was never invoked, so no output can exist.
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_missing_audio_input_refuses_to_run() {
        let dir = TempDir::new().unwrap();
        let video = dir.path().join("video.mp4");
        let audio = dir.path().join("missing_audio.m4a");
        let output = dir.path().join("out.mp4");
        tokio::fs::write(&video, b"x").await.unwrap();

        let err = MuxCommand::new(&video, &audio, &output)
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::FileNotFound(p) if p == audio));
        assert!(!output.exists());
    }
}
