//! Background reaper for expired files.
//!
//! Runs for the process lifetime on a fixed timer, independent of any
//! job's lifecycle. It only ever deletes; active jobs are protected by the
//! retention window being far larger than a job's runtime, not by locking.

use std::path::Path;
use std::time::SystemTime;

use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;

/// Periodic janitor sweeping the work and output directories.
pub struct Janitor {
    config: PipelineConfig,
}

impl Janitor {
    /// Create a janitor for the configured directories.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the sweep loop forever.
    ///
    /// Spawn this as a detached background task. Nothing a single cycle
    /// encounters can stop subsequent cycles.
    pub async fn run(&self) {
        info!(
            interval_secs = self.config.sweep_interval.as_secs(),
            max_age_secs = self.config.max_file_age.as_secs(),
            "Starting file janitor"
        );

        let mut ticker = interval(self.config.sweep_interval);

        loop {
            ticker.tick().await;
            let deleted = self.sweep_once().await;
            if deleted > 0 {
                info!(deleted, "Janitor sweep complete");
            }
        }
    }

    /// Run a single sweep cycle over both directories.
    ///
    /// Returns the number of files deleted. Every per-directory and
    /// per-file error is logged and skipped.
    pub async fn sweep_once(&self) -> usize {
        let mut deleted = 0;
        for dir in [&self.config.download_dir, &self.config.work_dir] {
            deleted += self.sweep_dir(dir).await;
        }
        deleted
    }

    async fn sweep_dir(&self, dir: &Path) -> usize {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(e) => e,
            Err(e) => {
                debug!(dir = %dir.display(), "Skipping unreadable directory: {}", e);
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut deleted = 0;

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(e)) => e,
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %dir.display(), "Failed to read directory entry: {}", e);
                    break;
                }
            };
            let path = entry.path();

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = %path.display(), "Failed to read metadata: {}", e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            // Retention is measured from creation time, not modification
            // time; filesystems that do not report it leave the file alone.
            let created = match metadata.created() {
                Ok(t) => t,
                Err(e) => {
                    debug!(path = %path.display(), "No creation time available: {}", e);
                    continue;
                }
            };

            let age = now.duration_since(created).unwrap_or_default();
            if age <= self.config.max_file_age {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!(
                        path = %path.display(),
                        age_secs = age.as_secs(),
                        "Deleted expired file"
                    );
                    deleted += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), "Failed to delete expired file: {}", e);
                }
            }
        }

        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use tempfile::TempDir;

    fn config_with(dir: &TempDir, max_file_age: Duration) -> PipelineConfig {
        PipelineConfig {
            download_dir: dir.path().join("downloads"),
            work_dir: dir.path().join("work"),
            max_file_age,
            ..PipelineConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fresh_files_are_kept() {
        let dir = TempDir::new().unwrap();
        let config = config_with(&dir, Duration::from_secs(3600));
        tokio::fs::create_dir_all(&config.download_dir).await.unwrap();
        let file = config.download_dir.join("video.mp4");
        tokio::fs::write(&file, b"x").await.unwrap();

        let deleted = Janitor::new(config).sweep_once().await;

        assert_eq!(deleted, 0);
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_expired_files_are_deleted_from_both_dirs() {
        let dir = TempDir::new().unwrap();
        // Zero retention: anything with measurable age is expired.
        let config = config_with(&dir, Duration::ZERO);
        tokio::fs::create_dir_all(&config.download_dir).await.unwrap();
        tokio::fs::create_dir_all(&config.work_dir).await.unwrap();
        let final_file = config.download_dir.join("video.mp4");
        let temp_file = config.work_dir.join("video_video.mp4");
        tokio::fs::write(&final_file, b"x").await.unwrap();
        tokio::fs::write(&temp_file, b"x").await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let deleted = Janitor::new(config).sweep_once().await;

        assert_eq!(deleted, 2);
        assert!(!final_file.exists());
        assert!(!temp_file.exists());
    }

    #[tokio::test]
    async fn test_missing_directories_complete_the_cycle() {
        let dir = TempDir::new().unwrap();
        let config = config_with(&dir, Duration::ZERO);
        // Neither directory exists.
        let deleted = Janitor::new(config).sweep_once().await;
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_subdirectories_are_not_touched() {
        let dir = TempDir::new().unwrap();
        let config = config_with(&dir, Duration::ZERO);
        let subdir = config.download_dir.join("nested");
        tokio::fs::create_dir_all(&subdir).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let deleted = Janitor::new(config).sweep_once().await;

        assert_eq!(deleted, 0);
        assert!(subdir.exists());
    }
}
