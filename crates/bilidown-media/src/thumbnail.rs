//! Best-effort thumbnail fetching.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

/// Browser identity sent with thumbnail requests; the source site rejects
/// bare client user agents.
const THUMBNAIL_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
const THUMBNAIL_REFERER: &str = "https://www.bilibili.com/";

/// HTTP client wrapper for thumbnail downloads.
#[derive(Debug, Clone)]
pub struct ThumbnailFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ThumbnailFetcher {
    /// Create a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Download a thumbnail into `download_dir` as `<prefix>_thumb.jpg`.
    ///
    /// Always best-effort: every failure (timeout, non-2xx status, network
    /// or write error) is logged and collapses to `None`. Returns the
    /// thumbnail file name on success.
    pub async fn fetch(&self, url: &str, prefix: &str, download_dir: &Path) -> Option<String> {
        let filename = format!("{prefix}_thumb.jpg");
        let path = download_dir.join(&filename);

        let response = match self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, THUMBNAIL_USER_AGENT)
            .header(reqwest::header::REFERER, THUMBNAIL_REFERER)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(url = %url, "Thumbnail request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                url = %url,
                status = %response.status(),
                "Thumbnail request returned non-success status"
            );
            return None;
        }

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(url = %url, "Failed to read thumbnail body: {}", e);
                return None;
            }
        };

        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            warn!(path = %path.display(), "Failed to write thumbnail: {}", e);
            return None;
        }

        info!(filename = %filename, "Downloaded thumbnail");
        Some(filename)
    }
}

/// Convenience wrapper: one-shot fetch with a fresh client.
pub async fn fetch_thumbnail(
    url: &str,
    prefix: &str,
    download_dir: &Path,
    timeout: Duration,
) -> Option<String> {
    ThumbnailFetcher::new(timeout)
        .fetch(url, prefix, download_dir)
        .await
}
