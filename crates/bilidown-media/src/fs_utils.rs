//! Filesystem helpers for publishing finished files.

use std::path::Path;

use tokio::fs;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Move a finished file into its final location.
///
/// The merge output is staged in the work directory and only appears under
/// its final name once complete, so a fast rename is attempted first. When
/// the work and output directories live on different filesystems the rename
/// fails with EXDEV and the move falls back to copy-via-temp plus rename,
/// which keeps the destination name atomic on its own filesystem.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            debug!(
                "Cross-device rename, falling back to copy+delete: {} -> {}",
                src.display(),
                dst.display()
            );
            copy_and_delete(src, dst).await
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// EXDEV is error code 18 on Linux/macOS.
fn is_cross_device_error(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(18)
}

async fn copy_and_delete(src: &Path, dst: &Path) -> MediaResult<()> {
    // Stage next to dst so the final rename stays on one filesystem.
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = fs::remove_file(&tmp_dst).await;
        return Err(MediaError::from(e));
    }

    // Removing the source is best effort once the destination exists.
    if let Err(e) = fs::remove_file(src).await {
        warn!(
            "Failed to remove source after cross-device move: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}
