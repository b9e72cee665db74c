//! Job processing logic.
//!
//! One call to [`run_job`] drives a full pipeline run: validate the URL,
//! resolve metadata, pick the best video-only and audio-only streams,
//! download both, merge them, publish the result into the output directory
//! and clean up the fragments. Failures are terminal and tagged with the
//! stage that produced them; there are no retries.

use tokio::task::JoinHandle;
use tracing::{info, warn};

use bilidown_media::thumbnail::fetch_thumbnail;
use bilidown_media::{move_file, Muxer, StreamProvider};
use bilidown_models::{is_valid_video_url, select_audio, select_video, JobOutcome, ResolvedVideo};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::job::{derive_title_and_prefix, JobContext};

/// Run one download/merge job to completion.
pub async fn run_job<P, M>(
    config: &PipelineConfig,
    provider: &P,
    muxer: &M,
    url: &str,
) -> PipelineResult<JobOutcome>
where
    P: StreamProvider,
    M: Muxer,
{
    // Validating: no network happens before this passes.
    let url = url.trim();
    if url.is_empty() || !is_valid_video_url(url) {
        return Err(PipelineError::InvalidUrl);
    }

    info!(url = %url, "Starting download job");

    // Resolving
    let resolved = provider
        .resolve(url)
        .await
        .map_err(PipelineError::Resolve)?;

    let (title, prefix) = derive_title_and_prefix(&resolved.title);
    let thumbnail_task = spawn_thumbnail_fetch(config, &resolved, &prefix);

    // Selecting
    let video = select_video(&resolved.formats)?.clone();
    let audio = select_audio(&resolved.formats, config.preferred_sample_rate)?.clone();

    info!(
        video_format = %video.format_id,
        video_height = ?video.height,
        audio_format = %audio.format_id,
        audio_asr = ?audio.asr,
        "Selected streams"
    );

    let ctx = JobContext::new(config, url, title, prefix, &video, &audio);

    // Downloading: the two streams write to disjoint paths, so they can
    // run concurrently.
    prepare_directories(config)
        .await
        .map_err(PipelineError::Download)?;

    tokio::try_join!(
        provider.fetch(url, &video, &ctx.temp_video),
        provider.fetch(url, &audio, &ctx.temp_audio),
    )
    .map_err(PipelineError::Download)?;

    // Merging: stage in the work dir, publish under the final name only
    // after FFmpeg has succeeded.
    muxer
        .merge(&ctx.temp_video, &ctx.temp_audio, &ctx.staged_output)
        .await
        .map_err(PipelineError::Merge)?;

    move_file(&ctx.staged_output, &ctx.final_output)
        .await
        .map_err(PipelineError::Merge)?;

    // CleaningUp: the job is already substantively successful.
    remove_temp_files(&ctx).await;

    let thumbnail = match thumbnail_task {
        Some(handle) => handle.await.ok().flatten(),
        None => None,
    };

    info!(filename = %ctx.filename, "Job completed");

    Ok(JobOutcome {
        filename: ctx.filename,
        title: ctx.title,
        duration_secs: resolved.duration_secs,
        uploader: resolved.uploader,
        thumbnail,
    })
}

/// Ensure both working directories exist before any bytes are written.
async fn prepare_directories(config: &PipelineConfig) -> bilidown_media::MediaResult<()> {
    tokio::fs::create_dir_all(&config.work_dir).await?;
    tokio::fs::create_dir_all(&config.download_dir).await?;
    Ok(())
}

/// Kick off the best-effort thumbnail fetch.
///
/// Runs detached alongside the downloads; its outcome can never fail the
/// job, only decide whether the outcome carries a thumbnail name.
fn spawn_thumbnail_fetch(
    config: &PipelineConfig,
    resolved: &ResolvedVideo,
    prefix: &str,
) -> Option<JoinHandle<Option<String>>> {
    let thumbnail_url = resolved.thumbnail_url.clone()?;
    let prefix = prefix.to_string();
    let download_dir = config.download_dir.clone();
    let timeout = config.thumbnail_timeout;

    Some(tokio::spawn(async move {
        fetch_thumbnail(&thumbnail_url, &prefix, &download_dir, timeout).await
    }))
}

/// Best-effort removal of the per-job stream fragments.
async fn remove_temp_files(ctx: &JobContext) {
    for path in [&ctx.temp_video, &ctx.temp_audio] {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), "Failed to remove temp file: {}", e);
        }
    }
}
