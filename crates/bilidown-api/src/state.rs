//! Application state.

use std::sync::Arc;

use bilidown_media::{FfmpegMuxer, YtDlpProvider};
use bilidown_pipeline::PipelineConfig;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub api_config: ApiConfig,
    pub pipeline_config: Arc<PipelineConfig>,
    pub provider: Arc<YtDlpProvider>,
    pub muxer: Arc<FfmpegMuxer>,
}

impl AppState {
    /// Create new application state.
    pub fn new(api_config: ApiConfig, pipeline_config: PipelineConfig) -> Self {
        let muxer = FfmpegMuxer::new(pipeline_config.audio_bitrate.as_str());

        Self {
            api_config,
            pipeline_config: Arc::new(pipeline_config),
            provider: Arc::new(YtDlpProvider::new()),
            muxer: Arc::new(muxer),
        }
    }
}
