//! BiliDown service binary.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bilidown_api::{create_router, ApiConfig, AppState};
use bilidown_pipeline::{Janitor, PipelineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let api_config = ApiConfig::from_env();
    let pipeline_config = PipelineConfig::from_env();

    // Both directories must exist before the first job or sweep.
    tokio::fs::create_dir_all(&pipeline_config.download_dir).await?;
    tokio::fs::create_dir_all(&pipeline_config.work_dir).await?;

    // Fire-and-forget janitor; it runs for the process lifetime.
    let janitor = Arc::new(Janitor::new(pipeline_config.clone()));
    tokio::spawn({
        let janitor = Arc::clone(&janitor);
        async move { janitor.run().await }
    });

    let addr = format!("{}:{}", api_config.host, api_config.port);
    let state = AppState::new(api_config, pipeline_config);
    let router = create_router(state);

    info!(addr = %addr, "Starting BiliDown API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Initialize tracing with colored output for dev, JSON for production.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bilidown=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
