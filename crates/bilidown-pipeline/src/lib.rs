//! End-to-end download/merge pipeline for BiliDown.
//!
//! This crate provides:
//! - The per-job orchestrator (`run_job`): validate, resolve, select,
//!   download, merge, clean up
//! - Process-wide pipeline configuration
//! - The background janitor reaping expired files

pub mod config;
pub mod error;
pub mod janitor;
pub mod job;
pub mod processor;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use janitor::Janitor;
pub use job::JobContext;
pub use processor::run_job;
