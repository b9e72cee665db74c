//! External-tool adapters for BiliDown.
//!
//! This crate provides:
//! - The `StreamProvider` and `Muxer` capability traits
//! - Metadata resolution and per-format download via the yt-dlp CLI
//! - Audio/video muxing via the FFmpeg CLI
//! - Best-effort thumbnail fetching over HTTP
//! - Cross-device file publishing into the output directory

pub mod error;
pub mod fs_utils;
pub mod mux;
pub mod provider;
pub mod thumbnail;
pub mod ytdlp;

pub use error::{MediaError, MediaResult};
pub use fs_utils::move_file;
pub use mux::{check_ffmpeg, FfmpegMuxer, MuxCommand};
pub use provider::{Muxer, StreamProvider};
pub use thumbnail::{fetch_thumbnail, ThumbnailFetcher};
pub use ytdlp::{check_ytdlp, YtDlpProvider};
