//! Clipper module for cutting audio clips out of library files.
//!
//! This module provides the `ClipExtractor` trait and an implementation that
//! drives an external ffmpeg process.
//!
//! # Features
//!
//! - Audio sources are cut with stream copy (no re-encoding)
//! - Video sources are downmixed to stereo 44.1 kHz MP3 at 192 kb/s
//! - Optional stream selection for multi-track containers
//! - Scratch files are removed once the clip is read back
//!
//! # Example
//!
//! ```ignore
//! use mediashelf_core::clipper::{ClipExtractor, ClipRequest, ClipperConfig, FfmpegClipper};
//! use mediashelf_core::library::PathResolver;
//!
//! let clipper = FfmpegClipper::new(PathResolver::new("/media"), ClipperConfig::default());
//! clipper.validate().await?;
//!
//! let request = ClipRequest::new("shows/ep1.mkv", 61_000, 64_500).with_track(2);
//! let mp3 = clipper.extract_clip(&request).await?;
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ClipperConfig;
pub use error::ClipError;
pub use ffmpeg::FfmpegClipper;
pub use traits::ClipExtractor;
pub use types::{format_interval, ClipRequest};
