//! Error types for the clipper module.

use std::path::PathBuf;
use thiserror::Error;

use crate::library::ResolveError;

/// Errors that can occur while extracting a clip.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Source is neither an audio nor a video file.
    #[error("Unsupported file type for clipping: {path}")]
    UnsupportedType { path: PathBuf },

    /// End of the range is not after its start.
    #[error("Invalid clip range: start {start_ms} ms, end {end_ms} ms")]
    InvalidRange { start_ms: i64, end_ms: i64 },

    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFmpeg exited unsuccessfully. `None` when terminated by a signal.
    #[error("Transcode failed with exit code: {exit_code:?}")]
    TranscodeFailed { exit_code: Option<i32> },

    /// I/O error around the transcode.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resolve(e) if e.is_not_found())
    }

    /// Whether this error is retryable.
    ///
    /// A failing transcode fails again with the same arguments.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
