//! Error types for the subtitles module.

use std::path::PathBuf;
use thiserror::Error;

use crate::library::ResolveError;

/// Errors that can occur while reading subtitle cues.
#[derive(Debug, Error)]
pub enum SubtitleError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// File extension has no parser.
    #[error("Unsupported subtitle format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Reading or parsing the file failed.
    #[error("Failed to parse subtitles {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },
}

impl SubtitleError {
    pub fn parse_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resolve(e) if e.is_not_found())
    }
}
