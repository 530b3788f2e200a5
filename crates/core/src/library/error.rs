//! Error types for the library module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a root-relative path.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Resolved path does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Resolved path escapes the library root.
    #[error("Path is outside the library root: {path}")]
    OutsideRoot { path: PathBuf },

    /// I/O error while probing the path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// Whether this error means the target does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors that can occur while listing a directory.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Listing was requested on something that is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// I/O error during enumeration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resolve(e) if e.is_not_found())
    }
}
