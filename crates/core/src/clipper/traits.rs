//! Trait definitions for the clipper module.

use async_trait::async_trait;

use super::error::ClipError;
use super::types::ClipRequest;

/// Something that can cut an audio clip out of a library file.
#[async_trait]
pub trait ClipExtractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Extracts the requested range as MP3 bytes.
    ///
    /// Returns only once the clip is fully materialized; no partial output is returned.
    async fn extract_clip(&self, request: &ClipRequest) -> Result<Vec<u8>, ClipError>;

    /// Validates that the extractor is properly configured and ready.
    async fn validate(&self) -> Result<(), ClipError>;
}
