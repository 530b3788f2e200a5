//! Types for clip extraction.

use serde::{Deserialize, Serialize};

/// A request for a time-bounded audio clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRequest {
    /// Source file, relative to the library root.
    pub source_path: String,
    pub start_ms: i64,
    pub end_ms: i64,
    /// Stream index to extract from a multi-track container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u32>,
}

impl ClipRequest {
    pub fn new(source_path: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            source_path: source_path.into(),
            start_ms,
            end_ms,
            track_id: None,
        }
    }

    pub fn with_track(mut self, track_id: u32) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Length of the requested range. Zero or negative for inverted ranges,
    /// `None` when the difference does not fit in an `i64`.
    pub fn duration_ms(&self) -> Option<i64> {
        self.end_ms.checked_sub(self.start_ms)
    }
}

/// Formats milliseconds as an ffmpeg `HH:MM:SS.mmm` duration.
pub fn format_interval(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let hours = ms / 3_600_000;
    let minutes = ms / 60_000 % 60;
    let seconds = ms / 1000 % 60;
    let millis = ms % 1000;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
