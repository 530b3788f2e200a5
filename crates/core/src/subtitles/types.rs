//! Subtitle cue types.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single subtitle display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    pub text: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Subtitle formats with a parser behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// Advanced SubStation Alpha (`.ass`).
    Ass,
    /// SubRip (`.srt`).
    Srt,
}

impl SubtitleFormat {
    /// Picks the format from the file name suffix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".ass") {
            Some(Self::Ass)
        } else if name.ends_with(".srt") {
            Some(Self::Srt)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SubtitleFormat::from_path(Path::new("shows/ep1.ass")),
            Some(SubtitleFormat::Ass)
        );
        assert_eq!(
            SubtitleFormat::from_path(Path::new("ep1.srt")),
            Some(SubtitleFormat::Srt)
        );
        assert_eq!(SubtitleFormat::from_path(Path::new("ep1.vtt")), None);
        assert_eq!(SubtitleFormat::from_path(Path::new("ep1.SRT")), None);
    }

    #[test]
    fn test_cue_json_shape() {
        let cue = Cue {
            text: "Hello".to_string(),
            start_ms: 1000,
            end_ms: 2500,
        };
        let json = serde_json::to_value(&cue).unwrap();
        assert_eq!(json["startMs"], 1000);
        assert_eq!(json["endMs"], 2500);
        assert_eq!(json["text"], "Hello");
    }
}
