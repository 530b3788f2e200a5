//! Configuration for the clipper module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the FFmpeg-based clipper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipperConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Scratch directory for clip output files.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,

    /// Reject requests whose end is not after their start.
    #[serde(default)]
    pub validate_range: bool,

    /// Additional ffmpeg arguments, placed before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("mediashelf-clips")
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            temp_dir: default_temp_dir(),
            validate_range: false,
            extra_args: Vec::new(),
        }
    }
}

impl ClipperConfig {
    /// Creates a new config with a custom ffmpeg path.
    pub fn with_ffmpeg_path(ffmpeg_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ..Default::default()
        }
    }

    /// Sets the temp directory.
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }
}
