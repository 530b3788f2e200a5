use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clipper::ClipperConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub library: LibraryConfig,
    #[serde(default)]
    pub clip: ClipperConfig,
}

/// Media library configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory all request paths are relative to
    pub root: PathBuf,
    /// Reject paths that resolve outside `root` (e.g. via `..`)
    #[serde(default = "default_confine_to_root")]
    pub confine_to_root: bool,
}

fn default_confine_to_root() -> bool {
    true
}
