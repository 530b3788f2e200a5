pub mod clipper;
pub mod config;
pub mod library;
pub mod subtitles;

pub use clipper::{
    format_interval, ClipError, ClipExtractor, ClipRequest, ClipperConfig, FfmpegClipper,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LibraryConfig,
};
pub use library::{
    ClassifiedEntry, DirectoryItem, FileType, Item, LibraryError, MediaBrowser, MediaItem,
    PathResolver, ResolveError,
};
pub use subtitles::{Cue, SubtitleError, SubtitleFormat, SubtitleReader};
