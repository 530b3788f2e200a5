//! Types produced by directory listings.

use serde::{Deserialize, Serialize};

/// Kind of a classified directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Directory,
    Audio,
    Video,
    Subtitle,
}

impl FileType {
    /// Stable serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Subtitle => "subtitle",
        }
    }

    /// Whether this entry is a playable media file.
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Audio | Self::Video)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directory entry that matched one of the classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    /// File name as found on disk.
    pub name: String,
    /// Path relative to the library root.
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// A browsable sub-directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryItem {
    pub name: String,
    pub path: String,
}

/// Files sharing one normalized basename, e.g. `ep1.mkv` + `ep1.ass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<ClassifiedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_file: Option<ClassifiedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_file: Option<ClassifiedEntry>,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Directory(DirectoryItem),
    Media(MediaItem),
}

impl Item {
    /// Grouping name the listing is sorted by.
    pub fn name(&self) -> &str {
        match self {
            Self::Directory(d) => &d.name,
            Self::Media(m) => &m.name,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryItem> {
        match self {
            Self::Directory(d) => Some(d),
            Self::Media(_) => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaItem> {
        match self {
            Self::Media(m) => Some(m),
            Self::Directory(_) => None,
        }
    }
}
