//! Extension based classification of directory entries.

use std::path::Path;

use super::types::FileType;

const SUBTITLE_SUFFIXES: &[&str] = &[".ass", ".srt"];
const AUDIO_SUFFIXES: &[&str] = &[".mp3"];
const VIDEO_SUFFIXES: &[&str] = &[".mkv"];

impl FileType {
    /// Classifies an entry by kind and file name.
    ///
    /// Directories win over any suffix. Suffixes are matched case-sensitively.
    /// Returns `None` for entries that should be left out of listings.
    pub fn classify(name: &str, is_dir: bool) -> Option<FileType> {
        if is_dir {
            return Some(FileType::Directory);
        }

        let has_suffix = |suffixes: &[&str]| suffixes.iter().any(|s| name.ends_with(s));

        if has_suffix(SUBTITLE_SUFFIXES) {
            Some(FileType::Subtitle)
        } else if has_suffix(AUDIO_SUFFIXES) {
            Some(FileType::Audio)
        } else if has_suffix(VIDEO_SUFFIXES) {
            Some(FileType::Video)
        } else {
            None
        }
    }

    /// Classifies an existing path, following symlinks.
    pub async fn detect(path: &Path) -> std::io::Result<Option<FileType>> {
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        Ok(Self::classify(&name, metadata.is_dir()))
    }
}

/// Strips the last `.`-delimited extension from a file name.
pub fn normalized_basename(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}
