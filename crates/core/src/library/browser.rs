//! Directory listing with basename grouping.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use super::classifier::normalized_basename;
use super::error::LibraryError;
use super::resolver::PathResolver;
use super::types::{ClassifiedEntry, DirectoryItem, FileType, Item, MediaItem};

/// Lists library directories as grouped [`Item`]s.
#[derive(Debug, Clone)]
pub struct MediaBrowser {
    resolver: PathResolver,
}

impl MediaBrowser {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Lists the direct children of `directory_path`, grouped by normalized basename.
    ///
    /// Files sharing a basename collapse into one [`MediaItem`]; a directory with the
    /// same basename is reported separately as a [`DirectoryItem`]. The result is
    /// sorted by name.
    pub async fn list(&self, directory_path: &str) -> Result<Vec<Item>, LibraryError> {
        let directory = self.resolver.resolve(directory_path).await?;

        if !tokio::fs::metadata(&directory).await?.is_dir() {
            return Err(LibraryError::NotADirectory { path: directory });
        }

        let mut names = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&directory).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 entry {:?} in {:?}", name, directory),
            }
        }
        // Enumeration order is platform dependent; sort so "first of a type" is stable.
        names.sort();

        let relative_dir = directory_path.trim_start_matches(['/', '\\']);
        let mut groups: BTreeMap<String, Vec<ClassifiedEntry>> = BTreeMap::new();

        for name in names {
            let Some(file_type) = classify_child(&directory.join(&name), &name).await else {
                continue;
            };

            let path = Path::new(relative_dir).join(&name).to_string_lossy().into_owned();
            groups
                .entry(normalized_basename(&name).to_string())
                .or_default()
                .push(ClassifiedEntry {
                    name,
                    path,
                    file_type,
                });
        }

        let mut items: Vec<Item> = groups
            .into_iter()
            .flat_map(|(key, entries)| group_items(key, entries))
            .collect();
        items.sort_by(|a, b| a.name().cmp(b.name()));

        debug!("Listed {:?}: {} items", directory, items.len());
        Ok(items)
    }
}

async fn classify_child(path: &Path, name: &str) -> Option<FileType> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => FileType::classify(name, metadata.is_dir()),
        Err(e) => {
            debug!("Skipping unreadable entry {:?}: {}", path, e);
            None
        }
    }
}

/// Builds the zero, one or two items a basename group produces.
fn group_items(name: String, entries: Vec<ClassifiedEntry>) -> Vec<Item> {
    let first_of = |file_type: FileType| entries.iter().find(|e| e.file_type == file_type).cloned();

    let mut items = Vec::with_capacity(2);

    let audio_file = first_of(FileType::Audio);
    let video_file = first_of(FileType::Video);
    let subtitle_file = first_of(FileType::Subtitle);

    if audio_file.is_some() || video_file.is_some() || subtitle_file.is_some() {
        items.push(Item::Media(MediaItem {
            name: name.clone(),
            audio_file,
            video_file,
            subtitle_file,
        }));
    }

    if let Some(dir) = first_of(FileType::Directory) {
        items.push(Item::Directory(DirectoryItem {
            name,
            path: dir.path,
        }));
    }

    items
}
