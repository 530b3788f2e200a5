//! Subtitle reader backed by `subparse`.

use regex_lite::Regex;
use std::path::Path;
use subparse::{SrtFile, SsaFile, SubtitleEntry, SubtitleFileInterface};
use tracing::debug;

use super::error::SubtitleError;
use super::types::{Cue, SubtitleFormat};
use crate::library::PathResolver;

/// Reads subtitle files from the library as uniform cue lists.
pub struct SubtitleReader {
    resolver: PathResolver,
    markup_tag: Option<Regex>,
    ass_override: Option<Regex>,
    ass_newline: Option<Regex>,
    ass_hard_space: Option<Regex>,
}

impl SubtitleReader {
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            markup_tag: Regex::new(r"</?[^>]*>").ok(),
            ass_override: Regex::new(r"\{[^}]*\}").ok(),
            ass_newline: Regex::new(r"\\[nN]").ok(),
            ass_hard_space: Regex::new(r"\\h").ok(),
        }
    }

    /// Parses the subtitle file at `path` (relative to the library root).
    ///
    /// Cues are returned ordered by start time.
    pub async fn cues(&self, path: &str) -> Result<Vec<Cue>, SubtitleError> {
        let resolved = self.resolver.resolve(path).await?;
        let format = SubtitleFormat::from_path(&resolved).ok_or_else(|| {
            SubtitleError::UnsupportedFormat {
                path: resolved.clone(),
            }
        })?;

        let bytes = tokio::fs::read(&resolved)
            .await
            .map_err(|e| SubtitleError::parse_failed(&resolved, e.to_string()))?;
        let content = String::from_utf8_lossy(&bytes);
        let content = content.trim_start_matches('\u{feff}');

        let cues = self.parse(format, content, &resolved)?;
        debug!("Parsed {} cues from {:?}", cues.len(), resolved);
        Ok(cues)
    }

    /// Parses already loaded subtitle text.
    pub fn parse(
        &self,
        format: SubtitleFormat,
        content: &str,
        path: &Path,
    ) -> Result<Vec<Cue>, SubtitleError> {
        let entries = parse_entries(format, content)
            .map_err(|reason| SubtitleError::parse_failed(path, reason))?;

        let mut cues: Vec<Cue> = entries
            .into_iter()
            .map(|entry| Cue {
                text: self.clean_text(format, entry.line.as_deref().unwrap_or_default()),
                start_ms: entry.timespan.start.msecs(),
                end_ms: entry.timespan.end.msecs(),
            })
            .collect();
        cues.sort_by_key(|cue| cue.start_ms);

        Ok(cues)
    }

    /// Strips format specific markup from a cue's text.
    fn clean_text(&self, format: SubtitleFormat, text: &str) -> String {
        let replace = |re: &Option<Regex>, text: String, with: &str| match re {
            Some(re) => re.replace_all(&text, with).into_owned(),
            None => text,
        };

        let text = text.to_string();
        match format {
            SubtitleFormat::Srt => replace(&self.markup_tag, text, ""),
            SubtitleFormat::Ass => {
                let text = replace(&self.ass_override, text, "");
                let text = replace(&self.ass_newline, text, "\n");
                replace(&self.ass_hard_space, text, " ")
            }
        }
    }
}

fn parse_entries(format: SubtitleFormat, content: &str) -> Result<Vec<SubtitleEntry>, String> {
    let entries = match format {
        SubtitleFormat::Srt => SrtFile::parse(content).and_then(|f| f.get_subtitle_entries()),
        SubtitleFormat::Ass => SsaFile::parse(content).and_then(|f| f.get_subtitle_entries()),
    };
    entries.map_err(|e| e.to_string())
}
