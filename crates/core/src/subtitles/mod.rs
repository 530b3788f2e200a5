//! Subtitles module exposing parsed cue lists.
//!
//! Parsing itself is done by the `subparse` crate; this module resolves the
//! file, picks the parser by extension and flattens the result into [`Cue`]s
//! with plain display text.

mod error;
mod reader;
mod types;

pub use error::SubtitleError;
pub use reader::SubtitleReader;
pub use types::{Cue, SubtitleFormat};
