//! Library module for browsing a media root.
//!
//! Directory entries are classified by kind and file suffix, then grouped by
//! their normalized basename so that `ep1.mkv`, `ep1.mp3` and `ep1.ass` show
//! up as a single media item.
//!
//! # Example
//!
//! ```ignore
//! use mediashelf_core::library::{MediaBrowser, PathResolver};
//!
//! let browser = MediaBrowser::new(PathResolver::new("/media"));
//! for item in browser.list("shows/season1").await? {
//!     println!("{}", item.name());
//! }
//! ```

mod browser;
mod classifier;
mod error;
mod resolver;
mod types;

pub use browser::MediaBrowser;
pub use classifier::normalized_basename;
pub use error::{LibraryError, ResolveError};
pub use resolver::PathResolver;
pub use types::{ClassifiedEntry, DirectoryItem, FileType, Item, MediaItem};
