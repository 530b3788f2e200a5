//! Resolution of root-relative paths.

use std::path::{Component, Path, PathBuf};

use super::error::ResolveError;
use crate::config::LibraryConfig;

/// Resolves caller supplied relative paths against a fixed library root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    confine_to_root: bool,
}

impl PathResolver {
    /// Creates a resolver that rejects paths escaping `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            confine_to_root: true,
        }
    }

    /// Enables or disables the root containment check.
    pub fn with_confinement(mut self, confine_to_root: bool) -> Self {
        self.confine_to_root = confine_to_root;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `relative` onto the root without touching the filesystem.
    ///
    /// Leading separators are dropped so the result always sits under the root.
    pub fn join(&self, relative: &str) -> PathBuf {
        let relative = Path::new(relative);
        let mut joined = self.root.clone();
        for component in relative.components() {
            match component {
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
                other => joined.push(other.as_os_str()),
            }
        }
        joined
    }

    /// Resolves `relative` to an existing absolute path.
    pub async fn resolve(&self, relative: &str) -> Result<PathBuf, ResolveError> {
        let path = self.join(relative);

        if !tokio::fs::try_exists(&path).await? {
            return Err(ResolveError::NotFound { path });
        }

        if self.confine_to_root {
            let root = tokio::fs::canonicalize(&self.root).await?;
            let canonical = tokio::fs::canonicalize(&path).await?;
            if !canonical.starts_with(&root) {
                return Err(ResolveError::OutsideRoot { path });
            }
        }

        Ok(path)
    }
}

impl From<&LibraryConfig> for PathResolver {
    fn from(config: &LibraryConfig) -> Self {
        PathResolver::new(&config.root).with_confinement(config.confine_to_root)
    }
}
