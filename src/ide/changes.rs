//! File-change batches fed to the index.

use std::path::{Path, PathBuf};

use crate::base::{join_path, normalize_path_uri};

/// A batch of file changes, as reported by an editor or file watcher.
///
/// Entries may be `file://` URIs (percent-encoded) or plain paths; relative
/// paths are taken relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileChanges {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
}

impl FileChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_created(mut self, uri: impl Into<String>) -> Self {
        self.created.push(uri.into());
        self
    }

    pub fn with_updated(mut self, uri: impl Into<String>) -> Self {
        self.updated.push(uri.into());
        self
    }

    pub fn with_deleted(mut self, uri: impl Into<String>) -> Self {
        self.deleted.push(uri.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Created and updated entries as normalized paths, in order, without
    /// duplicates.
    pub fn changed_paths(&self, root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for uri in self.created.iter().chain(&self.updated) {
            let path = resolve_uri(uri, root);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Deleted entries as normalized paths.
    pub fn deleted_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.deleted.iter().map(|uri| resolve_uri(uri, root)).collect()
    }
}

/// Strip the scheme and decode escapes, then anchor the path at `root`.
fn resolve_uri(uri: &str, root: &Path) -> PathBuf {
    anchor_path(&normalize_path_uri(uri), root)
}

/// Normalize `path`, joining it onto `root` if it is relative.
pub(crate) fn anchor_path(path: &str, root: &Path) -> PathBuf {
    PathBuf::from(join_path(&root.to_string_lossy(), path))
}
