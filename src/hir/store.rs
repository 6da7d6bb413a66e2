//! Keyed storage of parsed resources.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::syntax::Resource;

use super::keys::{KeyResolver, ResourceClass};

/// All resources known to the index, by canonical key.
///
/// Keys are kept in insertion order so that every pass over the store is
/// deterministic. Each key also remembers the source file it came from, which
/// lets a changed or deleted file drop exactly the keys it produced (a typings
/// file produces one key per declared module).
#[derive(Clone, Debug, Default)]
pub struct ResourceStore {
    /// The single source of truth for resources.
    resources: IndexMap<SmolStr, Resource>,
    /// Source file -> keys it produced.
    by_source: FxHashMap<PathBuf, Vec<SmolStr>>,
    /// Key -> source file it came from.
    source_of: FxHashMap<SmolStr, PathBuf>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed file, replacing anything previously produced by the same
    /// path. Returns the keys the file was stored under.
    ///
    /// Typings files contribute their nested modules (each under its own
    /// name) and nothing else. Package files are stored under their library
    /// name, workspace files under their root-relative key. A top-level
    /// container is stored under its own name.
    pub fn add_file(&mut self, file: Resource, keys: &KeyResolver) -> Vec<SmolStr> {
        let Some(path) = file.file_path().map(Path::to_path_buf) else {
            let Some(name) = file.container_name().cloned() else {
                return Vec::new();
            };
            self.upsert(name.clone(), file);
            return vec![name];
        };

        self.remove_file(&path);

        let path_str = path.to_string_lossy();
        let entries: Vec<(SmolStr, Resource)> = match keys.classify(&path_str) {
            ResourceClass::Typings => file
                .resources
                .into_iter()
                .filter_map(|nested| nested.container_name().cloned().map(|name| (name, nested)))
                .collect(),
            ResourceClass::Package | ResourceClass::Workspace => match keys.file_key(&path) {
                Some(key) => vec![(key, file)],
                None => Vec::new(),
            },
        };

        let mut added = Vec::with_capacity(entries.len());
        for (key, resource) in entries {
            self.insert_sourced(key.clone(), resource, &path);
            added.push(key);
        }
        added
    }

    /// Insert or overwrite a resource. The key loses any source attribution.
    pub fn upsert(&mut self, key: impl Into<SmolStr>, resource: Resource) {
        let key = key.into();
        self.detach_source(&key);
        self.resources.insert(key, resource);
    }

    /// Remove a resource by key.
    pub fn remove(&mut self, key: &str) -> Option<Resource> {
        self.detach_source(key);
        self.resources.shift_remove(key)
    }

    /// Remove every resource produced by `path`. Returns the removed keys.
    pub fn remove_file(&mut self, path: &Path) -> Vec<SmolStr> {
        let Some(keys) = self.by_source.remove(path) else {
            return Vec::new();
        };
        for key in &keys {
            self.source_of.remove(key);
            self.resources.shift_remove(key);
        }
        keys
    }

    pub fn get(&self, key: &str) -> Option<&Resource> {
        self.resources.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Resource> {
        self.resources.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Keys produced by `path`, in the order they were added.
    pub fn keys_for_file(&self, path: &Path) -> &[SmolStr] {
        self.by_source.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Source file a key was produced from, if it came from `add_file`.
    pub fn source_of(&self, key: &str) -> Option<&Path> {
        self.source_of.get(key).map(PathBuf::as_path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SmolStr> {
        self.resources.keys()
    }

    /// All resources with their keys, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Resource)> {
        self.resources.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&SmolStr, &mut Resource)> {
        self.resources.iter_mut()
    }

    /// All resources, in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn clear(&mut self) {
        self.resources.clear();
        self.by_source.clear();
        self.source_of.clear();
    }

    fn insert_sourced(&mut self, key: SmolStr, resource: Resource, path: &Path) {
        self.detach_source(&key);
        self.by_source
            .entry(path.to_path_buf())
            .or_default()
            .push(key.clone());
        self.source_of.insert(key.clone(), path.to_path_buf());
        self.resources.insert(key, resource);
    }

    fn detach_source(&mut self, key: &str) {
        let Some(previous) = self.source_of.remove(key) else {
            return;
        };
        if let Some(list) = self.by_source.get_mut(&previous) {
            list.retain(|k| k != key);
            if list.is_empty() {
                self.by_source.remove(&previous);
            }
        }
    }
}
