//! DeclarationIndex: owns the resource stores and the current reverse index.
//!
//! ## Usage
//!
//! ```ignore
//! let index = DeclarationIndex::new(parser, IndexConfig::new("/ws"))?;
//!
//! // Initial build over every source file of the project
//! index.build_index(&paths)?;
//!
//! // Incremental update from a watcher batch
//! let delta = index.reindex_for_changes(&FileChanges::new().with_updated("file:///ws/src/a.ts"))?;
//! for (name, entries) in &delta.added { /* ... */ }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use indexmap::IndexSet;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::hir::{
    DeclarationInfo, ExportResolver, IndexDelta, KeyResolver, ResourceStore, ReverseIndex,
    ReverseIndexBuilder, dependents_of,
};
use crate::project::{ConfigError, IndexConfig, ResourceParser};

use super::changes::{FileChanges, anchor_path};

/// Mutable state, swapped as a whole at the end of each operation.
#[derive(Default)]
struct IndexState {
    /// Resources exactly as the parser produced them
    parsed: ResourceStore,
    /// Output of the last export resolution
    resolved: ResourceStore,
    /// Current reverse index, absent until the first build
    index: Option<Arc<ReverseIndex>>,
}

/// Releases the build flag when dropped, including on error or panic.
struct BuildGuard<'a>(&'a AtomicBool);

impl<'a> BuildGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Index of every exported declaration of a project, kept up to date from
/// file changes.
///
/// The parsed store is never resolved in place. Each build or reindex
/// resolves a fresh copy of it, so the result never depends on declarations
/// moved by an earlier pass. Readers see the previous index until an
/// operation completes.
///
/// `build_index` drops a call made while another build is running.
/// `reindex_for_changes` has no such guard; callers serialize it.
pub struct DeclarationIndex<P> {
    parser: P,
    config: IndexConfig,
    keys: KeyResolver,
    building: AtomicBool,
    state: RwLock<IndexState>,
}

impl<P: ResourceParser> DeclarationIndex<P> {
    /// Create an empty index. Fails if `config` does not validate.
    pub fn new(parser: P, config: IndexConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let keys = config.key_resolver();
        Ok(Self {
            parser,
            config,
            keys,
            building: AtomicBool::new(false),
            state: RwLock::new(IndexState::default()),
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn key_resolver(&self) -> &KeyResolver {
        &self.keys
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Whether a build is currently running.
    pub fn is_building(&self) -> bool {
        self.building.load(Ordering::Acquire)
    }

    /// Parse `paths` and rebuild the index from scratch.
    ///
    /// Returns `Ok(false)` without doing anything if another build is
    /// running. Parser errors are returned unchanged and leave the previous
    /// index in place.
    pub fn build_index(&self, paths: &[PathBuf]) -> Result<bool, P::Error> {
        let Some(_guard) = BuildGuard::acquire(&self.building) else {
            tracing::debug!(files = paths.len(), "build already in progress, dropping request");
            return Ok(false);
        };
        let start = Instant::now();

        let root = self.config.root();
        let paths: Vec<PathBuf> = paths
            .iter()
            .map(|path| anchor_path(&path.to_string_lossy(), root))
            .collect();
        let resources = self.parser.parse_files(&paths, root)?;

        let mut parsed = ResourceStore::new();
        for resource in resources {
            parsed.add_file(resource, &self.keys);
        }
        let (resolved, index) = self.resolve(&parsed);

        tracing::info!(
            "build_index: {} files, {} resources, {} names in {:?}",
            paths.len(),
            parsed.len(),
            index.len(),
            start.elapsed()
        );

        let mut state = self.state.write();
        state.parsed = parsed;
        state.resolved = resolved;
        state.index = Some(Arc::new(index));
        Ok(true)
    }

    /// Apply a batch of file changes and return what changed in the index.
    ///
    /// Besides the listed files, every stored file that re-exports from a
    /// changed or deleted resource is reparsed. Resolution then runs over the
    /// whole store and the new index is diffed against the previous one.
    pub fn reindex_for_changes(&self, changes: &FileChanges) -> Result<IndexDelta, P::Error> {
        let start = Instant::now();
        let root = self.config.root();
        let changed = changes.changed_paths(root);
        let deleted = changes.deleted_paths(root);

        let (mut parsed, previous) = {
            let state = self.state.read();
            (state.parsed.clone(), state.index.clone())
        };

        let mut marked: FxHashSet<SmolStr> = FxHashSet::default();
        for path in deleted.iter().chain(&changed) {
            marked.extend(self.keys.file_key(path));
            marked.extend(parsed.keys_for_file(path).iter().cloned());
        }

        let mut reparse: IndexSet<PathBuf> = changed.iter().cloned().collect();
        let dependents = dependents_of(&parsed, &self.keys, &marked);
        reparse.extend(dependents);
        reparse.retain(|path| !deleted.contains(path));

        tracing::debug!(
            changed = changed.len(),
            deleted = deleted.len(),
            reparse = reparse.len(),
            "scheduling reparse"
        );

        let reparse: Vec<PathBuf> = reparse.into_iter().collect();
        let resources = if reparse.is_empty() {
            Vec::new()
        } else {
            self.parser.parse_files(&reparse, root)?
        };

        for path in &deleted {
            remove_deleted(&mut parsed, &self.keys, path);
        }
        for resource in resources {
            parsed.add_file(resource, &self.keys);
        }

        let (resolved, index) = self.resolve(&parsed);
        let delta = match &previous {
            Some(previous) => IndexDelta::calculate(previous, &index),
            None => IndexDelta::calculate(&ReverseIndex::new(), &index),
        };

        tracing::info!(
            "reindex_for_changes: {} reparsed, {} deleted, +{} ~{} -{} in {:?}",
            reparse.len(),
            deleted.len(),
            delta.added.len(),
            delta.updated.len(),
            delta.deleted.len(),
            start.elapsed()
        );

        let mut state = self.state.write();
        state.parsed = parsed;
        state.resolved = resolved;
        state.index = Some(Arc::new(index));
        Ok(delta)
    }

    /// Drop all resources and the index.
    pub fn reset(&self) {
        let mut state = self.state.write();
        *state = IndexState::default();
    }

    /// Whether a first build has completed.
    pub fn index_ready(&self) -> bool {
        self.state.read().index.is_some()
    }

    /// Snapshot of the current index.
    pub fn index(&self) -> Option<Arc<ReverseIndex>> {
        self.state.read().index.clone()
    }

    /// Every entry of the current index, ordered by declaration name.
    pub fn declaration_infos(&self) -> Vec<DeclarationInfo> {
        self.index()
            .map(|index| index.declaration_infos())
            .unwrap_or_default()
    }

    /// The store as it was after the last export resolution.
    pub fn resolved_store(&self) -> MappedRwLockReadGuard<'_, ResourceStore> {
        RwLockReadGuard::map(self.state.read(), |state| &state.resolved)
    }

    /// The store as the parser produced it.
    pub fn parsed_store(&self) -> MappedRwLockReadGuard<'_, ResourceStore> {
        RwLockReadGuard::map(self.state.read(), |state| &state.parsed)
    }

    fn resolve(&self, parsed: &ResourceStore) -> (ResourceStore, ReverseIndex) {
        let mut resolved = parsed.clone();
        let mut resolver = ExportResolver::new(&self.keys);
        resolver.resolve_store(&mut resolved);
        let index = ReverseIndexBuilder::build(&resolved);

        tracing::debug!(
            resources = resolved.len(),
            resolved = resolver.processed_count(),
            names = index.len(),
            entries = index.entry_count(),
            "exports resolved"
        );
        (resolved, index)
    }
}

/// Remove a deleted file: every key it produced, plus its computed key if no
/// other file owns that key.
fn remove_deleted(store: &mut ResourceStore, keys: &KeyResolver, path: &Path) {
    store.remove_file(path);
    if let Some(key) = keys.file_key(path) {
        if store.source_of(&key).is_none_or(|source| source == path) {
            store.remove(&key);
        }
    }
}
