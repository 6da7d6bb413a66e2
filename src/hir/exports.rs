//! Export resolution.
//!
//! Moves declarations between resources so that each one ends up owned by the
//! resource it is visible from. `export * from './b'` in `a` empties `b` into
//! `a`; `export { X as Y } from './b'` moves and renames a single declaration;
//! `export = Ns` drains a nested namespace into its parent.
//!
//! Targets are always resolved before anything is moved out of them, and each
//! stored resource is resolved at most once per pass. Re-export chains
//! therefore collapse onto their outermost resource, and cycles terminate.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::syntax::{Declaration, Export, Resource, SymbolSpecifier};

use super::keys::KeyResolver;
use super::store::ResourceStore;

/// The resource an export statement moves declarations into.
///
/// Stored resources are addressed by key so that the store can be borrowed
/// mutably while a target is resolved. Nested containers are taken out of
/// their parent for the duration of their resolution and addressed directly.
enum Sink<'r> {
    Stored(SmolStr),
    Detached(&'r mut Resource),
}

impl Sink<'_> {
    fn resource<'s>(&'s mut self, store: &'s mut ResourceStore) -> Option<&'s mut Resource> {
        match self {
            Sink::Stored(key) => store.get_mut(key),
            Sink::Detached(resource) => Some(&mut **resource),
        }
    }

    fn is_key(&self, key: &str) -> bool {
        matches!(self, Sink::Stored(own) if own == key)
    }
}

/// Resolves the exports of every resource in a store, in place.
pub struct ExportResolver<'k> {
    keys: &'k KeyResolver,
    processed: FxHashSet<SmolStr>,
}

impl<'k> ExportResolver<'k> {
    pub fn new(keys: &'k KeyResolver) -> Self {
        Self {
            keys,
            processed: FxHashSet::default(),
        }
    }

    /// Resolve all exports of `store` with a fresh resolver.
    pub fn resolve(keys: &KeyResolver, store: &mut ResourceStore) {
        ExportResolver::new(keys).resolve_store(store);
    }

    /// Filter every resource down to its exported declarations, then resolve
    /// the exports of each resource, longest key first.
    pub fn resolve_store(&mut self, store: &mut ResourceStore) {
        for (_, resource) in store.iter_mut() {
            resource.retain_exported();
        }

        // Length in UTF-16 units; the sort is stable, so ties keep insertion order.
        let mut order: Vec<SmolStr> = store.keys().cloned().collect();
        order.sort_by_key(|key| Reverse(key.encode_utf16().count()));

        for key in &order {
            self.resolve_key(store, key);
        }
    }

    /// Number of stored resources resolved so far.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    fn resolve_key(&mut self, store: &mut ResourceStore, key: &SmolStr) {
        if !self.processed.insert(key.clone()) {
            tracing::trace!(key = %key, "export target already resolved or on the current chain");
            return;
        }
        let Some(resource) = store.get(key) else {
            return;
        };
        let exports = resource.exports.clone();
        let file = resource.file_path().map(Path::to_path_buf);

        let mut sink = Sink::Stored(key.clone());
        for export in &exports {
            self.apply(store, &mut sink, file.as_deref(), export);
        }
    }

    fn resolve_detached(&mut self, store: &mut ResourceStore, resource: &mut Resource) {
        resource.retain_exported();
        let exports = resource.exports.clone();
        let file = resource.file_path().map(Path::to_path_buf);

        let mut sink = Sink::Detached(resource);
        for export in &exports {
            self.apply(store, &mut sink, file.as_deref(), export);
        }
    }

    fn apply(
        &mut self,
        store: &mut ResourceStore,
        sink: &mut Sink<'_>,
        file: Option<&Path>,
        export: &Export,
    ) {
        match export {
            Export::All { from, .. } => {
                let Some(target) = self.prepare_target(store, sink, file, from) else {
                    return;
                };
                let moved = store
                    .get_mut(&target)
                    .map(|resource| std::mem::take(&mut resource.declarations))
                    .unwrap_or_default();
                push_declarations(store, sink, moved);
            }
            Export::Named {
                from: Some(from),
                specifiers,
                ..
            } => {
                let Some(target) = self.prepare_target(store, sink, file, from) else {
                    return;
                };
                let moved = store
                    .get_mut(&target)
                    .map(|resource| take_specified(&mut resource.declarations, specifiers))
                    .unwrap_or_default();
                push_declarations(store, sink, moved);
            }
            Export::Named {
                from: None,
                specifiers,
                ..
            } => {
                if let Some(resource) = sink.resource(store) {
                    rename_specified(&mut resource.declarations, specifiers);
                }
            }
            Export::Assigned { identifier, .. } => {
                self.apply_assigned(store, sink, identifier);
            }
        }
    }

    /// Key the target of an `All`/`Named` export and resolve it. Returns
    /// `None` if the entry has to be skipped.
    fn prepare_target(
        &mut self,
        store: &mut ResourceStore,
        sink: &Sink<'_>,
        file: Option<&Path>,
        from: &str,
    ) -> Option<SmolStr> {
        let target = self.keys.export_target_key(file, from);
        if sink.is_key(&target) {
            tracing::trace!(key = %target, "skipping export of a resource into itself");
            return None;
        }
        if !store.contains(&target) {
            tracing::trace!(key = %target, specifier = from, "unresolved export target");
            return None;
        }
        self.resolve_key(store, &target);
        Some(target)
    }

    /// `export = identifier`: matching declarations are already marked
    /// exported by the filter; matching nested containers are resolved and
    /// drained into the sink.
    fn apply_assigned(&mut self, store: &mut ResourceStore, sink: &mut Sink<'_>, identifier: &str) {
        let Some(resource) = sink.resource(store) else {
            return;
        };
        if !resource
            .resources
            .iter()
            .any(|nested| nested.container_name().is_some_and(|name| name == identifier))
        {
            return;
        }
        let mut nested = std::mem::take(&mut resource.resources);

        let mut drained = Vec::new();
        for container in nested
            .iter_mut()
            .filter(|r| r.container_name().is_some_and(|name| name == identifier))
        {
            self.resolve_detached(store, container);
            drained.extend(container.take_visible_declarations());
        }

        if let Some(resource) = sink.resource(store) {
            resource.resources = nested;
            resource.declarations.extend(drained);
        }
    }
}

fn push_declarations(store: &mut ResourceStore, sink: &mut Sink<'_>, moved: Vec<Declaration>) {
    if moved.is_empty() {
        return;
    }
    if let Some(resource) = sink.resource(store) {
        resource.declarations.extend(moved);
    }
}

/// Remove the declarations named by `specifiers`, renamed to their exported
/// names. The first specifier naming a declaration wins.
fn take_specified(
    declarations: &mut Vec<Declaration>,
    specifiers: &[SymbolSpecifier],
) -> Vec<Declaration> {
    let mut moved = Vec::new();
    let mut kept = Vec::with_capacity(declarations.len());
    for mut declaration in std::mem::take(declarations) {
        match specifiers.iter().find(|s| s.specifier == declaration.name) {
            Some(specifier) => {
                declaration.name = specifier.exported_name().clone();
                moved.push(declaration);
            }
            None => kept.push(declaration),
        }
    }
    *declarations = kept;
    moved
}

fn rename_specified(declarations: &mut [Declaration], specifiers: &[SymbolSpecifier]) {
    for declaration in declarations {
        if let Some(specifier) = specifiers.iter().find(|s| s.specifier == declaration.name) {
            declaration.name = specifier.exported_name().clone();
        }
    }
}

/// Paths of every stored file whose `All`/`Named` exports point at one of
/// `targets`.
pub fn dependents_of(
    store: &ResourceStore,
    keys: &KeyResolver,
    targets: &FxHashSet<SmolStr>,
) -> Vec<PathBuf> {
    store
        .all()
        .filter_map(|resource| {
            let path = resource.file_path()?;
            let depends = resource.exports.iter().any(|export| {
                export
                    .source()
                    .is_some_and(|from| targets.contains(&keys.export_target_key(Some(path), from)))
            });
            depends.then(|| path.to_path_buf())
        })
        .collect()
}
