//! Name → declarations index over a resolved store.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::syntax::{Declaration, DeclarationKind};

use super::keys::index_origin;
use super::store::ResourceStore;

/// A declaration together with the key of the resource it can be imported
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclarationInfo {
    pub declaration: Declaration,
    pub from: SmolStr,
}

impl DeclarationInfo {
    pub fn new(declaration: Declaration, from: impl Into<SmolStr>) -> Self {
        Self {
            declaration,
            from: from.into(),
        }
    }

    pub fn name(&self) -> &SmolStr {
        &self.declaration.name
    }

    pub fn kind(&self) -> DeclarationKind {
        self.declaration.kind
    }
}

/// Mapping from declaration name to every declaration of that name.
///
/// Within one name, no two entries share both kind and origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReverseIndex {
    entries: IndexMap<SmolStr, Vec<DeclarationInfo>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[DeclarationInfo]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Vec<DeclarationInfo>)> {
        self.entries.iter()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries across all names.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Every entry, ordered by declaration name.
    pub fn declaration_infos(&self) -> Vec<DeclarationInfo> {
        let mut names: Vec<&SmolStr> = self.entries.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.entries.get(name))
            .flatten()
            .cloned()
            .collect()
    }

    /// Add an entry unless one with the same kind and origin already exists
    /// under `name`. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<SmolStr>, info: DeclarationInfo) -> bool {
        let list = self.entries.entry(name.into()).or_default();
        if list
            .iter()
            .any(|existing| existing.kind() == info.kind() && existing.from == info.from)
        {
            return false;
        }
        list.push(info);
        true
    }
}

impl FromIterator<(SmolStr, Vec<DeclarationInfo>)> for ReverseIndex {
    fn from_iter<T: IntoIterator<Item = (SmolStr, Vec<DeclarationInfo>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ReverseIndex {
    type Item = (&'a SmolStr, &'a Vec<DeclarationInfo>);
    type IntoIter = indexmap::map::Iter<'a, SmolStr, Vec<DeclarationInfo>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds a [`ReverseIndex`] from a resolved store.
pub struct ReverseIndexBuilder;

impl ReverseIndexBuilder {
    /// Index every resource of `store`.
    ///
    /// Module and namespace resources contribute a module-alias entry under
    /// their own name. Every owned declaration is indexed under its name with
    /// the resource key as origin; barrel keys (`/x/index`) are trimmed to
    /// their directory.
    pub fn build(store: &ResourceStore) -> ReverseIndex {
        let mut index = ReverseIndex::new();
        let mut dropped = 0usize;

        for (key, resource) in store.iter() {
            if let (Some(name), Some(alias)) = (resource.container_name(), resource.namespace_alias())
            {
                let declaration = Declaration::module_alias(alias, resource.span);
                index.insert(name.clone(), DeclarationInfo::new(declaration, key.clone()));
            }

            let origin = index_origin(key);
            for declaration in &resource.declarations {
                let info = DeclarationInfo::new(declaration.clone(), origin.clone());
                if !index.insert(declaration.name.clone(), info) {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::trace!(dropped, "duplicate declaration entries dropped");
        }
        index
    }
}
