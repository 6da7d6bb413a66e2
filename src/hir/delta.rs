//! Differences between two reverse indices.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::reverse_index::{DeclarationInfo, ReverseIndex};

/// What changed between two reverse indices.
///
/// `updated` holds the complete new list for a name, not a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexDelta {
    pub added: IndexMap<SmolStr, Vec<DeclarationInfo>>,
    pub updated: IndexMap<SmolStr, Vec<DeclarationInfo>>,
    pub deleted: Vec<SmolStr>,
}

impl IndexDelta {
    /// Diff `old` against `new`.
    ///
    /// A name present in both is updated when either list holds an entry the
    /// other does not; ordering and multiplicity within a list are ignored.
    pub fn calculate(old: &ReverseIndex, new: &ReverseIndex) -> Self {
        let mut delta = IndexDelta::default();

        for (name, entries) in new {
            match old.get(name) {
                None => {
                    delta.added.insert(name.clone(), entries.clone());
                }
                Some(previous) => {
                    if lists_differ(previous, entries) {
                        delta.updated.insert(name.clone(), entries.clone());
                    }
                }
            }
        }

        delta.deleted = old
            .names()
            .filter(|name| !new.contains(name))
            .cloned()
            .collect();

        delta
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Number of names touched by this delta.
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.deleted.len()
    }
}

/// Diff two indices. See [`IndexDelta::calculate`].
pub fn calculate_delta(old: &ReverseIndex, new: &ReverseIndex) -> IndexDelta {
    IndexDelta::calculate(old, new)
}

fn lists_differ(old: &[DeclarationInfo], new: &[DeclarationInfo]) -> bool {
    old.iter().any(|info| !new.contains(info)) || new.iter().any(|info| !old.contains(info))
}
