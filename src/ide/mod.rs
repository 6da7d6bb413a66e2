//! Index host: the API consumers talk to.
//!
//! [`DeclarationIndex`] owns all mutable state: the parsed and resolved
//! resource stores and the current reverse index. It is driven by a full
//! [`build_index`](DeclarationIndex::build_index) followed by incremental
//! [`reindex_for_changes`](DeclarationIndex::reindex_for_changes) calls, each
//! of which returns an [`IndexDelta`](crate::hir::IndexDelta).

mod changes;
mod declaration_index;

pub use changes::FileChanges;
pub use declaration_index::DeclarationIndex;
