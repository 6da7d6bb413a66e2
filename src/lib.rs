//! # declaration-index
//!
//! Incremental reverse index of exported declarations across a source tree,
//! with re-export chain resolution.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → DeclarationIndex host, FileChanges
//!   ↓
//! project   → ResourceParser contract, IndexConfig
//!   ↓
//! hir       → Canonical keys, ResourceStore, export resolution, reverse index, deltas
//!   ↓
//! syntax    → Resource / Declaration / Export / Import data model
//!   ↓
//! base      → Primitives (Span, path and URI normalization)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → hir → project → ide)
// ============================================================================

/// Foundation types: Span, path helpers, marker constants
pub mod base;

/// Syntax: resources and declarations as handed over by the parser
pub mod syntax;

/// Resolved model: keys, store, export resolution, reverse index
pub mod hir;

/// Project: parser contract and configuration
pub mod project;

/// Index host: build, reindex and query
pub mod ide;

// Re-export the types most callers need
pub use base::Span;
pub use hir::{DeclarationInfo, IndexDelta, ReverseIndex};
pub use ide::{DeclarationIndex, FileChanges};
pub use project::{ConfigError, IndexConfig, ResourceParser};
pub use syntax::{Declaration, DeclarationKind, Export, Resource, ResourceKind, SymbolSpecifier};
