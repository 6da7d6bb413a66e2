//! Resolved model: canonical keys, resource storage, export resolution and
//! the reverse index.
//!
//! ## Key Types
//!
//! - [`KeyResolver`] - Derives canonical keys from paths and export specifiers
//! - [`ResourceStore`] - Resources by canonical key, with per-file bookkeeping
//! - [`ExportResolver`] - Moves declarations along re-export chains
//! - [`ReverseIndexBuilder`] - Builds the name → declarations index
//! - [`IndexDelta`] - Difference between two reverse indices
//!
//! ## Pipeline
//!
//! ```text
//! parsed resources
//!     │
//!     ▼
//! ResourceStore::add_file     ← keyed by workspace / package / typings rules
//!     │
//!     ▼
//! ExportResolver::resolve     ← exported-only filter, then ownership transfer
//!     │
//!     ▼
//! ReverseIndexBuilder::build  ← name → [(declaration, origin)]
//!     │
//!     ▼
//! IndexDelta::calculate       ← against the previous index
//! ```

mod delta;
mod exports;
mod keys;
mod reverse_index;
mod store;

pub use delta::{IndexDelta, calculate_delta};
pub use exports::{ExportResolver, dependents_of};
pub use keys::{KeyResolver, ResourceClass, index_origin};
pub use reverse_index::{DeclarationInfo, ReverseIndex, ReverseIndexBuilder};
pub use store::ResourceStore;
