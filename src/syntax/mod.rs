//! Syntax-derived data model handed over by the parser.
//!
//! A parser turns every source file into a [`Resource`] tree: the file's
//! declarations (exported or not), its export and import statements, the free
//! identifiers it uses, and nested module/namespace containers. This module
//! only defines those types; producing them is the job of a
//! [`ResourceParser`](crate::project::ResourceParser).

mod declaration;
mod export;
mod import;
mod resource;

pub use declaration::{Declaration, DeclarationKind};
pub use export::{Export, SymbolSpecifier};
pub use import::Import;
pub use resource::{Resource, ResourceKind, namespace_alias};
