//! Foundation types for the declaration index.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Span`] - Byte ranges of parsed nodes
//! - Path and URI normalization used by canonical keys
//! - Default marker constants (package directory, typings directories)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
pub mod paths;
mod position;

pub use paths::{
    join_path, normalize_filename, normalize_path_uri, normalize_segments, parent_dir,
    percent_decode, relative_path, strip_source_extension, to_posix,
};
pub use position::Span;
