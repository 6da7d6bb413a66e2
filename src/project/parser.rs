//! Contract with the component that turns source files into resources.

use std::path::{Path, PathBuf};

use crate::syntax::Resource;

/// Parses source files into [`Resource`] trees.
///
/// Implementations return one `File` resource per requested path, holding
/// every declaration of the file (exported or not), its export and import
/// statements, the identifiers it uses, and nested module/namespace
/// containers. Errors are handed back to the caller of the index unchanged.
pub trait ResourceParser {
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse_files(&self, paths: &[PathBuf], root: &Path) -> Result<Vec<Resource>, Self::Error>;
}

impl<P: ResourceParser + ?Sized> ResourceParser for &P {
    type Error = P::Error;

    fn parse_files(&self, paths: &[PathBuf], root: &Path) -> Result<Vec<Resource>, Self::Error> {
        (**self).parse_files(paths, root)
    }
}

impl<P: ResourceParser + ?Sized> ResourceParser for std::sync::Arc<P> {
    type Error = P::Error;

    fn parse_files(&self, paths: &[PathBuf], root: &Path) -> Result<Vec<Resource>, Self::Error> {
        (**self).parse_files(paths, root)
    }
}
