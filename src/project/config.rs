//! Index configuration.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::constants::{PACKAGE_DIR, TYPES_SCOPE, TYPINGS_DIRS};
use crate::hir::KeyResolver;

/// Errors from validating an [`IndexConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The project root is empty.
    #[error("project root is empty")]
    EmptyRoot,

    /// The project root is not an absolute path.
    #[error("project root must be absolute: {}", .0.display())]
    RelativeRoot(PathBuf),

    /// A marker directory name is empty.
    #[error("{0} must not be empty")]
    EmptyMarker(&'static str),
}

/// Where the project lives and which directories mark typings and packages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexConfig {
    /// Project root; workspace keys are relative to it
    pub root: PathBuf,
    /// Directory names whose files hold ambient declarations
    pub typings_dirs: Vec<SmolStr>,
    /// Directory holding installed packages
    pub package_dir: SmolStr,
    /// Scope inside `package_dir` holding type-declaration packages
    pub types_scope: SmolStr,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            typings_dirs: TYPINGS_DIRS.iter().map(|dir| SmolStr::new(dir)).collect(),
            package_dir: SmolStr::new(PACKAGE_DIR),
            types_scope: SmolStr::new(TYPES_SCOPE),
        }
    }
}

impl IndexConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_typings_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.typings_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_package_dir(mut self, dir: impl Into<SmolStr>) -> Self {
        self.package_dir = dir.into();
        self
    }

    pub fn with_types_scope(mut self, scope: impl Into<SmolStr>) -> Self {
        self.types_scope = scope.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check that the root is absolute and no marker is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRoot);
        }
        if !is_absolute_root(&self.root) {
            return Err(ConfigError::RelativeRoot(self.root.clone()));
        }
        if self.package_dir.is_empty() {
            return Err(ConfigError::EmptyMarker("package directory"));
        }
        if self.types_scope.is_empty() {
            return Err(ConfigError::EmptyMarker("types scope"));
        }
        if self.typings_dirs.iter().any(SmolStr::is_empty) {
            return Err(ConfigError::EmptyMarker("typings directory"));
        }
        Ok(())
    }

    /// Key resolver for this configuration.
    pub fn key_resolver(&self) -> KeyResolver {
        KeyResolver::new(&self.root)
            .with_typings_dirs(self.typings_dirs.iter().cloned())
            .with_package_dir(self.package_dir.clone())
            .with_types_scope(self.types_scope.clone())
    }
}

/// `Path::is_absolute` is platform dependent; a `/`-rooted path counts as
/// absolute everywhere so that keys stay portable.
fn is_absolute_root(root: &Path) -> bool {
    root.is_absolute() || crate::base::paths::is_absolute(&root.to_string_lossy())
}
