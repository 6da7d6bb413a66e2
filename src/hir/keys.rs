//! Canonical key derivation.
//!
//! A resource is stored under a key that depends on where its file lives:
//!
//! ```text
//! <root>/src/app/main.ts                    → /src/app/main        (workspace)
//! <root>/node_modules/lodash/lodash.js      → lodash               (package)
//! <root>/node_modules/@types/node/index.d.ts → one key per `declare module`
//! <root>/typings/globals.d.ts               → one key per `declare module`
//! ```
//!
//! Export targets are keyed with the same rules, so that `export * from
//! './main'` inside `/src/app/index.ts` finds `/src/app/main`.

use std::path::Path;

use smol_str::SmolStr;

use crate::base::constants::{INDEX_SEGMENT, PACKAGE_DIR, TYPES_SCOPE, TYPINGS_DIRS};
use crate::base::paths::segments;
use crate::base::{join_path, normalize_filename, normalize_segments, parent_dir, relative_path};

/// Where a file lives, which decides how it is keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    /// Part of the project itself
    Workspace,
    /// Ambient declarations; keyed by the names of the modules it declares
    Typings,
    /// A file inside an installed package
    Package,
}

/// Derives canonical keys from file paths and export specifiers.
///
/// All derivation is lexical; nothing here touches the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolver {
    root: String,
    typings_dirs: Vec<SmolStr>,
    package_dir: SmolStr,
    types_scope: SmolStr,
}

impl KeyResolver {
    /// Resolver for `root` with the default markers.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize_segments(&root.as_ref().to_string_lossy()),
            typings_dirs: TYPINGS_DIRS.iter().map(|dir| SmolStr::new(dir)).collect(),
            package_dir: SmolStr::new(PACKAGE_DIR),
            types_scope: SmolStr::new(TYPES_SCOPE),
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

    /// Normalized project root (forward slashes, no trailing separator).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Classify a file by its path segments.
    ///
    /// Typings win over packages, so `node_modules/@types/x` is ambient.
    pub fn classify(&self, path: &str) -> ResourceClass {
        let normalized = normalize_segments(path);
        let parts: Vec<&str> = segments(&normalized).collect();

        let in_typings_dir = parts
            .iter()
            .any(|part| self.typings_dirs.iter().any(|dir| dir == part));
        let in_types_scope = parts
            .windows(2)
            .any(|pair| self.package_dir == pair[0] && self.types_scope == pair[1]);

        if in_typings_dir || in_types_scope {
            ResourceClass::Typings
        } else if parts.iter().any(|part| self.package_dir == *part) {
            ResourceClass::Package
        } else {
            ResourceClass::Workspace
        }
    }

    /// `/` + root-relative path with the source extension stripped.
    pub fn workspace_key(&self, path: &str) -> SmolStr {
        let absolute = self.absolutize(path);
        let relative = relative_path(&self.root, &absolute);
        SmolStr::from(format!("/{}", normalize_filename(&relative)))
    }

    /// Library name of a file inside the package directory, or `None` if the
    /// path does not go through one.
    ///
    /// Segments after the package directory form the name. A trailing
    /// segment that is `index`, repeats the package folder, or repeats the
    /// file's parent directory is dropped:
    ///
    /// ```
    /// use declindex::hir::KeyResolver;
    ///
    /// let keys = KeyResolver::new("/ws");
    /// assert_eq!(keys.library_name("/ws/node_modules/lodash/lodash.js").as_deref(), Some("lodash"));
    /// assert_eq!(keys.library_name("/ws/node_modules/foo/lib/index.d.ts").as_deref(), Some("foo/lib"));
    /// assert_eq!(keys.library_name("/ws/src/a.ts"), None);
    /// ```
    pub fn library_name(&self, path: &str) -> Option<SmolStr> {
        let normalized = normalize_segments(path);
        let parts: Vec<&str> = segments(&normalized).collect();
        let package_idx = parts.iter().position(|part| self.package_dir == *part)?;

        let after = &parts[package_idx + 1..];
        let package_folder = after.first().copied().unwrap_or_default();
        let parent_folder = if parts.len() >= 2 {
            parts[parts.len() - 2]
        } else {
            ""
        };

        let name = normalize_filename(&after.join("/"));
        let trimmed = match name.rsplit_once('/') {
            Some((head, last))
                if last == INDEX_SEGMENT || last == package_folder || last == parent_folder =>
            {
                head
            }
            _ => name.as_str(),
        };
        Some(SmolStr::new(trimmed))
    }

    /// Key of a parsed file, or `None` for typings files (which are keyed by
    /// their nested modules instead).
    pub fn file_key(&self, path: &Path) -> Option<SmolStr> {
        let path = path.to_string_lossy();
        match self.classify(&path) {
            ResourceClass::Typings => None,
            ResourceClass::Package => self.library_name(&path),
            ResourceClass::Workspace => Some(self.workspace_key(&path)),
        }
    }

    /// Key of the resource an `export ... from 'specifier'` statement points at.
    ///
    /// `file` is the path of the exporting file. The specifier is always
    /// joined onto its directory, so a bare `'lodash'` in `/src/a.ts` keys to
    /// `/src/lodash`; only paths that land inside the package directory take
    /// the library rule. Exports of module and namespace containers pass
    /// `None` and use the specifier verbatim.
    pub fn export_target_key(&self, file: Option<&Path>, specifier: &str) -> SmolStr {
        let Some(file) = file else {
            return SmolStr::new(specifier);
        };

        let file = self.absolutize(&file.to_string_lossy());
        let target = join_path(&parent_dir(&file), specifier);
        if segments(&target).any(|part| self.package_dir == part) {
            if let Some(name) = self.library_name(&target) {
                return name;
            }
        }
        self.workspace_key(&target)
    }

    fn absolutize(&self, path: &str) -> String {
        join_path(&self.root, path)
    }
}

/// Origin under which a resource's declarations are indexed: barrel files
/// are referenced by their directory.
///
/// ```
/// use declindex::hir::index_origin;
///
/// assert_eq!(index_origin("/src/app/index"), "/src/app");
/// assert_eq!(index_origin("/index"), "/");
/// assert_eq!(index_origin("/src/indexer"), "/src/indexer");
/// ```
pub fn index_origin(key: &str) -> SmolStr {
    match key.strip_suffix(INDEX_SEGMENT) {
        Some(head) if head.ends_with('/') => {
            let dir = &head[..head.len() - 1];
            if dir.is_empty() {
                SmolStr::new("/")
            } else {
                SmolStr::new(dir)
            }
        }
        _ => SmolStr::new(key),
    }
}
