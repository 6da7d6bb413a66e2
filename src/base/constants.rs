//! Default markers and file-name conventions used for key derivation.

/// Source extensions stripped from file paths, longest first so that `.tsx`
/// wins over `.ts`.
pub const SOURCE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];

/// Infix of ambient declaration files (`foo.d.ts`).
pub const DECLARATION_INFIX: &str = ".d";

/// Directory holding third-party packages.
pub const PACKAGE_DIR: &str = "node_modules";

/// Package scope holding ambient type-declaration packages (`node_modules/@types`).
pub const TYPES_SCOPE: &str = "@types";

/// Directory names whose files contribute ambient typings.
pub const TYPINGS_DIRS: &[&str] = &["typings"];

/// Barrel file stem; `/foo/index` is referenced as `/foo`.
pub const INDEX_SEGMENT: &str = "index";
