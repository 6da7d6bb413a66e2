use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::base::Span;

use super::declaration::Declaration;
use super::export::Export;
use super::import::Import;

/// What a resource is: a parsed file, or a container declared inside one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// A source file, identified by its path on disk
    File { path: PathBuf },
    /// `declare module "name" { ... }`
    Module { name: SmolStr },
    /// `namespace Name { ... }`
    Namespace { name: SmolStr },
}

/// A unit of declared symbols: a source file, or a module/namespace container
/// nested inside one.
///
/// Declarations are owned; export resolution moves them between resources so
/// that each one ends up under the resource it is visible from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub declarations: Vec<Declaration>,
    pub exports: Vec<Export>,
    pub imports: Vec<Import>,
    /// Free identifiers used in the resource body
    pub usages: Vec<SmolStr>,
    /// Nested modules and namespaces
    pub resources: Vec<Resource>,
    pub span: Option<Span>,
}

impl Resource {
    fn with_kind(kind: ResourceKind) -> Self {
        Self {
            kind,
            declarations: Vec::new(),
            exports: Vec::new(),
            imports: Vec::new(),
            usages: Vec::new(),
            resources: Vec::new(),
            span: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(ResourceKind::File { path: path.into() })
    }

    pub fn module(name: impl Into<SmolStr>) -> Self {
        Self::with_kind(ResourceKind::Module { name: name.into() })
    }

    pub fn namespace(name: impl Into<SmolStr>) -> Self {
        Self::with_kind(ResourceKind::Namespace { name: name.into() })
    }

    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_usage(mut self, usage: impl Into<SmolStr>) -> Self {
        self.usages.push(usage.into());
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Path of a file resource
    pub fn file_path(&self) -> Option<&Path> {
        match &self.kind {
            ResourceKind::File { path } => Some(path),
            ResourceKind::Module { .. } | ResourceKind::Namespace { .. } => None,
        }
    }

    /// Declared name of a module or namespace resource
    pub fn container_name(&self) -> Option<&SmolStr> {
        match &self.kind {
            ResourceKind::Module { name } | ResourceKind::Namespace { name } => Some(name),
            ResourceKind::File { .. } => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, ResourceKind::File { .. })
    }

    pub fn is_container(&self) -> bool {
        !self.is_file()
    }

    /// Camel-cased alias used when the whole container is imported
    /// (`some-module` → `someModule`).
    pub fn namespace_alias(&self) -> Option<String> {
        self.container_name().map(|name| namespace_alias(name))
    }

    /// Identifiers named by `export = identifier` statements of this resource.
    pub fn assigned_identifiers(&self) -> impl Iterator<Item = &SmolStr> {
        self.exports.iter().filter_map(|export| match export {
            Export::Assigned { identifier, .. } => Some(identifier),
            _ => None,
        })
    }

    /// Names made visible by `export = Foo` or a source-less `export { Foo }`.
    pub fn locally_exported_names(&self) -> Vec<SmolStr> {
        let mut names = Vec::new();
        for export in &self.exports {
            match export {
                Export::Assigned { identifier, .. } => names.push(identifier.clone()),
                Export::Named {
                    from: None,
                    specifiers,
                    ..
                } => names.extend(specifiers.iter().map(|s| s.specifier.clone())),
                Export::All { .. } | Export::Named { .. } => {}
            }
        }
        names
    }

    /// Drop every declaration that is not visible outside the resource.
    ///
    /// Declarations named by a local export statement are kept and marked
    /// exported, since that statement is what makes them visible.
    pub fn retain_exported(&mut self) {
        let local = self.locally_exported_names();
        self.declarations.retain_mut(|declaration| {
            if !declaration.kind.is_exportable() {
                return false;
            }
            if !declaration.is_exported && local.contains(&declaration.name) {
                declaration.is_exported = true;
            }
            declaration.is_exported
        });
    }

    /// Move all visible declarations out, leaving the resource without any.
    pub fn take_visible_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = std::mem::take(&mut self.declarations);
        declarations.retain(Declaration::is_visible);
        declarations
    }

    /// Usages that are not satisfied by the resource's own declarations or
    /// nested containers, followed by the non-local usages of nested resources.
    pub fn non_local_usages(&self) -> Vec<SmolStr> {
        let local = self.usages.iter().filter(|usage| {
            !self.declarations.iter().any(|d| &d.name == *usage)
                && !self
                    .resources
                    .iter()
                    .any(|r| r.container_name() == Some(*usage))
        });

        local
            .cloned()
            .chain(
                self.resources
                    .iter()
                    .flat_map(|resource| resource.non_local_usages()),
            )
            .collect()
    }
}

/// Camel-case a module name on its `-` and `_` delimiters.
///
/// The first segment is lower-cased; every following segment has its first
/// character upper-cased and the rest lower-cased.
pub fn namespace_alias(name: &str) -> String {
    let mut alias = String::with_capacity(name.len());
    for (idx, segment) in name.split(['-', '_']).enumerate() {
        if idx == 0 {
            alias.push_str(&segment.to_lowercase());
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            alias.extend(first.to_uppercase());
            alias.push_str(&chars.as_str().to_lowercase());
        }
    }
    alias
}
