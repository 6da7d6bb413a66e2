use smol_str::SmolStr;

use crate::base::Span;

/// The kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclarationKind {
    Class,
    Interface,
    Function,
    Enum,
    TypeAlias,
    Variable,
    /// Alias for a whole module or namespace (`import * as alias`)
    Module,
    /// Placeholder for a default export; the importer picks the local name
    Default,
}

impl DeclarationKind {
    /// Returns true if declarations of this kind carry an export flag and can
    /// take part in export resolution.
    ///
    /// Module aliases are synthesized by the index itself and never come out
    /// of a resource's own declaration list.
    pub fn is_exportable(self) -> bool {
        !matches!(self, DeclarationKind::Module)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Function => "function",
            DeclarationKind::Enum => "enum",
            DeclarationKind::TypeAlias => "type alias",
            DeclarationKind::Variable => "variable",
            DeclarationKind::Module => "module",
            DeclarationKind::Default => "default",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, independently importable symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub name: SmolStr,
    pub kind: DeclarationKind,
    pub is_exported: bool,
    pub span: Option<Span>,
}

impl Declaration {
    pub fn new(name: impl Into<SmolStr>, kind: DeclarationKind, is_exported: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            is_exported,
            span: None,
        }
    }

    /// Default-export placeholder. Always exported.
    pub fn default_export(name: impl Into<SmolStr>) -> Self {
        Self::new(name, DeclarationKind::Default, true)
    }

    /// Module alias declaration, as synthesized for module/namespace resources.
    pub fn module_alias(alias: impl Into<SmolStr>, span: Option<Span>) -> Self {
        Self {
            name: alias.into(),
            kind: DeclarationKind::Module,
            is_exported: false,
            span,
        }
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    /// Returns true if this declaration is visible outside its resource.
    pub fn is_visible(&self) -> bool {
        self.kind.is_exportable() && self.is_exported
    }
}
