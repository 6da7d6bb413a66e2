use smol_str::SmolStr;

use crate::base::Span;

/// A possibly aliased symbol in an import or export clause
/// (`{ Foo }`, `{ Foo as Bar }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolSpecifier {
    pub specifier: SmolStr,
    pub alias: Option<SmolStr>,
}

impl SymbolSpecifier {
    pub fn new(specifier: impl Into<SmolStr>) -> Self {
        Self {
            specifier: specifier.into(),
            alias: None,
        }
    }

    pub fn aliased(specifier: impl Into<SmolStr>, alias: impl Into<SmolStr>) -> Self {
        Self {
            specifier: specifier.into(),
            alias: Some(alias.into()),
        }
    }

    /// The name the symbol is known by after the clause.
    pub fn exported_name(&self) -> &SmolStr {
        self.alias.as_ref().unwrap_or(&self.specifier)
    }
}

/// An export statement of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    /// `export * from './other'`
    All { from: SmolStr, span: Option<Span> },
    /// `export { A, B as C } from './other'`, or `export { A }` without a
    /// source, which refers to the resource's own declarations.
    Named {
        from: Option<SmolStr>,
        specifiers: Vec<SymbolSpecifier>,
        span: Option<Span>,
    },
    /// `export = identifier`, where the identifier names a declaration or a
    /// nested module/namespace of the same resource.
    Assigned { identifier: SmolStr, span: Option<Span> },
}

impl Export {
    pub fn all(from: impl Into<SmolStr>) -> Self {
        Export::All {
            from: from.into(),
            span: None,
        }
    }

    pub fn named(from: impl Into<SmolStr>, specifiers: Vec<SymbolSpecifier>) -> Self {
        Export::Named {
            from: Some(from.into()),
            specifiers,
            span: None,
        }
    }

    pub fn local(specifiers: Vec<SymbolSpecifier>) -> Self {
        Export::Named {
            from: None,
            specifiers,
            span: None,
        }
    }

    pub fn assigned(identifier: impl Into<SmolStr>) -> Self {
        Export::Assigned {
            identifier: identifier.into(),
            span: None,
        }
    }

    /// The module specifier this export reads from, if it reads from another
    /// resource.
    pub fn source(&self) -> Option<&str> {
        match self {
            Export::All { from, .. } => Some(from.as_str()),
            Export::Named { from, .. } => from.as_deref(),
            Export::Assigned { .. } => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Export::All { span, .. } | Export::Named { span, .. } | Export::Assigned { span, .. } => {
                *span
            }
        }
    }
}
