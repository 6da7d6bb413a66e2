use smol_str::SmolStr;

use crate::base::Span;

use super::export::SymbolSpecifier;

/// An import statement. Carried through the index untouched so that
/// consumers can tell which names a file already brings into scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Import {
    /// `import Default, { A, B as C } from 'lib'`
    Named {
        library: SmolStr,
        specifiers: Vec<SymbolSpecifier>,
        default_alias: Option<SmolStr>,
        span: Option<Span>,
    },
    /// `import * as alias from 'lib'`
    Namespace {
        library: SmolStr,
        alias: SmolStr,
        span: Option<Span>,
    },
    /// `import alias = require('lib')`
    External {
        library: SmolStr,
        alias: SmolStr,
        span: Option<Span>,
    },
    /// `import 'lib'`
    String { library: SmolStr, span: Option<Span> },
}

impl Import {
    /// The module specifier this import reads from.
    pub fn library(&self) -> &str {
        match self {
            Import::Named { library, .. }
            | Import::Namespace { library, .. }
            | Import::External { library, .. }
            | Import::String { library, .. } => library.as_str(),
        }
    }

    /// Local names this import introduces.
    pub fn local_names(&self) -> Vec<&str> {
        match self {
            Import::Named {
                specifiers,
                default_alias,
                ..
            } => default_alias
                .iter()
                .map(|alias| alias.as_str())
                .chain(specifiers.iter().map(|s| s.exported_name().as_str()))
                .collect(),
            Import::Namespace { alias, .. } | Import::External { alias, .. } => vec![alias.as_str()],
            Import::String { .. } => Vec::new(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Import::Named { span, .. }
            | Import::Namespace { span, .. }
            | Import::External { span, .. }
            | Import::String { span, .. } => *span,
        }
    }
}
