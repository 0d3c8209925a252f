//! Module header and IMPORTS.

use super::{Definition, Ident};
use crate::lexer::Span;
use alloc::vec::Vec;

/// A parsed module: `Name DEFINITIONS ::= BEGIN [IMPORTS ...;] body END`.
#[derive(Clone, Debug)]
pub struct Module {
    /// Declared module name.
    pub name: Ident,
    /// Header keyword.
    pub definitions_kind: DefinitionsKind,
    /// IMPORTS groups in source order.
    pub imports: Vec<ImportClause>,
    /// Definitions in source order.
    pub body: Vec<Definition>,
    /// From the module name through `END`.
    pub span: Span,
}

impl Module {
    /// An empty module with the given header.
    #[must_use]
    pub fn new(name: Ident, definitions_kind: DefinitionsKind, span: Span) -> Self {
        Self {
            name,
            definitions_kind,
            imports: Vec::new(),
            body: Vec::new(),
            span,
        }
    }

    /// The module `symbol` is imported from.
    #[must_use]
    pub fn import_source(&self, symbol: &str) -> Option<&Ident> {
        self.imports
            .iter()
            .find(|clause| clause.symbols.iter().any(|s| s.name == symbol))
            .map(|clause| &clause.from_module)
    }

    /// Names of the modules imported from, first occurrence order, no
    /// repeats.
    pub fn imported_modules(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .enumerate()
            .filter(|(i, clause)| {
                !self.imports[..*i]
                    .iter()
                    .any(|earlier| earlier.from_module.name == clause.from_module.name)
            })
            .map(|(_, clause)| clause.from_module.name.as_str())
    }

    /// Whether the header used `PIB-DEFINITIONS`.
    #[must_use]
    pub fn is_pib(&self) -> bool {
        self.definitions_kind == DefinitionsKind::PibDefinitions
    }
}

/// Header keyword of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionsKind {
    /// `DEFINITIONS`
    Definitions,
    /// `PIB-DEFINITIONS` (SPPI)
    PibDefinitions,
}

/// `sym, sym FROM Module`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportClause {
    /// Imported symbols.
    pub symbols: Vec<Ident>,
    /// Module named after `FROM`.
    pub from_module: Ident,
    /// Source location.
    pub span: Span,
}
