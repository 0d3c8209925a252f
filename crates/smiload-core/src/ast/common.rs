//! Common AST types.

use crate::lexer::Span;
use alloc::string::String;

/// Identifier with source location.
///
/// Identifiers in SMI are case-sensitive. Uppercase identifiers denote
/// module names and type references; lowercase identifiers denote object
/// names and enum labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Source location.
    pub span: Span,
}

impl Ident {
    /// Create a new identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Check if this is an uppercase identifier (module/type name).
    #[must_use]
    pub fn is_uppercase(&self) -> bool {
        self.name.bytes().next().is_some_and(|c| c.is_ascii_uppercase())
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}
