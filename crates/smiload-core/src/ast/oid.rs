//! OID value AST types.

use super::Ident;
use crate::lexer::Span;
use alloc::vec::Vec;

/// OID value assignment: the `{ parent subid ... }` after `::=`.
///
/// Examples:
/// - `{ ifEntry 1 }` - parent reference and subid
/// - `{ iso org(3) dod(6) internet(1) }` - full path with named numbers
/// - `{ SNMPv2-SMI.mib-2 31 }` - qualified parent reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OidAssignment {
    /// The OID components.
    pub components: Vec<OidComponent>,
    /// Source location (includes braces).
    pub span: Span,
}

impl OidAssignment {
    /// Create a new OID assignment.
    #[must_use]
    pub fn new(components: Vec<OidComponent>, span: Span) -> Self {
        Self { components, span }
    }

    /// An assignment consisting of a single name reference, as used for
    /// TRAP-TYPE `ENTERPRISE` clauses.
    #[must_use]
    pub fn from_name(name: Ident) -> Self {
        let span = name.span;
        Self {
            components: alloc::vec![OidComponent::Name(name)],
            span,
        }
    }
}

/// A component of an OID value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OidComponent {
    /// Named reference: `internet`, `ifEntry`.
    Name(Ident),
    /// Numeric subid: `1`, `31`.
    Number {
        /// The numeric value.
        value: u32,
        /// Source location.
        span: Span,
    },
    /// Named with number: `iso(1)`, `org(3)`.
    NamedNumber {
        /// The name bound to this arc.
        name: Ident,
        /// The numeric value.
        number: u32,
        /// Source location (covers `name(number)`).
        span: Span,
    },
    /// Module-qualified reference: `SNMPv2-SMI.enterprises`.
    QualifiedName {
        /// The module name.
        module: Ident,
        /// The symbol name.
        name: Ident,
        /// Source location.
        span: Span,
    },
    /// Module-qualified named number: `SNMPv2-SMI.enterprises(1)`.
    QualifiedNamedNumber {
        /// The module name.
        module: Ident,
        /// The symbol name.
        name: Ident,
        /// The numeric value.
        number: u32,
        /// Source location.
        span: Span,
    },
}

impl OidComponent {
    /// Get the span of this component.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Name(ident) => ident.span,
            Self::Number { span, .. }
            | Self::NamedNumber { span, .. }
            | Self::QualifiedName { span, .. }
            | Self::QualifiedNamedNumber { span, .. } => *span,
        }
    }

    /// Get the numeric value if this component carries one.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self {
            Self::Name(_) | Self::QualifiedName { .. } => None,
            Self::Number { value, .. } => Some(*value),
            Self::NamedNumber { number, .. } | Self::QualifiedNamedNumber { number, .. } => {
                Some(*number)
            }
        }
    }
}
