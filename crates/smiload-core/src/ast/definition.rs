//! Definition AST types.
//!
//! Each definition corresponds to a statement in a MIB module body. Clauses
//! that have no bearing on OID resolution or node kind are skipped by the
//! parser and not represented here.

use super::{Ident, OidAssignment};
use crate::lexer::Span;

/// A definition in a MIB module body.
#[derive(Clone, Debug)]
pub enum Definition {
    /// `name OBJECT IDENTIFIER ::= { parent subid }`
    ValueAssignment(ValueAssignment),
    /// `name MACRO-NAME clauses ::= value`
    Macro(MacroInvocation),
    /// `Name ::= type` or `Name ::= TEXTUAL-CONVENTION ...`
    TypeAssignment(TypeAssignment),
    /// `NAME MACRO ::= BEGIN ... END`; the body is skipped by the lexer.
    MacroDefinition(MacroDefinition),
}

impl Definition {
    /// Get the name of this definition.
    #[must_use]
    pub fn name(&self) -> &Ident {
        match self {
            Self::ValueAssignment(d) => &d.name,
            Self::Macro(d) => &d.name,
            Self::TypeAssignment(d) => &d.name,
            Self::MacroDefinition(d) => &d.name,
        }
    }

    /// Get the span of this definition.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::ValueAssignment(d) => d.span,
            Self::Macro(d) => d.span,
            Self::TypeAssignment(d) => d.span,
            Self::MacroDefinition(d) => d.span,
        }
    }
}

/// `name OBJECT IDENTIFIER ::= { ... }`
#[derive(Clone, Debug)]
pub struct ValueAssignment {
    /// Defined name.
    pub name: Ident,
    /// The assigned OID value.
    pub oid: OidAssignment,
    /// Source location.
    pub span: Span,
}

/// Definition macros that can be invoked in a module body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MacroKind {
    /// `MODULE-IDENTITY`
    ModuleIdentity,
    /// `OBJECT-IDENTITY`
    ObjectIdentity,
    /// `OBJECT-TYPE`
    ObjectType,
    /// `NOTIFICATION-TYPE`
    NotificationType,
    /// `TRAP-TYPE` (SMIv1)
    TrapType,
    /// `OBJECT-GROUP`
    ObjectGroup,
    /// `NOTIFICATION-GROUP`
    NotificationGroup,
    /// `MODULE-COMPLIANCE`
    ModuleCompliance,
    /// `AGENT-CAPABILITIES`
    AgentCapabilities,
}

impl MacroKind {
    /// The macro's source spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleIdentity => "MODULE-IDENTITY",
            Self::ObjectIdentity => "OBJECT-IDENTITY",
            Self::ObjectType => "OBJECT-TYPE",
            Self::NotificationType => "NOTIFICATION-TYPE",
            Self::TrapType => "TRAP-TYPE",
            Self::ObjectGroup => "OBJECT-GROUP",
            Self::NotificationGroup => "NOTIFICATION-GROUP",
            Self::ModuleCompliance => "MODULE-COMPLIANCE",
            Self::AgentCapabilities => "AGENT-CAPABILITIES",
        }
    }
}

/// Definition status from a `STATUS` clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// `current`
    Current,
    /// `deprecated`
    Deprecated,
    /// `obsolete`
    Obsolete,
    /// `mandatory` (SMIv1)
    Mandatory,
    /// `optional` (SMIv1)
    Optional,
}

impl Status {
    /// Parse a status keyword.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "current" => Some(Self::Current),
            "deprecated" => Some(Self::Deprecated),
            "obsolete" => Some(Self::Obsolete),
            "mandatory" => Some(Self::Mandatory),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }
}

/// The leading form of an OBJECT-TYPE `SYNTAX` clause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxHead {
    /// `SEQUENCE OF EntryType`
    SequenceOf(Ident),
    /// A named type: `Integer32`, `IfEntry`, `DisplayString (SIZE (0..255))`.
    TypeRef(Ident),
    /// Anything else (`INTEGER { ... }`, `OCTET STRING`, `BITS { ... }`).
    Other,
}

/// The value after `::=` in a macro invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroValue {
    /// `{ parent subid ... }`
    Oid(OidAssignment),
    /// TRAP-TYPE specific trap number.
    TrapNumber {
        /// The trap number.
        value: u32,
        /// Source location.
        span: Span,
    },
}

/// `name MACRO-NAME clauses ::= value`
#[derive(Clone, Debug)]
pub struct MacroInvocation {
    /// Defined name.
    pub name: Ident,
    /// Which macro is invoked.
    pub kind: MacroKind,
    /// OBJECT-TYPE `SYNTAX` head.
    pub syntax: Option<SyntaxHead>,
    /// Whether an `INDEX` clause is present.
    pub has_index: bool,
    /// Whether an `AUGMENTS` clause is present.
    pub has_augments: bool,
    /// `STATUS` clause value.
    pub status: Option<Status>,
    /// TRAP-TYPE `ENTERPRISE` value.
    pub enterprise: Option<OidAssignment>,
    /// The assigned value.
    pub value: MacroValue,
    /// Source location.
    pub span: Span,
}

/// `Name ::= type`, including textual conventions.
#[derive(Clone, Debug)]
pub struct TypeAssignment {
    /// Type name.
    pub name: Ident,
    /// Defined with `TEXTUAL-CONVENTION`.
    pub is_textual_convention: bool,
    /// The type is `SEQUENCE { ... }` (a conceptual row type).
    pub is_sequence: bool,
    /// Source location.
    pub span: Span,
}

/// `NAME MACRO ::= BEGIN ... END`
#[derive(Clone, Debug)]
pub struct MacroDefinition {
    /// Macro name.
    pub name: Ident,
    /// Source location.
    pub span: Span,
}
