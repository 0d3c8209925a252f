//! Token types and spans.

use super::ByteOffset;

/// Span of source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: ByteOffset,
    /// End byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: ByteOffset, end: ByteOffset) -> Self {
        Self { start, end }
    }

    /// Get the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> ByteOffset {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// Token with kind and source span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Location in source text.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Check whether this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Token kinds.
///
/// Only words that steer the loader's grammar are keywords. Type names such
/// as `Counter32` or clause names such as `DESCRIPTION` lex as plain
/// identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Lexical error.
    Error,
    /// End of input.
    Eof,

    /// Identifier starting with an uppercase letter (modules, types, clauses).
    UppercaseIdent,
    /// Identifier starting with a lowercase letter (objects, labels).
    LowercaseIdent,

    /// Unsigned decimal number.
    Number,
    /// Negative decimal number.
    NegativeNumber,
    /// Quoted string literal.
    QuotedString,
    /// Hex string literal (`'...'H`).
    HexString,
    /// Binary string literal (`'...'B`).
    BinString,

    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `|`
    Pipe,
    /// `-`
    Minus,
    /// `..`
    DotDot,
    /// `::=`
    ColonColonEqual,

    /// Reserved word.
    Keyword(Keyword),
}

impl TokenKind {
    /// Check if this token is an identifier of either case.
    #[must_use]
    pub const fn is_identifier(self) -> bool {
        matches!(self, Self::UppercaseIdent | Self::LowercaseIdent)
    }

    /// Check if this token opens a bracketed group.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::LBrace | Self::LParen | Self::LBracket)
    }

    /// Check if this token closes a bracketed group.
    #[must_use]
    pub const fn is_close(self) -> bool {
        matches!(self, Self::RBrace | Self::RParen | Self::RBracket)
    }

    /// Check if this token is a macro keyword (OBJECT-TYPE, etc.).
    #[must_use]
    pub const fn is_macro_keyword(self) -> bool {
        match self {
            Self::Keyword(kw) => kw.is_macro(),
            _ => false,
        }
    }
}

/// Reserved words recognized by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `DEFINITIONS`
    Definitions,
    /// `BEGIN`
    Begin,
    /// `END`
    End,
    /// `IMPORTS`
    Imports,
    /// `EXPORTS`
    Exports,
    /// `FROM`
    From,
    /// `OBJECT`
    Object,
    /// `IDENTIFIER`
    Identifier,
    /// `SEQUENCE`
    Sequence,
    /// `OF`
    Of,
    /// `CHOICE`
    Choice,
    /// `MACRO`
    Macro,
    /// `SYNTAX`
    Syntax,
    /// `INDEX`
    Index,
    /// `AUGMENTS`
    Augments,
    /// `STATUS`
    Status,
    /// `ENTERPRISE`
    Enterprise,
    /// `MODULE-IDENTITY`
    ModuleIdentity,
    /// `OBJECT-IDENTITY`
    ObjectIdentity,
    /// `OBJECT-TYPE`
    ObjectType,
    /// `NOTIFICATION-TYPE`
    NotificationType,
    /// `TRAP-TYPE`
    TrapType,
    /// `TEXTUAL-CONVENTION`
    TextualConvention,
    /// `OBJECT-GROUP`
    ObjectGroup,
    /// `NOTIFICATION-GROUP`
    NotificationGroup,
    /// `MODULE-COMPLIANCE`
    ModuleCompliance,
    /// `AGENT-CAPABILITIES`
    AgentCapabilities,
}

impl Keyword {
    /// Check if this keyword names a definition macro.
    #[must_use]
    pub const fn is_macro(self) -> bool {
        matches!(
            self,
            Self::ModuleIdentity
                | Self::ObjectIdentity
                | Self::ObjectType
                | Self::NotificationType
                | Self::TrapType
                | Self::TextualConvention
                | Self::ObjectGroup
                | Self::NotificationGroup
                | Self::ModuleCompliance
                | Self::AgentCapabilities
        )
    }
}
