//! Keyword lookup.

use super::Keyword;

/// Look up a reserved word. Matching is case-sensitive.
#[must_use]
pub fn lookup_keyword(text: &[u8]) -> Option<Keyword> {
    let kw = match text {
        b"DEFINITIONS" => Keyword::Definitions,
        b"BEGIN" => Keyword::Begin,
        b"END" => Keyword::End,
        b"IMPORTS" => Keyword::Imports,
        b"EXPORTS" => Keyword::Exports,
        b"FROM" => Keyword::From,
        b"OBJECT" => Keyword::Object,
        b"IDENTIFIER" => Keyword::Identifier,
        b"SEQUENCE" => Keyword::Sequence,
        b"OF" => Keyword::Of,
        b"CHOICE" => Keyword::Choice,
        b"MACRO" => Keyword::Macro,
        b"SYNTAX" => Keyword::Syntax,
        b"INDEX" => Keyword::Index,
        b"AUGMENTS" => Keyword::Augments,
        b"STATUS" => Keyword::Status,
        b"ENTERPRISE" => Keyword::Enterprise,
        b"MODULE-IDENTITY" => Keyword::ModuleIdentity,
        b"OBJECT-IDENTITY" => Keyword::ObjectIdentity,
        b"OBJECT-TYPE" => Keyword::ObjectType,
        b"NOTIFICATION-TYPE" => Keyword::NotificationType,
        b"TRAP-TYPE" => Keyword::TrapType,
        b"TEXTUAL-CONVENTION" => Keyword::TextualConvention,
        b"OBJECT-GROUP" => Keyword::ObjectGroup,
        b"NOTIFICATION-GROUP" => Keyword::NotificationGroup,
        b"MODULE-COMPLIANCE" => Keyword::ModuleCompliance,
        b"AGENT-CAPABILITIES" => Keyword::AgentCapabilities,
        _ => return None,
    };
    Some(kw)
}

impl Keyword {
    /// Source spelling of the keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Definitions => "DEFINITIONS",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Imports => "IMPORTS",
            Self::Exports => "EXPORTS",
            Self::From => "FROM",
            Self::Object => "OBJECT",
            Self::Identifier => "IDENTIFIER",
            Self::Sequence => "SEQUENCE",
            Self::Of => "OF",
            Self::Choice => "CHOICE",
            Self::Macro => "MACRO",
            Self::Syntax => "SYNTAX",
            Self::Index => "INDEX",
            Self::Augments => "AUGMENTS",
            Self::Status => "STATUS",
            Self::Enterprise => "ENTERPRISE",
            Self::ModuleIdentity => "MODULE-IDENTITY",
            Self::ObjectIdentity => "OBJECT-IDENTITY",
            Self::ObjectType => "OBJECT-TYPE",
            Self::NotificationType => "NOTIFICATION-TYPE",
            Self::TrapType => "TRAP-TYPE",
            Self::TextualConvention => "TEXTUAL-CONVENTION",
            Self::ObjectGroup => "OBJECT-GROUP",
            Self::NotificationGroup => "NOTIFICATION-GROUP",
            Self::ModuleCompliance => "MODULE-COMPLIANCE",
            Self::AgentCapabilities => "AGENT-CAPABILITIES",
        }
    }
}
