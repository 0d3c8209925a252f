//! MIB parser module.
//!
//! Parses SMIv1/SMIv2 MIB source into [`ast::Module`](crate::ast::Module)s.
//! The parser is lenient: it collects diagnostics, skips clauses it has no
//! use for, and recovers at the next definition after an error.

use crate::ast::{
    DefinitionsKind, Definition, Ident, ImportClause, MacroDefinition, MacroInvocation, MacroKind,
    MacroValue, Module, OidAssignment, OidComponent, Status, SyntaxHead, TypeAssignment,
    ValueAssignment,
};
use crate::lexer::{Diagnostic, Keyword, Lexer, Span, Token, TokenKind};
use alloc::format;
use alloc::vec::Vec;

/// Result of parsing one source file.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    /// Modules in source order. A file normally holds exactly one.
    pub modules: Vec<Module>,
    /// Lexer and parser diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Check if any error-severity diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// The first error-severity diagnostic, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_error())
    }
}

/// MIB parser.
pub struct Parser<'src> {
    /// Source text (for extracting token content).
    source: &'src [u8],
    /// Tokens from lexer.
    tokens: Vec<Token>,
    /// Current position in token stream.
    pos: usize,
    /// Collected diagnostics (lexer + parser).
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source bytes.
    #[must_use]
    pub fn new(source: &'src [u8]) -> Self {
        let (tokens, diagnostics) = Lexer::new(source).tokenize();
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics,
        }
    }

    /// Parse every module in the source.
    #[must_use]
    pub fn parse(mut self) -> ParseOutput {
        let mut modules = Vec::new();

        while !self.is_eof() {
            if self.at_module_header() {
                modules.push(self.parse_module());
                continue;
            }

            let diag = self.error("expected module header `Name DEFINITIONS ::= BEGIN`");
            self.diagnostics.push(diag);
            while !self.is_eof() && !self.at_module_header() {
                self.advance();
            }
        }

        ParseOutput {
            modules,
            diagnostics: self.diagnostics,
        }
    }

    // === Token access ===

    fn eof_token(&self) -> Token {
        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        Token::new(TokenKind::Eof, Span::new(end, end))
    }

    fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Token {
        self.tokens
            .get(self.pos + n)
            .copied()
            .unwrap_or_else(|| self.eof_token())
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(&format!("expected {}", describe(kind))))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, Diagnostic> {
        self.expect(TokenKind::Keyword(keyword))
    }

    fn expect_identifier(&mut self) -> Result<Token, Diagnostic> {
        if self.peek().kind.is_identifier() {
            Ok(self.advance())
        } else {
            Err(self.error("expected identifier"))
        }
    }

    fn text(&self, span: Span) -> &str {
        let bytes = &self.source[span.start as usize..span.end as usize];
        core::str::from_utf8(bytes).unwrap_or("")
    }

    fn ident(&self, token: Token) -> Ident {
        Ident::new(self.text(token.span), token.span)
    }

    fn error(&self, message: &str) -> Diagnostic {
        let token = self.peek();
        let found = if token.kind == TokenKind::Eof {
            "end of input"
        } else {
            self.text(token.span)
        };
        Diagnostic::error(token.span, format!("{message}, found `{found}`"))
    }

    fn parse_u32(&mut self, token: Token, context: &str) -> u32 {
        if let Ok(v) = self.text(token.span).parse::<u32>() {
            v
        } else {
            self.diagnostics.push(Diagnostic::error(
                token.span,
                format!("invalid {context}: {}", self.text(token.span)),
            ));
            0
        }
    }

    // === Lookahead patterns ===

    /// `Name DEFINITIONS ::=` or `Name PIB-DEFINITIONS ::=`
    fn at_module_header(&self) -> bool {
        let name = self.peek();
        let definitions = self.peek_nth(1);
        name.kind == TokenKind::UppercaseIdent
            && (definitions.is_keyword(Keyword::Definitions)
                || (definitions.kind == TokenKind::UppercaseIdent
                    && self.text(definitions.span) == "PIB-DEFINITIONS"))
    }

    /// Check whether the next tokens look like the start of a definition.
    fn at_definition_start(&self) -> bool {
        let first = self.peek().kind;
        let second = self.peek_nth(1).kind;
        match (first, second) {
            (TokenKind::LowercaseIdent, TokenKind::Keyword(Keyword::Object)) => {
                self.peek_nth(2).is_keyword(Keyword::Identifier)
            }
            (TokenKind::LowercaseIdent, kind) => kind.is_macro_keyword(),
            (
                TokenKind::UppercaseIdent,
                TokenKind::ColonColonEqual | TokenKind::Keyword(Keyword::TextualConvention),
            )
            | (_, TokenKind::Keyword(Keyword::Macro)) => true,
            _ => false,
        }
    }

    // === Module structure ===

    fn parse_module(&mut self) -> Module {
        let start = self.peek().span.start;
        let name_token = self.advance();
        let name = self.ident(name_token);

        let kind_token = self.advance();
        let definitions_kind = if kind_token.is_keyword(Keyword::Definitions) {
            DefinitionsKind::Definitions
        } else {
            DefinitionsKind::PibDefinitions
        };

        if let Err(diag) = self
            .expect(TokenKind::ColonColonEqual)
            .and_then(|_| self.expect_keyword(Keyword::Begin))
        {
            self.diagnostics.push(diag);
        }

        let mut module = Module::new(name, definitions_kind, Span::new(start, start));

        if self.check_keyword(Keyword::Imports) {
            match self.parse_imports() {
                Ok(imports) => module.imports = imports,
                Err(diag) => {
                    self.diagnostics.push(diag);
                    self.recover_to_definition();
                }
            }
        }

        while !self.check_keyword(Keyword::End) && !self.is_eof() {
            if self.at_module_header() {
                break;
            }
            let before = self.pos;
            match self.parse_definition() {
                Ok(Some(def)) => module.body.push(def),
                Ok(None) => {}
                Err(diag) => {
                    self.diagnostics.push(diag);
                    if self.pos == before {
                        self.advance();
                    }
                    self.recover_to_definition();
                }
            }
        }

        if self.check_keyword(Keyword::End) {
            self.advance();
        } else {
            let diag = self.error(&format!("expected END of module {}", module.name.name));
            self.diagnostics.push(diag);
        }

        let end = self.tokens[..self.pos]
            .last()
            .map_or(start, |token| token.span.end);
        module.span = Span::new(start, end);
        module
    }

    /// Parse `IMPORTS sym, sym FROM Module ... ;`
    fn parse_imports(&mut self) -> Result<Vec<ImportClause>, Diagnostic> {
        self.expect_keyword(Keyword::Imports)?;
        let mut imports = Vec::new();

        loop {
            if self.check(TokenKind::Semicolon) {
                self.advance();
                break;
            }
            if self.is_eof() || self.check_keyword(Keyword::End) {
                return Err(self.error("unterminated IMPORTS"));
            }

            let start = self.peek().span.start;
            let mut symbols = Vec::new();
            while !self.check_keyword(Keyword::From) {
                let token = self.peek();
                if token.kind.is_identifier() || token.kind.is_macro_keyword() {
                    self.advance();
                    symbols.push(self.ident(token));
                } else if !self.check(TokenKind::Comma) {
                    return Err(self.error("expected imported symbol or FROM"));
                }
                if self.check(TokenKind::Comma) {
                    self.advance();
                }
            }
            self.expect_keyword(Keyword::From)?;

            let module_token = self.expect(TokenKind::UppercaseIdent)?;
            let from_module = self.ident(module_token);
            imports.push(ImportClause {
                symbols,
                from_module,
                span: Span::new(start, module_token.span.end),
            });
        }

        Ok(imports)
    }

    /// Parse one definition. `Ok(None)` means a construct was consumed that
    /// produces no definition (EXPORTS, values of other ASN.1 types).
    fn parse_definition(&mut self) -> Result<Option<Definition>, Diagnostic> {
        let first = self.peek().kind;
        let second = self.peek_nth(1).kind;

        let def = match (first, second) {
            (TokenKind::Keyword(Keyword::Exports), _) => {
                self.advance();
                if self.check(TokenKind::Semicolon) {
                    self.advance();
                }
                return Ok(None);
            }
            (_, TokenKind::Keyword(Keyword::Macro)) => self.parse_macro_definition()?,
            (TokenKind::LowercaseIdent, TokenKind::Keyword(Keyword::Object))
                if self.peek_nth(2).is_keyword(Keyword::Identifier) =>
            {
                self.parse_value_assignment()?
            }
            (TokenKind::LowercaseIdent, TokenKind::Keyword(kw)) if kw.is_macro() => {
                match macro_kind(kw) {
                    Some(kind) => self.parse_macro_invocation(kind)?,
                    None => self.parse_type_assignment()?,
                }
            }
            (
                TokenKind::UppercaseIdent,
                TokenKind::ColonColonEqual | TokenKind::Keyword(Keyword::TextualConvention),
            ) => self.parse_type_assignment()?,
            (TokenKind::LowercaseIdent, TokenKind::UppercaseIdent)
                if self.peek_nth(2).kind == TokenKind::ColonColonEqual =>
            {
                // `name SomeType ::= value`: an ASN.1 value with no OID.
                self.advance();
                self.advance();
                self.advance();
                self.skip_value()?;
                return Ok(None);
            }
            _ => return Err(self.error("expected definition")),
        };

        Ok(Some(def))
    }

    /// Parse `name OBJECT IDENTIFIER ::= { ... }`
    fn parse_value_assignment(&mut self) -> Result<Definition, Diagnostic> {
        let name_token = self.advance();
        let name = self.ident(name_token);

        self.expect_keyword(Keyword::Object)?;
        self.expect_keyword(Keyword::Identifier)?;
        self.expect(TokenKind::ColonColonEqual)?;
        let oid = self.parse_oid_assignment()?;

        let span = Span::new(name_token.span.start, oid.span.end);
        Ok(Definition::ValueAssignment(ValueAssignment { name, oid, span }))
    }

    /// Parse `name MACRO-NAME clauses ::= value`.
    fn parse_macro_invocation(&mut self, kind: MacroKind) -> Result<Definition, Diagnostic> {
        let name_token = self.advance();
        let name = self.ident(name_token);
        self.advance(); // macro keyword

        let mut syntax = None;
        let mut has_index = false;
        let mut has_augments = false;
        let mut status = None;
        let mut enterprise = None;

        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::ColonColonEqual => break,
                TokenKind::Keyword(Keyword::Syntax)
                    if kind == MacroKind::ObjectType && syntax.is_none() =>
                {
                    self.advance();
                    syntax = Some(self.parse_syntax_head()?);
                }
                TokenKind::Keyword(Keyword::Index) => {
                    self.advance();
                    has_index = true;
                }
                TokenKind::Keyword(Keyword::Augments) => {
                    self.advance();
                    has_augments = true;
                }
                TokenKind::Keyword(Keyword::Status) => {
                    self.advance();
                    status = self.parse_status();
                }
                TokenKind::Keyword(Keyword::Enterprise) if kind == MacroKind::TrapType => {
                    self.advance();
                    enterprise = Some(self.parse_enterprise()?);
                }
                TokenKind::Eof | TokenKind::Keyword(Keyword::End) => {
                    return Err(self.error(&format!(
                        "unterminated {} definition of {}",
                        kind.as_str(),
                        name.name
                    )));
                }
                _ if self.at_definition_start() => {
                    return Err(self.error(&format!(
                        "expected ::= to close {} definition of {}",
                        kind.as_str(),
                        name.name
                    )));
                }
                k if k.is_open() => self.skip_group()?,
                _ => {
                    self.advance();
                }
            }
        }
        self.expect(TokenKind::ColonColonEqual)?;

        let value = if kind == MacroKind::TrapType && self.check(TokenKind::Number) {
            let token = self.advance();
            MacroValue::TrapNumber {
                value: self.parse_u32(token, "trap number"),
                span: token.span,
            }
        } else {
            MacroValue::Oid(self.parse_oid_assignment()?)
        };

        let end = match &value {
            MacroValue::Oid(oid) => oid.span.end,
            MacroValue::TrapNumber { span, .. } => span.end,
        };

        Ok(Definition::Macro(MacroInvocation {
            name,
            kind,
            syntax,
            has_index,
            has_augments,
            status,
            enterprise,
            value,
            span: Span::new(name_token.span.start, end),
        }))
    }

    /// Parse the leading form of an OBJECT-TYPE `SYNTAX` clause. Whatever
    /// follows the head (constraints, enumerations) is left for the caller
    /// to skip.
    fn parse_syntax_head(&mut self) -> Result<SyntaxHead, Diagnostic> {
        if self.check_keyword(Keyword::Sequence) && self.peek_nth(1).is_keyword(Keyword::Of) {
            self.advance();
            self.advance();
            let entry = self.expect_identifier()?;
            return Ok(SyntaxHead::SequenceOf(self.ident(entry)));
        }
        if self.check(TokenKind::UppercaseIdent) {
            let token = self.advance();
            return Ok(SyntaxHead::TypeRef(self.ident(token)));
        }
        Ok(SyntaxHead::Other)
    }

    /// Parse a `STATUS` value. Unknown values are reported as warnings.
    fn parse_status(&mut self) -> Option<Status> {
        let token = self.peek();
        if !token.kind.is_identifier() {
            return None;
        }
        self.advance();
        let status = Status::from_keyword(self.text(token.span));
        if status.is_none() {
            let message = format!("unknown STATUS value `{}`", self.text(token.span));
            self.diagnostics.push(Diagnostic::warning(token.span, message));
        }
        status
    }

    /// Parse a TRAP-TYPE `ENTERPRISE` value: a name or an OID value.
    fn parse_enterprise(&mut self) -> Result<OidAssignment, Diagnostic> {
        if self.check(TokenKind::LBrace) {
            return self.parse_oid_assignment();
        }
        let token = self.expect_identifier()?;
        Ok(OidAssignment::from_name(self.ident(token)))
    }

    /// Parse `Name ::= type` or `Name ::= TEXTUAL-CONVENTION ...`.
    fn parse_type_assignment(&mut self) -> Result<Definition, Diagnostic> {
        let name_token = self.advance();
        let name = self.ident(name_token);

        if self.check(TokenKind::ColonColonEqual) {
            self.advance();
        }
        let is_textual_convention = self.check_keyword(Keyword::TextualConvention);
        let is_sequence =
            self.check_keyword(Keyword::Sequence) && self.peek_nth(1).kind == TokenKind::LBrace;

        if is_textual_convention {
            self.advance();
        }
        self.skip_value()?;

        let end = self.tokens[..self.pos]
            .last()
            .map_or(name_token.span.end, |token| token.span.end);

        Ok(Definition::TypeAssignment(TypeAssignment {
            name,
            is_textual_convention,
            is_sequence,
            span: Span::new(name_token.span.start, end),
        }))
    }

    /// Parse `NAME MACRO ::= BEGIN ... END`. The lexer has already skipped
    /// the body, leaving `NAME MACRO END`.
    fn parse_macro_definition(&mut self) -> Result<Definition, Diagnostic> {
        let name_token = self.advance();
        let name = self.ident(name_token);

        self.expect_keyword(Keyword::Macro)?;
        let end_token = self.expect_keyword(Keyword::End)?;

        Ok(Definition::MacroDefinition(MacroDefinition {
            name,
            span: Span::new(name_token.span.start, end_token.span.end),
        }))
    }

    /// Parse OID value: `{ parent subid ... }`.
    fn parse_oid_assignment(&mut self) -> Result<OidAssignment, Diagnostic> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut components = Vec::new();

        while !self.check(TokenKind::RBrace) && !self.is_eof() {
            let token = self.peek();
            match token.kind {
                TokenKind::Number => {
                    self.advance();
                    let value = self.parse_u32(token, "OID component");
                    components.push(OidComponent::Number {
                        value,
                        span: token.span,
                    });
                }
                TokenKind::LowercaseIdent | TokenKind::UppercaseIdent => {
                    self.advance();
                    components.push(self.parse_named_component(token)?);
                }
                _ => return Err(self.error("expected OID component")),
            }
        }

        let close = self.expect(TokenKind::RBrace)?;
        Ok(OidAssignment::new(
            components,
            Span::new(open.span.start, close.span.end),
        ))
    }

    /// Parse the remainder of a component that starts with a name:
    /// `name`, `name(1)`, `Module.name` or `Module.name(1)`.
    fn parse_named_component(&mut self, first: Token) -> Result<OidComponent, Diagnostic> {
        let start = first.span.start;
        let first_name = self.ident(first);

        let (module, name) = if self.check(TokenKind::Dot) {
            self.advance();
            let name_token = self.expect(TokenKind::LowercaseIdent)?;
            (Some(first_name), self.ident(name_token))
        } else {
            (None, first_name)
        };

        if !self.check(TokenKind::LParen) {
            let span = Span::new(start, name.span.end);
            return Ok(match module {
                Some(module) => OidComponent::QualifiedName { module, name, span },
                None => OidComponent::Name(name),
            });
        }

        self.advance();
        let num_token = self.expect(TokenKind::Number)?;
        let number = self.parse_u32(num_token, "OID component");
        let close = self.expect(TokenKind::RParen)?;
        let span = Span::new(start, close.span.end);

        Ok(match module {
            Some(module) => OidComponent::QualifiedNamedNumber {
                module,
                name,
                number,
                span,
            },
            None => OidComponent::NamedNumber { name, number, span },
        })
    }

    /// Skip a bracketed group starting at the current open bracket.
    fn skip_group(&mut self) -> Result<(), Diagnostic> {
        let open = self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            match token.kind {
                TokenKind::Eof => {
                    return Err(Diagnostic::error(open.span, "unbalanced brackets"));
                }
                k if k.is_open() => depth += 1,
                k if k.is_close() => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    /// Skip a type or value body up to the next definition or module END.
    fn skip_value(&mut self) -> Result<(), Diagnostic> {
        let start = self.pos;
        loop {
            if self.is_eof() || self.check_keyword(Keyword::End) || self.at_module_header() {
                return Ok(());
            }
            if self.pos > start && self.at_definition_start() {
                return Ok(());
            }
            if self.peek().kind.is_open() {
                self.skip_group()?;
            } else {
                self.advance();
            }
        }
    }

    /// Recover to the next definition after an error.
    fn recover_to_definition(&mut self) {
        while !self.is_eof()
            && !self.check_keyword(Keyword::End)
            && !self.at_module_header()
            && !self.at_definition_start()
        {
            self.advance();
        }
    }
}

/// Map a macro keyword to the invocation kind it introduces. Textual
/// conventions are type assignments, not invocations.
fn macro_kind(keyword: Keyword) -> Option<MacroKind> {
    let kind = match keyword {
        Keyword::ModuleIdentity => MacroKind::ModuleIdentity,
        Keyword::ObjectIdentity => MacroKind::ObjectIdentity,
        Keyword::ObjectType => MacroKind::ObjectType,
        Keyword::NotificationType => MacroKind::NotificationType,
        Keyword::TrapType => MacroKind::TrapType,
        Keyword::ObjectGroup => MacroKind::ObjectGroup,
        Keyword::NotificationGroup => MacroKind::NotificationGroup,
        Keyword::ModuleCompliance => MacroKind::ModuleCompliance,
        Keyword::AgentCapabilities => MacroKind::AgentCapabilities,
        _ => return None,
    };
    Some(kind)
}

/// Human-readable token description for diagnostics.
fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Keyword(kw) => kw.as_str(),
        TokenKind::ColonColonEqual => "`::=`",
        TokenKind::LBrace => "`{`",
        TokenKind::RBrace => "`}`",
        TokenKind::LParen => "`(`",
        TokenKind::RParen => "`)`",
        TokenKind::Semicolon => "`;`",
        TokenKind::Number => "number",
        TokenKind::UppercaseIdent => "uppercase identifier",
        TokenKind::LowercaseIdent => "lowercase identifier",
        _ => "token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseOutput {
        Parser::new(source.as_bytes()).parse()
    }

    fn parse_one(source: &str) -> Module {
        let output = parse(source);
        assert!(
            !output.has_errors(),
            "unexpected diagnostics: {:?}",
            output.diagnostics
        );
        assert_eq!(output.modules.len(), 1);
        output.modules.into_iter().next().unwrap()
    }

    fn macro_def(def: &Definition) -> &MacroInvocation {
        match def {
            Definition::Macro(inv) => inv,
            other => panic!("expected macro invocation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_module() {
        let module = parse_one("TEST-MIB DEFINITIONS ::= BEGIN END");
        assert_eq!(module.name.name, "TEST-MIB");
        assert_eq!(module.definitions_kind, DefinitionsKind::Definitions);
        assert!(module.body.is_empty());
    }

    #[test]
    fn test_parse_pib_header() {
        let module = parse_one("TEST-PIB PIB-DEFINITIONS ::= BEGIN END");
        assert_eq!(module.definitions_kind, DefinitionsKind::PibDefinitions);
        assert!(module.is_pib());
    }

    #[test]
    fn test_parse_imports() {
        let module = parse_one(
            "TEST-MIB DEFINITIONS ::= BEGIN
            IMPORTS
                MODULE-IDENTITY, OBJECT-TYPE, mib-2 FROM SNMPv2-SMI
                DisplayString FROM SNMPv2-TC;
            END",
        );
        assert_eq!(module.imports.len(), 2);
        assert_eq!(module.imports[0].from_module.name, "SNMPv2-SMI");
        assert_eq!(module.imports[0].symbols.len(), 3);
        assert_eq!(module.imports[1].symbols[0].name, "DisplayString");
        assert_eq!(module.import_source("mib-2").unwrap().name, "SNMPv2-SMI");
        assert!(module.import_source("ifIndex").is_none());
        let sources: Vec<_> = module.imported_modules().collect();
        assert_eq!(sources, ["SNMPv2-SMI", "SNMPv2-TC"]);
    }

    #[test]
    fn test_parse_value_assignment() {
        let module = parse_one(
            "TEST-MIB DEFINITIONS ::= BEGIN
            testRoot OBJECT IDENTIFIER ::= { iso org(3) 6 }
            END",
        );
        let Definition::ValueAssignment(def) = &module.body[0] else {
            panic!("expected value assignment");
        };
        assert_eq!(def.name.name, "testRoot");
        assert_eq!(def.oid.components.len(), 3);
        assert!(matches!(
            def.oid.components[1],
            OidComponent::NamedNumber { number: 3, .. }
        ));
        assert_eq!(def.oid.components[2].number(), Some(6));
    }

    #[test]
    fn test_parse_qualified_components() {
        let module = parse_one(
            "TEST-MIB DEFINITIONS ::= BEGIN
            a OBJECT IDENTIFIER ::= { SNMPv2-SMI.enterprises 9 }
            b OBJECT IDENTIFIER ::= { SNMPv2-SMI.enterprises(1) 9 }
            END",
        );
        let Definition::ValueAssignment(a) = &module.body[0] else {
            panic!("expected value assignment");
        };
        assert!(matches!(
            &a.oid.components[0],
            OidComponent::QualifiedName { module, name, .. }
                if module.name == "SNMPv2-SMI" && name.name == "enterprises"
        ));
        let Definition::ValueAssignment(b) = &module.body[1] else {
            panic!("expected value assignment");
        };
        assert_eq!(b.oid.components[0].number(), Some(1));
    }

    #[test]
    fn test_parse_table_row_column() {
        let module = parse_one(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            testTable OBJECT-TYPE
                SYNTAX SEQUENCE OF TestEntry
                MAX-ACCESS not-accessible
                STATUS current
                DESCRIPTION "A table."
                ::= { testObjects 1 }
            testEntry OBJECT-TYPE
                SYNTAX TestEntry
                MAX-ACCESS not-accessible
                STATUS current
                DESCRIPTION "A row."
                INDEX { testIndex }
                ::= { testTable 1 }
            testIndex OBJECT-TYPE
                SYNTAX INTEGER { up(1), down(2) }
                MAX-ACCESS read-only
                STATUS current
                DESCRIPTION "A column."
                DEFVAL { up }
                ::= { testEntry 1 }
            END"#,
        );
        assert_eq!(module.body.len(), 3);

        let table = macro_def(&module.body[0]);
        assert_eq!(table.kind, MacroKind::ObjectType);
        assert!(matches!(&table.syntax, Some(SyntaxHead::SequenceOf(e)) if e.name == "TestEntry"));
        assert_eq!(table.status, Some(Status::Current));

        let row = macro_def(&module.body[1]);
        assert!(row.has_index);
        assert!(matches!(&row.syntax, Some(SyntaxHead::TypeRef(t)) if t.name == "TestEntry"));

        let column = macro_def(&module.body[2]);
        assert!(!column.has_index);
        assert!(matches!(column.syntax, Some(SyntaxHead::TypeRef(_))));
    }

    #[test]
    fn test_parse_module_identity_with_revisions() {
        let module = parse_one(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            testMIB MODULE-IDENTITY
                LAST-UPDATED "202401010000Z"
                ORGANIZATION "Example"
                CONTACT-INFO "nobody"
                DESCRIPTION "Test module."
                REVISION "202401010000Z"
                DESCRIPTION "Initial."
                ::= { enterprises 99999 }
            END"#,
        );
        let def = macro_def(&module.body[0]);
        assert_eq!(def.kind, MacroKind::ModuleIdentity);
        assert!(matches!(&def.value, MacroValue::Oid(oid) if oid.components.len() == 2));
    }

    #[test]
    fn test_parse_trap_type() {
        let module = parse_one(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            linkDown TRAP-TYPE
                ENTERPRISE snmp
                VARIABLES { ifIndex }
                DESCRIPTION "Link went down."
                ::= 2
            END"#,
        );
        let def = macro_def(&module.body[0]);
        assert_eq!(def.kind, MacroKind::TrapType);
        assert!(matches!(def.value, MacroValue::TrapNumber { value: 2, .. }));
        let enterprise = def.enterprise.as_ref().unwrap();
        assert!(matches!(&enterprise.components[0], OidComponent::Name(n) if n.name == "snmp"));
    }

    #[test]
    fn test_parse_conformance_macros() {
        let module = parse_one(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            testGroup OBJECT-GROUP
                OBJECTS { testIndex }
                STATUS current
                DESCRIPTION "Objects."
                ::= { testGroups 1 }
            testCompliance MODULE-COMPLIANCE
                STATUS current
                DESCRIPTION "Compliance."
                MODULE -- this module
                    MANDATORY-GROUPS { testGroup }
                    OBJECT testIndex
                        SYNTAX INTEGER { up(1) }
                        MIN-ACCESS read-only
                        DESCRIPTION "Read-only is fine."
                ::= { testCompliances 1 }
            testCaps AGENT-CAPABILITIES
                PRODUCT-RELEASE "1.0"
                STATUS current
                DESCRIPTION "Caps."
                SUPPORTS TEST-MIB
                    INCLUDES { testGroup }
                    VARIATION testIndex
                        ACCESS read-only
                        DESCRIPTION "No writes."
                ::= { testCapabilities 1 }
            END"#,
        );
        let kinds: Vec<_> = module.body.iter().map(|d| macro_def(d).kind).collect();
        assert_eq!(
            kinds,
            [
                MacroKind::ObjectGroup,
                MacroKind::ModuleCompliance,
                MacroKind::AgentCapabilities
            ]
        );
    }

    #[test]
    fn test_parse_type_assignments() {
        let module = parse_one(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            TestEntry ::= SEQUENCE {
                testIndex Integer32,
                testName  OCTET STRING
            }
            TestString ::= TEXTUAL-CONVENTION
                DISPLAY-HINT "255a"
                STATUS current
                DESCRIPTION "Text."
                SYNTAX OCTET STRING (SIZE (0..255))
            Counter ::= [APPLICATION 1] IMPLICIT INTEGER (0..4294967295)
            testRoot OBJECT IDENTIFIER ::= { iso 3 }
            END"#,
        );
        assert_eq!(module.body.len(), 4);
        let Definition::TypeAssignment(entry) = &module.body[0] else {
            panic!("expected type assignment");
        };
        assert!(entry.is_sequence);
        let Definition::TypeAssignment(tc) = &module.body[1] else {
            panic!("expected type assignment");
        };
        assert!(tc.is_textual_convention);
        assert!(!tc.is_sequence);
        assert!(matches!(&module.body[3], Definition::ValueAssignment(_)));
    }

    #[test]
    fn test_parse_macro_definition_and_exports() {
        let module = parse_one(
            r#"RFC1155-SMI DEFINITIONS ::= BEGIN
            EXPORTS internet, enterprises;
            OBJECT-TYPE MACRO ::=
            BEGIN
                TYPE NOTATION ::= "SYNTAX" type(TYPE ObjectSyntax)
            END
            NetworkAddress ::= CHOICE { internet IpAddress }
            internet OBJECT IDENTIFIER ::= { iso org(3) dod(6) 1 }
            END"#,
        );
        assert!(matches!(&module.body[0], Definition::MacroDefinition(m) if m.name.name == "OBJECT-TYPE"));
        assert!(matches!(&module.body[2], Definition::ValueAssignment(v) if v.name.name == "internet"));
    }

    #[test]
    fn test_parse_multiple_modules() {
        let output = parse(
            "A-MIB DEFINITIONS ::= BEGIN END
             B-MIB DEFINITIONS ::= BEGIN END",
        );
        assert!(!output.has_errors());
        let names: Vec<_> = output.modules.iter().map(|m| m.name.name.as_str()).collect();
        assert_eq!(names, ["A-MIB", "B-MIB"]);
    }

    #[test]
    fn test_parse_no_module() {
        let output = parse("this is not a MIB at all");
        assert!(output.modules.is_empty());
        assert!(output.has_errors());

        let output = parse("");
        assert!(output.modules.is_empty());
        assert!(!output.has_errors());
    }

    #[test]
    fn test_missing_end_is_error() {
        let output = parse("A-MIB DEFINITIONS ::= BEGIN a OBJECT IDENTIFIER ::= { iso 1 }");
        assert_eq!(output.modules.len(), 1);
        assert_eq!(output.modules[0].body.len(), 1);
        assert!(output.first_error().unwrap().message.contains("END"));
    }

    #[test]
    fn test_recovery_after_bad_definition() {
        let output = parse(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            broken OBJECT IDENTIFIER ::= { iso ; }
            good OBJECT IDENTIFIER ::= { iso 2 }
            END"#,
        );
        assert!(output.has_errors());
        let module = &output.modules[0];
        assert_eq!(module.body.len(), 1);
        assert_eq!(module.body[0].name().name, "good");
    }

    #[test]
    fn test_missing_assignment_does_not_swallow_next_definition() {
        let output = parse(
            r#"TEST-MIB DEFINITIONS ::= BEGIN
            lost OBJECT-TYPE
                SYNTAX Integer32
                MAX-ACCESS read-only
                STATUS current
            kept OBJECT IDENTIFIER ::= { iso 2 }
            END"#,
        );
        assert!(output.has_errors());
        let module = &output.modules[0];
        assert_eq!(module.body.len(), 1);
        assert_eq!(module.body[0].name().name, "kept");
    }
}
