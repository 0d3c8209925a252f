//! MIB lexer module.
//!
//! Tokenizes SMIv1/SMIv2 MIB source bytes into a token stream. Input is
//! treated as bytes because MIB files in the wild are frequently Latin-1.

// Source size is limited to u32::MAX bytes.
#![allow(clippy::cast_possible_truncation)]

mod keyword;
mod token;

pub use keyword::lookup_keyword;
pub use token::{Keyword, Span, Token, TokenKind};

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Byte offset into source text.
pub type ByteOffset = u32;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The input is malformed; a load reporting one fails.
    Error,
    /// Informational; processing continues.
    Warning,
}

/// A diagnostic message from the lexer, parser or resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Location in source text.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    #[must_use]
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            message: message.into(),
        }
    }

    /// Check if this diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Maps byte offsets to 1-based line and column numbers.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build the index for a source buffer.
    #[must_use]
    pub fn new(source: &[u8]) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 40 + 1);
        line_starts.push(0);
        for (i, &b) in source.iter().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to `(line, column)`, both 1-based.
    #[must_use]
    pub fn line_col(&self, offset: ByteOffset) -> (usize, usize) {
        let offset = offset as usize;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        (line_idx + 1, offset - self.line_starts[line_idx] + 1)
    }
}

/// Lexer state for skip modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexerState {
    /// Normal tokenization.
    Normal,
    /// After MACRO; skip until END.
    InMacro,
    /// After EXPORTS; skip until semicolon.
    InExports,
    /// After CHOICE; skip until closing brace.
    InChoice,
}

/// MIB lexer.
///
/// The lexer is lenient and collects diagnostics rather than failing early.
pub struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    state: LexerState,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source bytes.
    #[must_use]
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            source,
            pos: 0,
            state: LexerState::Normal,
            diagnostics: Vec::new(),
        }
    }

    /// Get a reference to collected diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tokenize the entire source. The returned stream always ends in `Eof`.
    #[must_use]
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::with_capacity(self.source.len() / 6 + 1);
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        match self.state {
            LexerState::Normal => self.next_normal_token(),
            LexerState::InMacro => self.skip_macro_body(),
            LexerState::InExports => self.skip_until(b';', TokenKind::Semicolon),
            LexerState::InChoice => self.skip_until(b'}', TokenKind::RBrace),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn at_comment_start(&self) -> bool {
        self.peek() == Some(b'-') && self.peek_at(1) == Some(b'-')
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as ByteOffset, self.pos as ByteOffset)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.span_from(start))
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        self.token(kind, start)
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c) => self.pos += 1,
                Some(b'-') if self.peek_at(1) == Some(b'-') => self.skip_comment(),
                _ => break,
            }
        }
    }

    /// Skip a `--` comment. It ends at end of line or at the next `--`.
    fn skip_comment(&mut self) {
        self.pos += 2;
        loop {
            match self.peek() {
                None | Some(b'\n' | b'\r') => return,
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    self.pos += 2;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn next_normal_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let Some(b) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };

        match b {
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'|' => self.single(TokenKind::Pipe),
            b'.' => {
                if self.peek_at(1) == Some(b'.') {
                    self.pos += 2;
                    self.token(TokenKind::DotDot, start)
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            b':' => {
                if self.peek_at(1) == Some(b':') && self.peek_at(2) == Some(b'=') {
                    self.pos += 3;
                    self.token(TokenKind::ColonColonEqual, start)
                } else {
                    self.single(TokenKind::Colon)
                }
            }
            b'-' => {
                if self.peek_at(1).is_some_and(|next| next.is_ascii_digit()) {
                    self.pos += 1;
                    self.scan_digits(start);
                    self.token(TokenKind::NegativeNumber, start)
                } else {
                    self.single(TokenKind::Minus)
                }
            }
            b'0'..=b'9' => {
                self.scan_digits(start);
                self.token(TokenKind::Number, start)
            }
            b'"' => self.scan_quoted_string(),
            b'\'' => self.scan_hex_or_bin_string(),
            b if b.is_ascii_alphabetic() => self.scan_word(),
            _ => {
                self.pos += 1;
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    span,
                    format!("unexpected character: {:?}", b as char),
                ));
                self.token(TokenKind::Error, start)
            }
        }
    }

    /// Consume a run of digits starting at the current position.
    fn scan_digits(&mut self, start: usize) {
        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos - digits_start > 1 && self.source[digits_start] == b'0' {
            let span = self.span_from(start);
            self.diagnostics
                .push(Diagnostic::warning(span, "leading zeros in number"));
        }
    }

    /// Scan an identifier or keyword: `[A-Za-z][A-Za-z0-9_-]*`, never
    /// swallowing a `--` comment marker.
    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        let is_uppercase = self.source[start].is_ascii_uppercase();
        self.pos += 1;

        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' || (b == b'-' && !self.at_comment_start()) {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text = &self.source[start..self.pos];
        if text.last() == Some(&b'-') {
            let span = self.span_from(start);
            self.diagnostics.push(Diagnostic::warning(
                span,
                format!(
                    "identifier ends in hyphen: {}",
                    String::from_utf8_lossy(text)
                ),
            ));
        }

        if let Some(kw) = lookup_keyword(text) {
            self.state = match kw {
                Keyword::Macro => LexerState::InMacro,
                Keyword::Exports => LexerState::InExports,
                Keyword::Choice => LexerState::InChoice,
                _ => LexerState::Normal,
            };
            return self.token(TokenKind::Keyword(kw), start);
        }

        let kind = if is_uppercase {
            TokenKind::UppercaseIdent
        } else {
            TokenKind::LowercaseIdent
        };
        self.token(kind, start)
    }

    fn scan_quoted_string(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == b'"' {
                return self.token(TokenKind::QuotedString, start);
            }
        }
        let span = self.span_from(start);
        self.diagnostics
            .push(Diagnostic::error(span, "unterminated string literal"));
        self.token(TokenKind::QuotedString, start)
    }

    fn scan_hex_or_bin_string(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;

        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b != b'\'') {
            self.pos += 1;
        }
        let digits_end = self.pos;

        if self.peek() != Some(b'\'') {
            let span = self.span_from(start);
            self.diagnostics
                .push(Diagnostic::error(span, "unterminated hex/binary string"));
            return self.token(TokenKind::Error, start);
        }
        self.pos += 1;

        let digits = &self.source[digits_start..digits_end];
        let (kind, valid) = match self.peek() {
            Some(b'H' | b'h') => (
                TokenKind::HexString,
                digits
                    .iter()
                    .all(|b| b.is_ascii_hexdigit() || b.is_ascii_whitespace()),
            ),
            Some(b'B' | b'b') => (
                TokenKind::BinString,
                digits
                    .iter()
                    .all(|b| matches!(b, b'0' | b'1') || b.is_ascii_whitespace()),
            ),
            _ => {
                let span = self.span_from(start);
                self.diagnostics.push(Diagnostic::error(
                    span,
                    "expected 'H' or 'B' suffix for hex/binary string",
                ));
                return self.token(TokenKind::Error, start);
            }
        };
        self.pos += 1;

        if !valid {
            let span = self.span_from(start);
            self.diagnostics
                .push(Diagnostic::warning(span, "invalid digit in hex/binary string"));
        }
        self.token(kind, start)
    }

    /// Skip a MACRO body word by word until a standalone `END`.
    fn skip_macro_body(&mut self) -> Token {
        loop {
            self.skip_trivia();
            let start = self.pos;
            match self.peek() {
                None => {
                    self.state = LexerState::Normal;
                    return self.token(TokenKind::Eof, start);
                }
                Some(b'"') => {
                    let _ = self.scan_quoted_string();
                }
                Some(b) if b.is_ascii_alphabetic() => {
                    while self
                        .peek()
                        .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
                    {
                        self.pos += 1;
                    }
                    if &self.source[start..self.pos] == b"END" {
                        self.state = LexerState::Normal;
                        return self.token(TokenKind::Keyword(Keyword::End), start);
                    }
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Skip raw bytes up to and including `terminator`, emitting it as `kind`.
    fn skip_until(&mut self, terminator: u8, kind: TokenKind) -> Token {
        loop {
            if self.at_comment_start() {
                self.skip_comment();
                continue;
            }
            let start = self.pos;
            match self.peek() {
                None => {
                    self.state = LexerState::Normal;
                    return self.token(TokenKind::Eof, start);
                }
                Some(b) if b == terminator => {
                    self.pos += 1;
                    self.state = LexerState::Normal;
                    return self.token(kind, start);
                }
                Some(_) => self.pos += 1,
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
