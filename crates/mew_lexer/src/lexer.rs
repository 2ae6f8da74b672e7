//! The Mew lexer.

use mew_core::text::{Location, TextSpan};
use mew_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use mew_syntax::{keyword_kind, SyntaxToken, SyntaxTokenKind, SyntaxTrivia, SyntaxTriviaKind};
use std::sync::Arc;
use tracing::trace;

/// The output of lexing one file.
#[derive(Debug, Clone)]
pub struct LexResult {
    /// Every token in the file. The last one is always `Eof`.
    pub tokens: Vec<SyntaxToken>,
    pub diagnostics: DiagnosticCollection,
}

/// Lex `source`, reporting diagnostics against `path`.
pub fn scan(path: impl Into<Arc<str>>, source: &str) -> LexResult {
    Lexer::new(path.into(), source).scan()
}

/// Converts Mew source text into tokens.
pub struct Lexer<'a> {
    path: Arc<str>,
    source: &'a str,
    /// Byte offset of the next character.
    pos: usize,
    /// Byte offset where the current token started.
    start: usize,
    tokens: Vec<SyntaxToken>,
    diagnostics: DiagnosticCollection,
}

impl<'a> Lexer<'a> {
    pub fn new(path: Arc<str>, source: &'a str) -> Self {
        Self {
            path,
            source,
            pos: 0,
            start: 0,
            tokens: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Lex the whole source text.
    pub fn scan(mut self) -> LexResult {
        while !self.is_at_end() {
            self.start = self.pos;
            self.scan_token();
        }

        if self.tokens.last().map(|t| t.kind) != Some(SyntaxTokenKind::Eof) {
            let eof = SyntaxToken::new(SyntaxTokenKind::Eof, TextSpan::empty(self.pos as u32), "");
            self.tokens.push(eof);
        }

        trace!(
            path = %self.path,
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            "lexed source"
        );

        LexResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    fn scan_token(&mut self) {
        let leading = self.scan_trivia(true);
        self.start = self.pos;

        if self.is_at_end() {
            let mut eof = SyntaxToken::new(SyntaxTokenKind::Eof, TextSpan::empty(self.pos as u32), "");
            eof.leading_trivia = leading;
            self.tokens.push(eof);
            return;
        }

        let Some(c) = self.advance() else {
            return;
        };

        let kind = match c {
            '(' => SyntaxTokenKind::LParen,
            ')' => SyntaxTokenKind::RParen,
            '{' => SyntaxTokenKind::LBrace,
            '}' => SyntaxTokenKind::RBrace,
            ',' => SyntaxTokenKind::Comma,
            '.' => SyntaxTokenKind::Dot,
            '+' => SyntaxTokenKind::Plus,
            ':' => SyntaxTokenKind::Colon,
            ';' => SyntaxTokenKind::Semicolon,
            '*' => SyntaxTokenKind::Star,
            '%' => SyntaxTokenKind::Percent,
            '/' => SyntaxTokenKind::Slash,
            '-' if self.matches('>') => SyntaxTokenKind::Arrow,
            '-' => SyntaxTokenKind::Minus,
            '!' if self.matches('=') => SyntaxTokenKind::BangEqual,
            '!' => SyntaxTokenKind::Bang,
            '=' if self.matches('=') => SyntaxTokenKind::EqualEqual,
            '=' => SyntaxTokenKind::Equal,
            '<' if self.matches('=') => SyntaxTokenKind::LessEqual,
            '<' => SyntaxTokenKind::Less,
            '>' if self.matches('=') => SyntaxTokenKind::GreaterEqual,
            '>' => SyntaxTokenKind::Greater,
            '|' if self.matches('|') => SyntaxTokenKind::Or,
            '&' if self.matches('&') => SyntaxTokenKind::And,
            '|' | '&' => {
                // A lone `|` or `&` produces no token.
                self.error(&messages::UNEXPECTED_CHARACTER, &[c.to_string().as_str()]);
                return;
            }
            '"' => return self.scan_string(leading),
            c if c.is_ascii_digit() => return self.scan_number(leading),
            c if is_alpha(c) => return self.scan_identifier(leading),
            c => {
                self.error(&messages::UNEXPECTED_CHARACTER, &[c.to_string().as_str()]);
                SyntaxTokenKind::Unrecognized
            }
        };

        self.add_token(kind, None, leading);
    }

    fn scan_string(&mut self, leading: Vec<SyntaxTrivia>) {
        while let Some(c) = self.peek() {
            if c == '"' || c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }

        if self.peek() != Some('"') {
            self.error(&messages::UNTERMINATED_STRING_LITERAL, &[]);
            return;
        }

        // Closing quote.
        self.advance();
        let value = self.source[self.start + 1..self.pos - 1].to_string();
        self.add_token(SyntaxTokenKind::String, Some(value), leading);
    }

    fn scan_number(&mut self, leading: Vec<SyntaxTrivia>) {
        self.skip_while(|c| c.is_ascii_digit());

        let mut kind = SyntaxTokenKind::Integer;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            kind = SyntaxTokenKind::Double;
            self.advance();
            self.skip_while(|c| c.is_ascii_digit());
        }

        let text = self.source[self.start..self.pos].to_string();
        self.add_token(kind, Some(text), leading);
    }

    fn scan_identifier(&mut self, leading: Vec<SyntaxTrivia>) {
        self.skip_while(is_alphanumeric);

        let text = &self.source[self.start..self.pos];
        match keyword_kind(text) {
            Some(kind) => self.add_token(kind, None, leading),
            None => {
                let literal = text.to_string();
                self.add_token(SyntaxTokenKind::Identifier, Some(literal), leading);
            }
        }
    }

    fn add_token(&mut self, kind: SyntaxTokenKind, literal: Option<String>, leading: Vec<SyntaxTrivia>) {
        let span = TextSpan::from_bounds(self.start as u32, self.pos as u32);
        let lexeme = self.source[self.start..self.pos].to_string();
        let trailing = self.scan_trivia(false);

        self.tokens.push(SyntaxToken {
            kind,
            span,
            lexeme,
            literal,
            leading_trivia: leading,
            trailing_trivia: trailing,
        });
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Collect whitespace and line breaks. Leading trivia also collects
    /// `//` comments; trailing trivia stops at them so a comment belongs to
    /// the token after it.
    fn scan_trivia(&mut self, leading: bool) -> Vec<SyntaxTrivia> {
        let mut trivia = Vec::new();

        loop {
            let trivia_start = self.pos;
            let kind = match self.peek() {
                Some('\n' | '\r') => {
                    self.skip_while(|c| c == '\n' || c == '\r');
                    SyntaxTriviaKind::NewLine
                }
                Some(' ' | '\t') => {
                    self.skip_while(|c| c == ' ' || c == '\t');
                    SyntaxTriviaKind::Whitespace
                }
                Some('/') if leading && self.peek_next() == Some('/') => {
                    self.skip_line_comment();
                    SyntaxTriviaKind::Comment
                }
                _ => break,
            };

            trivia.push(SyntaxTrivia {
                kind,
                span: TextSpan::from_bounds(trivia_start as u32, self.pos as u32),
                text: self.source[trivia_start..self.pos].to_string(),
            });
        }

        trivia
    }

    /// Move to the end of the line, leaving the line break itself in place.
    fn skip_line_comment(&mut self) {
        let rest = &self.source.as_bytes()[self.pos..];
        self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Report a diagnostic covering the text consumed for the current token.
    fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(self.start as u32, self.pos as u32);
        let location = Location::new(Arc::clone(&self.path), span);
        self.diagnostics.add(Diagnostic::new(location, message, args));
    }
}

#[inline]
fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_eof() {
        let result = scan("test.mew", "");
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, SyntaxTokenKind::Eof);
        assert_eq!(result.tokens[0].span, TextSpan::empty(0));
    }

    #[test]
    fn test_trailing_trivia_only_whitespace() {
        let result = scan("test.mew", "a // note\nb");
        let a = &result.tokens[0];
        assert_eq!(a.trailing_trivia.len(), 1);
        assert_eq!(a.trailing_trivia[0].kind, SyntaxTriviaKind::Whitespace);

        let b = &result.tokens[1];
        let kinds: Vec<SyntaxTriviaKind> = b.leading_trivia.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![SyntaxTriviaKind::Comment, SyntaxTriviaKind::NewLine]);
        assert_eq!(b.leading_trivia[0].text, "// note");
    }
}
