//! Tokens and trivia produced by the lexer.

use crate::SyntaxNode;
use mew_core::text::TextSpan;
use std::fmt;

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxTokenKind {
    /// Never produced by the lexer. Used by the parser as the
    /// "next token is preceded by a line break" recovery terminator.
    NewLine,
    Unrecognized,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Colon,
    Semicolon,
    Slash,
    Star,
    Percent,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Arrow,

    // Logical operators, spelled `and`/`&&` and `or`/`||`
    And,
    Or,

    // Literals
    Identifier,
    String,
    Integer,
    Double,
    True,
    False,

    // Keywords
    Fn,
    Return,
    Let,
    Loop,
    If,
    Else,
    Break,
    Continue,
    While,
    Extern,

    Eof,
}

impl SyntaxTokenKind {
    /// Whether this kind is produced from a reserved word.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxTokenKind::And
                | SyntaxTokenKind::Or
                | SyntaxTokenKind::True
                | SyntaxTokenKind::False
                | SyntaxTokenKind::Fn
                | SyntaxTokenKind::Return
                | SyntaxTokenKind::Let
                | SyntaxTokenKind::Loop
                | SyntaxTokenKind::If
                | SyntaxTokenKind::Else
                | SyntaxTokenKind::Break
                | SyntaxTokenKind::Continue
                | SyntaxTokenKind::While
                | SyntaxTokenKind::Extern
        )
    }
}

impl fmt::Display for SyntaxTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Reclassify an identifier lexeme as a keyword, if it is one.
pub fn keyword_kind(text: &str) -> Option<SyntaxTokenKind> {
    let kind = match text {
        "and" => SyntaxTokenKind::And,
        "break" => SyntaxTokenKind::Break,
        "continue" => SyntaxTokenKind::Continue,
        "else" => SyntaxTokenKind::Else,
        "extern" => SyntaxTokenKind::Extern,
        "false" => SyntaxTokenKind::False,
        "fn" => SyntaxTokenKind::Fn,
        "if" => SyntaxTokenKind::If,
        "let" => SyntaxTokenKind::Let,
        "loop" => SyntaxTokenKind::Loop,
        "or" => SyntaxTokenKind::Or,
        "return" => SyntaxTokenKind::Return,
        "true" => SyntaxTokenKind::True,
        "while" => SyntaxTokenKind::While,
        _ => return None,
    };
    Some(kind)
}

/// The kind of a piece of trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxTriviaKind {
    Whitespace,
    NewLine,
    Comment,
}

/// Whitespace, line breaks or comments attached to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTrivia {
    pub kind: SyntaxTriviaKind,
    pub span: TextSpan,
    pub text: String,
}

/// A lexed token with its surrounding trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxTokenKind,
    pub span: TextSpan,
    /// The source text of the token.
    pub lexeme: String,
    /// The literal payload: a string's contents or a number's text.
    pub literal: Option<String>,
    pub leading_trivia: Vec<SyntaxTrivia>,
    pub trailing_trivia: Vec<SyntaxTrivia>,
}

impl SyntaxToken {
    pub fn new(kind: SyntaxTokenKind, span: TextSpan, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
            literal: None,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    #[inline]
    pub fn is_kind(&self, kind: SyntaxTokenKind) -> bool {
        self.kind == kind
    }

    /// Whether the trivia following this token contains a line break.
    pub fn has_trailing_newline(&self) -> bool {
        self.trailing_trivia
            .iter()
            .any(|trivia| trivia.kind == SyntaxTriviaKind::NewLine)
    }
}

impl SyntaxNode for SyntaxToken {
    #[inline]
    fn span(&self) -> TextSpan {
        self.span
    }

    #[inline]
    fn is_valid(&self) -> bool {
        true
    }
}
