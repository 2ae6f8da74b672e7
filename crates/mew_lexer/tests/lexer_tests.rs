//! Lexer integration tests.
//!
//! Verifies that the lexer tokenizes Mew constructs, attaches trivia and
//! reports lexical diagnostics without stopping.

use mew_lexer::scan;
use mew_syntax::{SyntaxTokenKind, SyntaxTriviaKind};

/// Helper: lex source and return (kind, lexeme) pairs, excluding `Eof`.
fn lex_all(source: &str) -> Vec<(SyntaxTokenKind, String)> {
    scan("test.mew", source)
        .tokens
        .into_iter()
        .filter(|t| t.kind != SyntaxTokenKind::Eof)
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

/// Helper: lex source and return the token kinds, excluding `Eof`.
fn lex_kinds(source: &str) -> Vec<SyntaxTokenKind> {
    lex_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: lex source and return the rendered diagnostic summaries.
fn lex_errors(source: &str) -> Vec<String> {
    scan("test.mew", source)
        .diagnostics
        .iter()
        .map(|d| d.summary())
        .collect()
}

// ============================================================================
// Tokens
// ============================================================================

#[test]
fn test_whitespace_only() {
    let result = scan("test.mew", "   \n\t  ");
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].kind, SyntaxTokenKind::Eof);
    assert_eq!(result.tokens[0].leading_trivia.len(), 3);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_punctuation() {
    use SyntaxTokenKind::*;
    assert_eq!(
        lex_kinds("( ) { } , . - + : ; / * %"),
        vec![LParen, RParen, LBrace, RBrace, Comma, Dot, Minus, Plus, Colon, Semicolon, Slash, Star, Percent]
    );
}

#[test]
fn test_two_character_operators_are_greedy() {
    use SyntaxTokenKind::*;
    assert_eq!(
        lex_kinds("-> != == <= >= && ||"),
        vec![Arrow, BangEqual, EqualEqual, LessEqual, GreaterEqual, And, Or]
    );
    assert_eq!(lex_kinds("! = < > -"), vec![Bang, Equal, Less, Greater, Minus]);
    assert_eq!(lex_kinds("a->b"), vec![Identifier, Arrow, Identifier]);
}

#[test]
fn test_keywords() {
    use SyntaxTokenKind::*;
    assert_eq!(
        lex_kinds("fn return let loop if else break continue while extern true false and or"),
        vec![Fn, Return, Let, Loop, If, Else, Break, Continue, While, Extern, True, False, And, Or]
    );
}

#[test]
fn test_identifiers() {
    let tokens = scan("test.mew", "corgi _waldo x1 fnord").tokens;
    assert_eq!(tokens[0].kind, SyntaxTokenKind::Identifier);
    assert_eq!(tokens[0].literal.as_deref(), Some("corgi"));
    assert_eq!(tokens[1].lexeme, "_waldo");
    assert_eq!(tokens[2].lexeme, "x1");
    assert_eq!(tokens[3].kind, SyntaxTokenKind::Identifier);
}

#[test]
fn test_numeric_literals() {
    let tokens = scan("test.mew", "42 3.14 7.").tokens;
    assert_eq!(tokens[0].kind, SyntaxTokenKind::Integer);
    assert_eq!(tokens[0].literal.as_deref(), Some("42"));
    assert_eq!(tokens[1].kind, SyntaxTokenKind::Double);
    assert_eq!(tokens[1].literal.as_deref(), Some("3.14"));
    // A dot without a fractional part is not part of the number.
    assert_eq!(tokens[2].kind, SyntaxTokenKind::Integer);
    assert_eq!(tokens[3].kind, SyntaxTokenKind::Dot);
}

#[test]
fn test_string_literal() {
    let tokens = scan("test.mew", "\"Hello World\"").tokens;
    assert_eq!(tokens[0].kind, SyntaxTokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"Hello World\"");
    assert_eq!(tokens[0].literal.as_deref(), Some("Hello World"));
    assert_eq!(tokens[0].span.length, 13);
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = scan("test.mew", "let x = 1;").tokens;
    let spans: Vec<(u32, u32)> = tokens.iter().map(|t| (t.span.start, t.span.end())).collect();
    assert_eq!(spans, vec![(0, 3), (4, 5), (6, 7), (8, 9), (9, 10), (10, 10)]);
}

// ============================================================================
// Trivia
// ============================================================================

#[test]
fn test_trailing_newline_trivia() {
    let tokens = scan("test.mew", "foo\n  bar").tokens;
    assert!(tokens[0].has_trailing_newline());
    assert!(!tokens[1].has_trailing_newline());
    assert!(tokens[1].leading_trivia.is_empty());
}

#[test]
fn test_comment_is_leading_trivia() {
    let result = scan("test.mew", "// hello\nlet");
    assert_eq!(result.tokens.len(), 2);
    let let_token = &result.tokens[0];
    assert_eq!(let_token.kind, SyntaxTokenKind::Let);
    assert_eq!(let_token.leading_trivia[0].kind, SyntaxTriviaKind::Comment);
    assert_eq!(let_token.leading_trivia[1].kind, SyntaxTriviaKind::NewLine);
}

#[test]
fn test_comment_at_end_of_file_belongs_to_eof() {
    let result = scan("test.mew", "x; // done");
    let eof = result.tokens.last().map(|t| (t.kind, t.leading_trivia.len()));
    assert_eq!(eof, Some((SyntaxTokenKind::Eof, 1)));
}

#[test]
fn test_crlf_is_one_newline_run() {
    let tokens = scan("test.mew", "a\r\n\r\nb").tokens;
    assert_eq!(tokens[0].trailing_trivia.len(), 1);
    assert_eq!(tokens[0].trailing_trivia[0].text, "\r\n\r\n");
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_lone_pipe_and_ampersand_produce_no_token() {
    assert_eq!(lex_kinds("a | b & c").len(), 3);
    assert_eq!(
        lex_errors("a | b & c"),
        vec!["Error: Unexpected character '|'", "Error: Unexpected character '&'"]
    );
}

#[test]
fn test_unexpected_character_produces_unrecognized_token() {
    let result = scan("test.mew", "let @ = 1;");
    assert_eq!(result.tokens[1].kind, SyntaxTokenKind::Unrecognized);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics.diagnostics()[0].code, 2004);
    assert_eq!(result.diagnostics.diagnostics()[0].span().start, 4);
}

#[test]
fn test_unterminated_string_stops_at_line_break() {
    let result = scan("test.mew", "let s = \"abc\nlet t = 1;");
    assert_eq!(lex_errors("let s = \"abc\nlet t = 1;"), vec!["Error: Unterminated string literal"]);
    let diagnostic = &result.diagnostics.diagnostics()[0];
    assert_eq!((diagnostic.span().start, diagnostic.span().end()), (8, 12));
    // Lexing continues on the next line.
    assert!(result.tokens.iter().any(|t| t.lexeme == "t"));
}

#[test]
fn test_unterminated_string_at_end_of_file() {
    assert_eq!(lex_errors("\"abc"), vec!["Error: Unterminated string literal"]);
}

#[test]
fn test_always_ends_with_eof() {
    for source in ["", "fn", "\"", "|", "@@@", "let x = 1; // trailing", "\n\n"] {
        let tokens = scan("test.mew", source).tokens;
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxTokenKind::Eof), "{source:?}");
        assert_eq!(tokens.iter().filter(|t| t.kind == SyntaxTokenKind::Eof).count(), 1);
    }
}

#[test]
fn test_non_ascii_letters_are_unexpected() {
    let result = scan("test.mew", "é");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.tokens[0].span.length, 2);
}
