//! Cursor over the lexed token list.

use mew_syntax::{SyntaxToken, SyntaxTokenKind};

/// Walks a token list that always ends with `Eof`.
///
/// The cursor never moves past the last token, so `peek` is always valid.
pub(crate) struct TokenReader {
    tokens: Vec<SyntaxToken>,
    position: usize,
}

impl TokenReader {
    pub fn new(mut tokens: Vec<SyntaxToken>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(SyntaxTokenKind::Eof) {
            let end = tokens.last().map(|t| t.span.end()).unwrap_or(0);
            tokens.push(SyntaxToken::new(
                SyntaxTokenKind::Eof,
                mew_core::text::TextSpan::empty(end),
                "",
            ));
        }
        Self { tokens, position: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len() || self.peek().kind == SyntaxTokenKind::Eof
    }

    #[inline]
    pub fn peek(&self) -> &SyntaxToken {
        let index = self.position.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// The token before the cursor. At the start of input this is the first
    /// token.
    #[inline]
    pub fn previous(&self) -> &SyntaxToken {
        &self.tokens[self.position.saturating_sub(1).min(self.tokens.len() - 1)]
    }

    #[inline]
    pub fn token_at(&self, position: usize) -> &SyntaxToken {
        &self.tokens[position.min(self.tokens.len() - 1)]
    }

    pub fn slice(&self, start: usize, end: usize) -> &[SyntaxToken] {
        let end = end.min(self.tokens.len());
        &self.tokens[start.min(end)..end]
    }

    /// Whether the current token has `kind`. Always false at the end.
    #[inline]
    pub fn check(&self, kind: SyntaxTokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub fn check_any(&self, kinds: &[SyntaxTokenKind]) -> bool {
        !self.is_at_end() && kinds.contains(&self.peek().kind)
    }

    /// Consume the current token if it has `kind`.
    pub fn matches(&mut self, kind: SyntaxTokenKind) -> bool {
        if self.check(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    pub fn matches_any(&mut self, kinds: &[SyntaxTokenKind]) -> bool {
        if self.check_any(kinds) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consume the current token and return it. At the end the cursor stays
    /// put and the previous token is returned.
    pub fn advance(&mut self) -> SyntaxToken {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous().clone()
    }

    /// Move the cursor onto `Eof`.
    pub fn skip_to_end(&mut self) {
        self.position = self.tokens.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(source: &str) -> TokenReader {
        TokenReader::new(mew_lexer::scan("test.mew", source).tokens)
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut reader = reader("a");
        assert_eq!(reader.advance().lexeme, "a");
        assert!(reader.is_at_end());
        reader.advance();
        reader.advance();
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.peek().kind, SyntaxTokenKind::Eof);
    }

    #[test]
    fn test_check_is_false_at_end() {
        let mut reader = reader("");
        assert!(!reader.check(SyntaxTokenKind::Eof));
        assert!(!reader.matches(SyntaxTokenKind::Eof));
    }

    #[test]
    fn test_matches_any_consumes_one_token() {
        let mut reader = reader("+ -");
        assert!(reader.matches_any(&[SyntaxTokenKind::Minus, SyntaxTokenKind::Plus]));
        assert_eq!(reader.previous().kind, SyntaxTokenKind::Plus);
        assert_eq!(reader.peek().kind, SyntaxTokenKind::Minus);
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let reader = TokenReader::new(Vec::new());
        assert_eq!(reader.len(), 1);
        assert!(reader.is_at_end());
    }
}
