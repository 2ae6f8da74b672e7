//! mew_lexer: Lexer for Mew source text.
//!
//! Converts source text into a complete token stream. Whitespace, line
//! breaks and `//` comments are kept as trivia on the adjacent tokens.
//! Malformed input never stops the lexer: it reports a diagnostic and
//! carries on, and the stream always ends with an `Eof` token.

mod lexer;

pub use lexer::{scan, LexResult, Lexer};
