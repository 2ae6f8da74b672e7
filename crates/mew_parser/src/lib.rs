//! mew_parser: Recursive descent parser for Mew.
//!
//! Turns the token stream produced by `mew_lexer` into an owned syntax tree.
//! Malformed input never stops the parse: every required piece of syntax is
//! parsed under a recovery policy that skips to a safe token and leaves a
//! `RecoverySyntax` placeholder behind.

mod parser;
mod precedence;
mod reader;
mod recovery;
mod syntax_tree;

pub use parser::{ParseOptions, Parser, DEFAULT_MAX_SYNCHRONIZATIONS};
pub use syntax_tree::SyntaxTree;
