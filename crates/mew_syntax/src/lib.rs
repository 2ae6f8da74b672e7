//! mew_syntax: Tokens, trivia and syntax tree definitions for Mew.
//!
//! The lexer produces [`SyntaxToken`]s, the parser assembles them into the
//! node types of [`node`]. Nodes are immutable once built; malformed source
//! is represented by [`RecoverySyntax`] placeholders rather than by missing
//! nodes, so every consumer sees a complete tree.

pub mod dump;
pub mod node;
pub mod token;
pub mod types;
pub mod visitor;

pub use node::*;
pub use token::{keyword_kind, SyntaxToken, SyntaxTokenKind, SyntaxTrivia, SyntaxTriviaKind};
pub use types::{NodeFlags, NodeId};
pub use visitor::{walk_expression, walk_statement, SyntaxVisitor};

use mew_core::text::TextSpan;

/// Behavior shared by tokens and syntax nodes.
pub trait SyntaxNode {
    fn span(&self) -> TextSpan;

    /// False for recovery placeholders and anything built from one.
    fn is_valid(&self) -> bool;

    /// Whether the parser made this node up during error recovery.
    fn is_synthesized(&self) -> bool {
        false
    }
}
