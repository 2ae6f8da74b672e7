//! Operator precedence for binary operators.

use mew_syntax::SyntaxTokenKind;

/// Operator precedence levels, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    Assignment = 1,
    LogicalOr = 2,
    LogicalAnd = 3,
    Equality = 4,
    Comparison = 5,
    Additive = 6,
    Multiplicative = 7,
    Unary = 8,
    Invalid = 255,
}

/// Get the binary operator precedence for a given token kind.
///
/// `and`/`or` are listed for completeness; the parser handles them in their
/// own right-recursive rules before falling through to precedence climbing.
pub fn get_binary_operator_precedence(kind: SyntaxTokenKind) -> OperatorPrecedence {
    match kind {
        SyntaxTokenKind::Or => OperatorPrecedence::LogicalOr,
        SyntaxTokenKind::And => OperatorPrecedence::LogicalAnd,
        SyntaxTokenKind::EqualEqual | SyntaxTokenKind::BangEqual => OperatorPrecedence::Equality,
        SyntaxTokenKind::Greater
        | SyntaxTokenKind::GreaterEqual
        | SyntaxTokenKind::Less
        | SyntaxTokenKind::LessEqual => OperatorPrecedence::Comparison,
        SyntaxTokenKind::Plus | SyntaxTokenKind::Minus => OperatorPrecedence::Additive,
        SyntaxTokenKind::Star | SyntaxTokenKind::Slash | SyntaxTokenKind::Percent => {
            OperatorPrecedence::Multiplicative
        }
        _ => OperatorPrecedence::Invalid,
    }
}
