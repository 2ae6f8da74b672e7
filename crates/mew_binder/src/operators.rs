//! Operator tables.
//!
//! Operators bind by exact operand types. There is no implicit promotion:
//! an operator is defined for a pair of types only when the table has an
//! entry for that pair.

use crate::symbols::TypeId;
use mew_syntax::SyntaxTokenKind;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperatorKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl BinaryOperatorKind {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperatorKind::Addition => "+",
            BinaryOperatorKind::Subtraction => "-",
            BinaryOperatorKind::Multiplication => "*",
            BinaryOperatorKind::Division => "/",
            BinaryOperatorKind::Modulo => "%",
            BinaryOperatorKind::Equal => "==",
            BinaryOperatorKind::NotEqual => "!=",
            BinaryOperatorKind::Less => "<",
            BinaryOperatorKind::LessOrEqual => "<=",
            BinaryOperatorKind::Greater => ">",
            BinaryOperatorKind::GreaterOrEqual => ">=",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LogicalOperatorKind {
    And,
    Or,
}

impl LogicalOperatorKind {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOperatorKind::And => "and",
            LogicalOperatorKind::Or => "or",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOperatorKind {
    LogicalNegation,
    Negation,
}

impl UnaryOperatorKind {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperatorKind::LogicalNegation => "!",
            UnaryOperatorKind::Negation => "-",
        }
    }
}

// ============================================================================
// Binary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundBinaryOperator {
    pub token: SyntaxTokenKind,
    pub kind: BinaryOperatorKind,
    pub left: TypeId,
    pub right: TypeId,
    pub result: TypeId,
}

const fn binary(
    token: SyntaxTokenKind,
    kind: BinaryOperatorKind,
    operand: TypeId,
    result: TypeId,
) -> BoundBinaryOperator {
    BoundBinaryOperator {
        token,
        kind,
        left: operand,
        right: operand,
        result,
    }
}

static BINARY_OPERATORS: [BoundBinaryOperator; 16] = [
    // int
    binary(SyntaxTokenKind::Plus, BinaryOperatorKind::Addition, TypeId::INT, TypeId::INT),
    binary(SyntaxTokenKind::Minus, BinaryOperatorKind::Subtraction, TypeId::INT, TypeId::INT),
    binary(SyntaxTokenKind::Star, BinaryOperatorKind::Multiplication, TypeId::INT, TypeId::INT),
    binary(SyntaxTokenKind::Slash, BinaryOperatorKind::Division, TypeId::INT, TypeId::INT),
    binary(SyntaxTokenKind::Percent, BinaryOperatorKind::Modulo, TypeId::INT, TypeId::INT),
    binary(SyntaxTokenKind::EqualEqual, BinaryOperatorKind::Equal, TypeId::INT, TypeId::BOOL),
    binary(SyntaxTokenKind::BangEqual, BinaryOperatorKind::NotEqual, TypeId::INT, TypeId::BOOL),
    binary(SyntaxTokenKind::Less, BinaryOperatorKind::Less, TypeId::INT, TypeId::BOOL),
    binary(SyntaxTokenKind::LessEqual, BinaryOperatorKind::LessOrEqual, TypeId::INT, TypeId::BOOL),
    binary(SyntaxTokenKind::Greater, BinaryOperatorKind::Greater, TypeId::INT, TypeId::BOOL),
    binary(SyntaxTokenKind::GreaterEqual, BinaryOperatorKind::GreaterOrEqual, TypeId::INT, TypeId::BOOL),
    // bool
    binary(SyntaxTokenKind::EqualEqual, BinaryOperatorKind::Equal, TypeId::BOOL, TypeId::BOOL),
    binary(SyntaxTokenKind::BangEqual, BinaryOperatorKind::NotEqual, TypeId::BOOL, TypeId::BOOL),
    // string
    binary(SyntaxTokenKind::Plus, BinaryOperatorKind::Addition, TypeId::STRING, TypeId::STRING),
    binary(SyntaxTokenKind::EqualEqual, BinaryOperatorKind::Equal, TypeId::STRING, TypeId::BOOL),
    binary(SyntaxTokenKind::BangEqual, BinaryOperatorKind::NotEqual, TypeId::STRING, TypeId::BOOL),
];

impl BoundBinaryOperator {
    /// Find the operator for `token` applied to `left` and `right`.
    pub fn bind(token: SyntaxTokenKind, left: TypeId, right: TypeId) -> Option<&'static BoundBinaryOperator> {
        BINARY_OPERATORS
            .iter()
            .find(|op| op.token == token && op.left == left && op.right == right)
    }
}

// ============================================================================
// Logical
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLogicalOperator {
    pub token: SyntaxTokenKind,
    pub kind: LogicalOperatorKind,
    pub left: TypeId,
    pub right: TypeId,
    pub result: TypeId,
}

static LOGICAL_OPERATORS: [BoundLogicalOperator; 2] = [
    BoundLogicalOperator {
        token: SyntaxTokenKind::And,
        kind: LogicalOperatorKind::And,
        left: TypeId::BOOL,
        right: TypeId::BOOL,
        result: TypeId::BOOL,
    },
    BoundLogicalOperator {
        token: SyntaxTokenKind::Or,
        kind: LogicalOperatorKind::Or,
        left: TypeId::BOOL,
        right: TypeId::BOOL,
        result: TypeId::BOOL,
    },
];

impl BoundLogicalOperator {
    pub fn bind(token: SyntaxTokenKind, left: TypeId, right: TypeId) -> Option<&'static BoundLogicalOperator> {
        LOGICAL_OPERATORS
            .iter()
            .find(|op| op.token == token && op.left == left && op.right == right)
    }
}

// ============================================================================
// Unary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundUnaryOperator {
    pub token: SyntaxTokenKind,
    pub kind: UnaryOperatorKind,
    pub operand: TypeId,
    pub result: TypeId,
}

static UNARY_OPERATORS: [BoundUnaryOperator; 2] = [
    BoundUnaryOperator {
        token: SyntaxTokenKind::Bang,
        kind: UnaryOperatorKind::LogicalNegation,
        operand: TypeId::BOOL,
        result: TypeId::BOOL,
    },
    BoundUnaryOperator {
        token: SyntaxTokenKind::Minus,
        kind: UnaryOperatorKind::Negation,
        operand: TypeId::INT,
        result: TypeId::INT,
    },
];

impl BoundUnaryOperator {
    pub fn bind(token: SyntaxTokenKind, operand: TypeId) -> Option<&'static BoundUnaryOperator> {
        UNARY_OPERATORS
            .iter()
            .find(|op| op.token == token && op.operand == operand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_arithmetic_and_comparison() {
        let add = BoundBinaryOperator::bind(SyntaxTokenKind::Plus, TypeId::INT, TypeId::INT).unwrap();
        assert_eq!(add.kind, BinaryOperatorKind::Addition);
        assert_eq!(add.result, TypeId::INT);

        let less = BoundBinaryOperator::bind(SyntaxTokenKind::Less, TypeId::INT, TypeId::INT).unwrap();
        assert_eq!(less.result, TypeId::BOOL);
    }

    #[test]
    fn test_no_implicit_promotion() {
        assert!(BoundBinaryOperator::bind(SyntaxTokenKind::Plus, TypeId::INT, TypeId::BOOL).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxTokenKind::Plus, TypeId::INT, TypeId::STRING).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxTokenKind::Less, TypeId::STRING, TypeId::STRING).is_none());
        assert!(BoundBinaryOperator::bind(SyntaxTokenKind::Plus, TypeId::BOOL, TypeId::BOOL).is_none());
    }

    #[test]
    fn test_string_concatenation() {
        let concat = BoundBinaryOperator::bind(SyntaxTokenKind::Plus, TypeId::STRING, TypeId::STRING).unwrap();
        assert_eq!(concat.result, TypeId::STRING);
    }

    #[test]
    fn test_logical_operators_require_bool() {
        assert!(BoundLogicalOperator::bind(SyntaxTokenKind::And, TypeId::BOOL, TypeId::BOOL).is_some());
        assert!(BoundLogicalOperator::bind(SyntaxTokenKind::Or, TypeId::INT, TypeId::BOOL).is_none());
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(
            BoundUnaryOperator::bind(SyntaxTokenKind::Bang, TypeId::BOOL).map(|op| op.kind),
            Some(UnaryOperatorKind::LogicalNegation)
        );
        assert_eq!(
            BoundUnaryOperator::bind(SyntaxTokenKind::Minus, TypeId::INT).map(|op| op.kind),
            Some(UnaryOperatorKind::Negation)
        );
        assert!(BoundUnaryOperator::bind(SyntaxTokenKind::Minus, TypeId::BOOL).is_none());
    }
}
