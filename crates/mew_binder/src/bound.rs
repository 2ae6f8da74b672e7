//! Bound tree definitions.
//!
//! The bound tree is the typed, symbol-resolved counterpart of the syntax
//! tree. Every node records a [`SyntaxRef`] back to the syntax it came from.
//! Children are shared through `Arc`, so a rewrite that changes nothing can
//! hand back the very same node; [`BoundStatement::ptr_eq`] and
//! [`BoundExpression::ptr_eq`] detect that.

use crate::operators::{BoundBinaryOperator, BoundLogicalOperator, BoundUnaryOperator};
use crate::symbols::{FunctionId, TypeId, VariableId};
use mew_core::text::TextSpan;
use mew_syntax::NodeId;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Syntax references
// ============================================================================

/// Identifies a syntax tree by its index in a compilation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TreeId(pub u32);

impl TreeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Points from a bound node or symbol back to a syntax node.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SyntaxRef {
    pub tree: TreeId,
    pub node: NodeId,
    pub span: TextSpan,
}

impl SyntaxRef {
    #[inline]
    pub fn new(tree: TreeId, node: NodeId, span: TextSpan) -> Self {
        Self { tree, node, span }
    }
}

/// A jump target. Labels compare by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundLabel(Arc<str>);

impl BoundLabel {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum BoundStatement {
    Block(Arc<BoundBlockStatement>),
    ConditionalGoto(Arc<BoundConditionalGotoStatement>),
    Expression(Arc<BoundExpressionStatement>),
    Goto(Arc<BoundGotoStatement>),
    If(Arc<BoundIfStatement>),
    Label(Arc<BoundLabelStatement>),
    Let(Arc<BoundLetStatement>),
    Loop(Arc<BoundLoopStatement>),
    Return(Arc<BoundReturnStatement>),
    While(Arc<BoundWhileStatement>),
}

impl BoundStatement {
    pub fn syntax(&self) -> SyntaxRef {
        match self {
            BoundStatement::Block(n) => n.syntax,
            BoundStatement::ConditionalGoto(n) => n.syntax,
            BoundStatement::Expression(n) => n.syntax,
            BoundStatement::Goto(n) => n.syntax,
            BoundStatement::If(n) => n.syntax,
            BoundStatement::Label(n) => n.syntax,
            BoundStatement::Let(n) => n.syntax,
            BoundStatement::Loop(n) => n.syntax,
            BoundStatement::Return(n) => n.syntax,
            BoundStatement::While(n) => n.syntax,
        }
    }

    /// Whether both values share the same node.
    pub fn ptr_eq(&self, other: &BoundStatement) -> bool {
        match (self, other) {
            (BoundStatement::Block(a), BoundStatement::Block(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::ConditionalGoto(a), BoundStatement::ConditionalGoto(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Expression(a), BoundStatement::Expression(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Goto(a), BoundStatement::Goto(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::If(a), BoundStatement::If(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Label(a), BoundStatement::Label(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Let(a), BoundStatement::Let(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Loop(a), BoundStatement::Loop(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::Return(a), BoundStatement::Return(b)) => Arc::ptr_eq(a, b),
            (BoundStatement::While(a), BoundStatement::While(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundStatement::Block(_) => "BoundBlockStatement",
            BoundStatement::ConditionalGoto(_) => "BoundConditionalGotoStatement",
            BoundStatement::Expression(_) => "BoundExpressionStatement",
            BoundStatement::Goto(_) => "BoundGotoStatement",
            BoundStatement::If(_) => "BoundIfStatement",
            BoundStatement::Label(_) => "BoundLabelStatement",
            BoundStatement::Let(_) => "BoundLetStatement",
            BoundStatement::Loop(_) => "BoundLoopStatement",
            BoundStatement::Return(_) => "BoundReturnStatement",
            BoundStatement::While(_) => "BoundWhileStatement",
        }
    }

    // Constructors used by the binder and the lowerer.

    pub fn block(syntax: SyntaxRef, statements: Vec<BoundStatement>) -> Self {
        BoundStatement::Block(Arc::new(BoundBlockStatement { syntax, statements }))
    }

    pub fn expression(syntax: SyntaxRef, expression: BoundExpression) -> Self {
        BoundStatement::Expression(Arc::new(BoundExpressionStatement { syntax, expression }))
    }

    /// A statement that stands in for one that failed to bind.
    pub fn error(syntax: SyntaxRef) -> Self {
        Self::expression(syntax, BoundExpression::error(syntax))
    }

    pub fn goto(syntax: SyntaxRef, label: BoundLabel) -> Self {
        BoundStatement::Goto(Arc::new(BoundGotoStatement { syntax, label }))
    }

    pub fn goto_if(syntax: SyntaxRef, label: BoundLabel, condition: BoundExpression, jump_if_true: bool) -> Self {
        BoundStatement::ConditionalGoto(Arc::new(BoundConditionalGotoStatement {
            syntax,
            label,
            condition,
            jump_if_true,
        }))
    }

    pub fn label(syntax: SyntaxRef, label: BoundLabel) -> Self {
        BoundStatement::Label(Arc::new(BoundLabelStatement { syntax, label }))
    }
}

#[derive(Debug, Clone)]
pub struct BoundBlockStatement {
    pub syntax: SyntaxRef,
    pub statements: Vec<BoundStatement>,
}

/// `gotoTrue`/`gotoFalse`: jump when the condition has the given value.
#[derive(Debug, Clone)]
pub struct BoundConditionalGotoStatement {
    pub syntax: SyntaxRef,
    pub label: BoundLabel,
    pub condition: BoundExpression,
    pub jump_if_true: bool,
}

#[derive(Debug, Clone)]
pub struct BoundExpressionStatement {
    pub syntax: SyntaxRef,
    pub expression: BoundExpression,
}

#[derive(Debug, Clone)]
pub struct BoundGotoStatement {
    pub syntax: SyntaxRef,
    pub label: BoundLabel,
}

#[derive(Debug, Clone)]
pub struct BoundIfStatement {
    pub syntax: SyntaxRef,
    pub condition: BoundExpression,
    pub then_branch: BoundStatement,
    pub else_branch: Option<BoundStatement>,
}

#[derive(Debug, Clone)]
pub struct BoundLabelStatement {
    pub syntax: SyntaxRef,
    pub label: BoundLabel,
}

#[derive(Debug, Clone)]
pub struct BoundLetStatement {
    pub syntax: SyntaxRef,
    pub name: SyntaxRef,
    pub variable: VariableId,
    pub initializer: BoundExpression,
}

#[derive(Debug, Clone)]
pub struct BoundLoopStatement {
    pub syntax: SyntaxRef,
    pub body: BoundStatement,
    pub break_label: BoundLabel,
    pub continue_label: BoundLabel,
}

#[derive(Debug, Clone)]
pub struct BoundReturnStatement {
    pub syntax: SyntaxRef,
    pub expression: Option<BoundExpression>,
}

#[derive(Debug, Clone)]
pub struct BoundWhileStatement {
    pub syntax: SyntaxRef,
    pub condition: BoundExpression,
    pub body: BoundStatement,
    pub break_label: BoundLabel,
    pub continue_label: BoundLabel,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum BoundExpression {
    Assignment(Arc<BoundAssignmentExpression>),
    Binary(Arc<BoundBinaryExpression>),
    BooleanLiteral(Arc<BoundBooleanLiteralExpression>),
    Error(Arc<BoundErrorExpression>),
    FunctionCall(Arc<BoundFunctionCallExpression>),
    IntegerLiteral(Arc<BoundIntegerLiteralExpression>),
    Logical(Arc<BoundLogicalExpression>),
    StringLiteral(Arc<BoundStringLiteralExpression>),
    Unary(Arc<BoundUnaryExpression>),
    Variable(Arc<BoundVariableExpression>),
}

impl BoundExpression {
    pub fn syntax(&self) -> SyntaxRef {
        match self {
            BoundExpression::Assignment(n) => n.syntax,
            BoundExpression::Binary(n) => n.syntax,
            BoundExpression::BooleanLiteral(n) => n.syntax,
            BoundExpression::Error(n) => n.syntax,
            BoundExpression::FunctionCall(n) => n.syntax,
            BoundExpression::IntegerLiteral(n) => n.syntax,
            BoundExpression::Logical(n) => n.syntax,
            BoundExpression::StringLiteral(n) => n.syntax,
            BoundExpression::Unary(n) => n.syntax,
            BoundExpression::Variable(n) => n.syntax,
        }
    }

    /// The type the expression evaluates to.
    pub fn ty(&self) -> TypeId {
        match self {
            BoundExpression::Assignment(n) => n.ty,
            BoundExpression::Binary(n) => n.operator.result,
            BoundExpression::BooleanLiteral(_) => TypeId::BOOL,
            BoundExpression::Error(_) => TypeId::ERROR,
            BoundExpression::FunctionCall(n) => n.ty,
            BoundExpression::IntegerLiteral(_) => TypeId::INT,
            BoundExpression::Logical(n) => n.operator.result,
            BoundExpression::StringLiteral(_) => TypeId::STRING,
            BoundExpression::Unary(n) => n.operator.result,
            BoundExpression::Variable(n) => n.ty,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, BoundExpression::Error(_))
    }

    /// Whether both values share the same node.
    pub fn ptr_eq(&self, other: &BoundExpression) -> bool {
        match (self, other) {
            (BoundExpression::Assignment(a), BoundExpression::Assignment(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::Binary(a), BoundExpression::Binary(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::BooleanLiteral(a), BoundExpression::BooleanLiteral(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::Error(a), BoundExpression::Error(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::FunctionCall(a), BoundExpression::FunctionCall(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::IntegerLiteral(a), BoundExpression::IntegerLiteral(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::Logical(a), BoundExpression::Logical(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::StringLiteral(a), BoundExpression::StringLiteral(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::Unary(a), BoundExpression::Unary(b)) => Arc::ptr_eq(a, b),
            (BoundExpression::Variable(a), BoundExpression::Variable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            BoundExpression::Assignment(_) => "BoundAssignmentExpression",
            BoundExpression::Binary(_) => "BoundBinaryExpression",
            BoundExpression::BooleanLiteral(_) => "BoundBooleanLiteralExpression",
            BoundExpression::Error(_) => "BoundErrorExpression",
            BoundExpression::FunctionCall(_) => "BoundFunctionCallExpression",
            BoundExpression::IntegerLiteral(_) => "BoundIntegerLiteralExpression",
            BoundExpression::Logical(_) => "BoundLogicalExpression",
            BoundExpression::StringLiteral(_) => "BoundStringLiteralExpression",
            BoundExpression::Unary(_) => "BoundUnaryExpression",
            BoundExpression::Variable(_) => "BoundVariableExpression",
        }
    }

    #[inline]
    pub fn error(syntax: SyntaxRef) -> Self {
        BoundExpression::Error(Arc::new(BoundErrorExpression { syntax }))
    }
}

#[derive(Debug, Clone)]
pub struct BoundAssignmentExpression {
    pub syntax: SyntaxRef,
    /// The assigned name.
    pub name: SyntaxRef,
    pub variable: VariableId,
    pub value: BoundExpression,
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub struct BoundBinaryExpression {
    pub syntax: SyntaxRef,
    pub left: BoundExpression,
    pub operator: &'static BoundBinaryOperator,
    pub right: BoundExpression,
}

#[derive(Debug, Clone)]
pub struct BoundBooleanLiteralExpression {
    pub syntax: SyntaxRef,
    pub value: bool,
}

/// Placeholder for an expression that failed to bind. Its type is
/// [`TypeId::ERROR`].
#[derive(Debug, Clone)]
pub struct BoundErrorExpression {
    pub syntax: SyntaxRef,
}

#[derive(Debug, Clone)]
pub struct BoundFunctionCallExpression {
    pub syntax: SyntaxRef,
    /// The called name.
    pub name: SyntaxRef,
    /// The overload the call resolved to.
    pub function: FunctionId,
    pub arguments: Vec<BoundExpression>,
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub struct BoundIntegerLiteralExpression {
    pub syntax: SyntaxRef,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct BoundLogicalExpression {
    pub syntax: SyntaxRef,
    pub left: BoundExpression,
    pub operator: &'static BoundLogicalOperator,
    pub right: BoundExpression,
}

#[derive(Debug, Clone)]
pub struct BoundStringLiteralExpression {
    pub syntax: SyntaxRef,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct BoundUnaryExpression {
    pub syntax: SyntaxRef,
    pub operator: &'static BoundUnaryOperator,
    pub operand: BoundExpression,
}

#[derive(Debug, Clone)]
pub struct BoundVariableExpression {
    pub syntax: SyntaxRef,
    pub variable: VariableId,
    pub ty: TypeId,
}
