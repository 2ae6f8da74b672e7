//! Syntax node definitions for Mew.
//!
//! Nodes own their children. Every node records a [`NodeData`] with its id,
//! its span (the union of its children's spans) and its flags. Validity is
//! computed once at construction: a node built from an invalid child is
//! itself invalid.

use crate::token::SyntaxToken;
use crate::types::{NodeFlags, NodeId};
use crate::SyntaxNode;
use mew_core::text::TextSpan;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all syntax nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub span: TextSpan,
    pub flags: NodeFlags,
}

impl NodeData {
    pub fn new(id: NodeId, span: TextSpan, flags: NodeFlags) -> Self {
        Self { id, span, flags }
    }

    /// Derive span and validity from a node's children.
    pub fn from_children<'a, I>(id: NodeId, children: I) -> Self
    where
        I: IntoIterator<Item = &'a dyn SyntaxNode>,
    {
        let mut span: Option<TextSpan> = None;
        let mut flags = NodeFlags::NONE;
        for child in children {
            let child_span = child.span();
            span = Some(match span {
                Some(acc) => acc.union(&child_span),
                None => child_span,
            });
            if !child.is_valid() {
                flags |= NodeFlags::HAS_ERROR;
            }
        }
        Self {
            id,
            span: span.unwrap_or_default(),
            flags,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.flags.contains(NodeFlags::HAS_ERROR)
    }
}

macro_rules! impl_syntax_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SyntaxNode for $ty {
                #[inline]
                fn span(&self) -> TextSpan {
                    self.data.span
                }

                #[inline]
                fn is_valid(&self) -> bool {
                    self.data.is_valid()
                }

                #[inline]
                fn is_synthesized(&self) -> bool {
                    self.data.flags.contains(NodeFlags::SYNTHESIZED)
                }
            }
        )*
    };
}

// ============================================================================
// Recovery
// ============================================================================

/// Placeholder for source the parser could not make sense of.
///
/// Holds the tokens skipped while resynchronizing. When nothing was skipped
/// the span is empty and sits where recovery started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverySyntax {
    pub data: NodeData,
    pub tokens: Vec<SyntaxToken>,
}

impl RecoverySyntax {
    pub fn new(id: NodeId, span: TextSpan, tokens: Vec<SyntaxToken>) -> Self {
        Self {
            data: NodeData::new(id, span, NodeFlags::HAS_ERROR | NodeFlags::SYNTHESIZED),
            tokens,
        }
    }
}

/// A required piece of syntax, or the recovery node left in its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovered<T> {
    Parsed(T),
    Recovery(RecoverySyntax),
}

impl<T> Recovered<T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Recovered::Parsed(value) => Some(value),
            Recovered::Recovery(_) => None,
        }
    }

    pub fn is_recovery(&self) -> bool {
        matches!(self, Recovered::Recovery(_))
    }
}

impl<T: SyntaxNode> SyntaxNode for Recovered<T> {
    fn span(&self) -> TextSpan {
        match self {
            Recovered::Parsed(node) => node.span(),
            Recovered::Recovery(recovery) => recovery.span(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Recovered::Parsed(node) => node.is_valid(),
            Recovered::Recovery(_) => false,
        }
    }

    fn is_synthesized(&self) -> bool {
        match self {
            Recovered::Parsed(node) => node.is_synthesized(),
            Recovered::Recovery(_) => true,
        }
    }
}

// ============================================================================
// Compilation Unit
// ============================================================================

/// The root of a syntax tree: the top-level statements of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    pub data: NodeData,
    pub statements: Vec<Statement>,
}

impl CompilationUnit {
    pub fn new(id: NodeId, statements: Vec<Statement>) -> Self {
        let data = NodeData::from_children(id, statements.iter().map(as_node));
        Self { data, statements }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Assignment(AssignmentExpression),
    Binary(BinaryExpression),
    BooleanLiteral(BooleanLiteralExpression),
    FunctionCall(FunctionCallExpression),
    Group(GroupExpression),
    Identifier(IdentifierExpression),
    IntegerLiteral(IntegerLiteralExpression),
    Logical(LogicalExpression),
    StringLiteral(StringLiteralExpression),
    Unary(UnaryExpression),
    Recovery(RecoverySyntax),
}

impl Expression {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Assignment(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::BooleanLiteral(n) => &n.data,
            Expression::FunctionCall(n) => &n.data,
            Expression::Group(n) => &n.data,
            Expression::Identifier(n) => &n.data,
            Expression::IntegerLiteral(n) => &n.data,
            Expression::Logical(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Recovery(n) => &n.data,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.data().id
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Assignment(_) => "AssignmentExpression",
            Expression::Binary(_) => "BinaryExpression",
            Expression::BooleanLiteral(_) => "BooleanLiteralExpression",
            Expression::FunctionCall(_) => "FunctionCallExpression",
            Expression::Group(_) => "GroupExpression",
            Expression::Identifier(_) => "IdentifierExpression",
            Expression::IntegerLiteral(_) => "IntegerLiteralExpression",
            Expression::Logical(_) => "LogicalExpression",
            Expression::StringLiteral(_) => "StringLiteralExpression",
            Expression::Unary(_) => "UnaryExpression",
            Expression::Recovery(_) => "RecoverySyntax",
        }
    }
}

impl SyntaxNode for Expression {
    #[inline]
    fn span(&self) -> TextSpan {
        self.data().span
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.data().is_valid()
    }

    #[inline]
    fn is_synthesized(&self) -> bool {
        self.data().flags.contains(NodeFlags::SYNTHESIZED)
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpression {
    pub data: NodeData,
    pub name: IdentifierExpression,
    pub equal: SyntaxToken,
    pub value: Box<Expression>,
}

impl AssignmentExpression {
    pub fn new(id: NodeId, name: IdentifierExpression, equal: SyntaxToken, value: Expression) -> Self {
        let data = NodeData::from_children(id, [&name as &dyn SyntaxNode, &equal, &value]);
        Self {
            data,
            name,
            equal,
            value: Box::new(value),
        }
    }
}

/// Arithmetic, comparison and equality operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpression {
    pub data: NodeData,
    pub left: Box<Expression>,
    pub operator: SyntaxToken,
    pub right: Box<Expression>,
}

impl BinaryExpression {
    pub fn new(id: NodeId, left: Expression, operator: SyntaxToken, right: Expression) -> Self {
        let data = NodeData::from_children(id, [&left as &dyn SyntaxNode, &operator, &right]);
        Self {
            data,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

/// `and`/`or` and their `&&`/`||` spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalExpression {
    pub data: NodeData,
    pub left: Box<Expression>,
    pub operator: SyntaxToken,
    pub right: Box<Expression>,
}

impl LogicalExpression {
    pub fn new(id: NodeId, left: Expression, operator: SyntaxToken, right: Expression) -> Self {
        let data = NodeData::from_children(id, [&left as &dyn SyntaxNode, &operator, &right]);
        Self {
            data,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpression {
    pub data: NodeData,
    pub operator: SyntaxToken,
    pub operand: Box<Expression>,
}

impl UnaryExpression {
    pub fn new(id: NodeId, operator: SyntaxToken, operand: Expression) -> Self {
        let data = NodeData::from_children(id, [&operator as &dyn SyntaxNode, &operand]);
        Self {
            data,
            operator,
            operand: Box::new(operand),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteralExpression {
    pub data: NodeData,
    pub token: SyntaxToken,
    pub value: bool,
}

impl BooleanLiteralExpression {
    pub fn new(id: NodeId, token: SyntaxToken, value: bool) -> Self {
        let data = NodeData::from_children(id, [&token as &dyn SyntaxNode]);
        Self { data, token, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteralExpression {
    pub data: NodeData,
    pub token: SyntaxToken,
    pub value: i64,
}

impl IntegerLiteralExpression {
    pub fn new(id: NodeId, token: SyntaxToken, value: i64) -> Self {
        let data = NodeData::from_children(id, [&token as &dyn SyntaxNode]);
        Self { data, token, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteralExpression {
    pub data: NodeData,
    pub token: SyntaxToken,
    /// The contents between the quotes.
    pub value: String,
}

impl StringLiteralExpression {
    pub fn new(id: NodeId, token: SyntaxToken, value: String) -> Self {
        let data = NodeData::from_children(id, [&token as &dyn SyntaxNode]);
        Self { data, token, value }
    }
}

/// `( expression )`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupExpression {
    pub data: NodeData,
    pub lparen: SyntaxToken,
    pub expression: Box<Expression>,
    pub rparen: SyntaxToken,
}

impl GroupExpression {
    pub fn new(id: NodeId, lparen: SyntaxToken, expression: Expression, rparen: SyntaxToken) -> Self {
        let data = NodeData::from_children(id, [&lparen as &dyn SyntaxNode, &expression, &rparen]);
        Self {
            data,
            lparen,
            expression: Box::new(expression),
            rparen,
        }
    }
}

/// A name. Also used for function names, parameter names and type names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierExpression {
    pub data: NodeData,
    pub identifier: Recovered<SyntaxToken>,
    /// The identifier text; empty when the identifier is missing.
    pub name: String,
}

impl IdentifierExpression {
    pub fn new(id: NodeId, token: SyntaxToken) -> Self {
        let data = NodeData::from_children(id, [&token as &dyn SyntaxNode]);
        let name = token.lexeme.clone();
        Self {
            data,
            identifier: Recovered::Parsed(token),
            name,
        }
    }

    /// An identifier standing in for a name that could not be parsed.
    pub fn missing(id: NodeId, recovery: RecoverySyntax) -> Self {
        let data = NodeData::new(id, recovery.data.span, NodeFlags::HAS_ERROR | NodeFlags::SYNTHESIZED);
        Self {
            data,
            identifier: Recovered::Recovery(recovery),
            name: String::new(),
        }
    }
}

/// `name(arguments)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallExpression {
    pub data: NodeData,
    pub name: IdentifierExpression,
    pub lparen: SyntaxToken,
    pub arguments: Vec<Expression>,
    pub rparen: Recovered<SyntaxToken>,
}

impl FunctionCallExpression {
    pub fn new(
        id: NodeId,
        name: IdentifierExpression,
        lparen: SyntaxToken,
        arguments: Vec<Expression>,
        rparen: Recovered<SyntaxToken>,
    ) -> Self {
        let data = NodeData::from_children(
            id,
            [&name as &dyn SyntaxNode, &lparen]
                .into_iter()
                .chain(arguments.iter().map(as_node))
                .chain([&rparen as &dyn SyntaxNode]),
        );
        Self {
            data,
            name,
            lparen,
            arguments,
            rparen,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Block(BlockStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Expression(ExpressionStatement),
    ExternalFunctionDeclaration(ExternalFunctionDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    If(IfStatement),
    Let(LetStatement),
    Loop(LoopStatement),
    Return(ReturnStatement),
    While(WhileStatement),
    Recovery(RecoverySyntax),
}

impl Statement {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::Block(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::ExternalFunctionDeclaration(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Let(n) => &n.data,
            Statement::Loop(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::Recovery(n) => &n.data,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.data().id
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Block(_) => "BlockStatement",
            Statement::Break(_) => "BreakStatement",
            Statement::Continue(_) => "ContinueStatement",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::ExternalFunctionDeclaration(_) => "ExternalFunctionDeclaration",
            Statement::FunctionDeclaration(_) => "FunctionDeclaration",
            Statement::If(_) => "IfStatement",
            Statement::Let(_) => "LetStatement",
            Statement::Loop(_) => "LoopStatement",
            Statement::Return(_) => "ReturnStatement",
            Statement::While(_) => "WhileStatement",
            Statement::Recovery(_) => "RecoverySyntax",
        }
    }
}

impl SyntaxNode for Statement {
    #[inline]
    fn span(&self) -> TextSpan {
        self.data().span
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.data().is_valid()
    }

    #[inline]
    fn is_synthesized(&self) -> bool {
        self.data().flags.contains(NodeFlags::SYNTHESIZED)
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatement {
    pub data: NodeData,
    pub lbrace: Recovered<SyntaxToken>,
    pub statements: Vec<Statement>,
    pub rbrace: Recovered<SyntaxToken>,
}

impl BlockStatement {
    pub fn new(
        id: NodeId,
        lbrace: Recovered<SyntaxToken>,
        statements: Vec<Statement>,
        rbrace: Recovered<SyntaxToken>,
    ) -> Self {
        let data = NodeData::from_children(
            id,
            [&lbrace as &dyn SyntaxNode]
                .into_iter()
                .chain(statements.iter().map(as_node))
                .chain([&rbrace as &dyn SyntaxNode]),
        );
        Self {
            data,
            lbrace,
            statements,
            rbrace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakStatement {
    pub data: NodeData,
    pub keyword: SyntaxToken,
    pub semicolon: Recovered<SyntaxToken>,
}

impl BreakStatement {
    pub fn new(id: NodeId, keyword: SyntaxToken, semicolon: Recovered<SyntaxToken>) -> Self {
        let data = NodeData::from_children(id, [&keyword as &dyn SyntaxNode, &semicolon]);
        Self {
            data,
            keyword,
            semicolon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueStatement {
    pub data: NodeData,
    pub keyword: SyntaxToken,
    pub semicolon: Recovered<SyntaxToken>,
}

impl ContinueStatement {
    pub fn new(id: NodeId, keyword: SyntaxToken, semicolon: Recovered<SyntaxToken>) -> Self {
        let data = NodeData::from_children(id, [&keyword as &dyn SyntaxNode, &semicolon]);
        Self {
            data,
            keyword,
            semicolon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub data: NodeData,
    pub expression: Expression,
    pub semicolon: Recovered<SyntaxToken>,
}

impl ExpressionStatement {
    pub fn new(id: NodeId, expression: Expression, semicolon: Recovered<SyntaxToken>) -> Self {
        let data = NodeData::from_children(id, [&expression as &dyn SyntaxNode, &semicolon]);
        Self {
            data,
            expression,
            semicolon,
        }
    }
}

/// `name: type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSyntax {
    pub data: NodeData,
    pub name: IdentifierExpression,
    pub colon: Recovered<SyntaxToken>,
    pub type_annotation: IdentifierExpression,
}

impl ParameterSyntax {
    pub fn new(
        id: NodeId,
        name: IdentifierExpression,
        colon: Recovered<SyntaxToken>,
        type_annotation: IdentifierExpression,
    ) -> Self {
        let data = NodeData::from_children(id, [&name as &dyn SyntaxNode, &colon, &type_annotation]);
        Self {
            data,
            name,
            colon,
            type_annotation,
        }
    }
}

/// The parts shared by function and external function declarations:
/// `fn name(parameters) -> return_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub fn_keyword: SyntaxToken,
    pub name: IdentifierExpression,
    pub lparen: Recovered<SyntaxToken>,
    pub parameters: Vec<ParameterSyntax>,
    pub rparen: Recovered<SyntaxToken>,
    pub arrow: Option<SyntaxToken>,
    pub return_type: Option<IdentifierExpression>,
}

impl FunctionSignature {
    fn children(&self) -> impl Iterator<Item = &dyn SyntaxNode> {
        [&self.fn_keyword as &dyn SyntaxNode, &self.name, &self.lparen]
            .into_iter()
            .chain(self.parameters.iter().map(|p| p as &dyn SyntaxNode))
            .chain([&self.rparen as &dyn SyntaxNode])
            .chain(self.arrow.iter().map(|a| a as &dyn SyntaxNode))
            .chain(self.return_type.iter().map(|t| t as &dyn SyntaxNode))
    }
}

/// `fn name(parameters) -> type { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub data: NodeData,
    pub signature: FunctionSignature,
    /// A block, or the recovery node left where the block should be.
    pub body: Box<Statement>,
}

impl FunctionDeclaration {
    pub fn new(id: NodeId, signature: FunctionSignature, body: Statement) -> Self {
        let data = NodeData::from_children(id, signature.children().chain([&body as &dyn SyntaxNode]));
        Self {
            data,
            signature,
            body: Box::new(body),
        }
    }
}

/// `extern fn name(parameters) -> type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalFunctionDeclaration {
    pub data: NodeData,
    pub extern_keyword: SyntaxToken,
    pub signature: FunctionSignature,
    pub semicolon: Recovered<SyntaxToken>,
}

impl ExternalFunctionDeclaration {
    pub fn new(
        id: NodeId,
        extern_keyword: SyntaxToken,
        signature: FunctionSignature,
        semicolon: Recovered<SyntaxToken>,
    ) -> Self {
        let data = NodeData::from_children(
            id,
            [&extern_keyword as &dyn SyntaxNode]
                .into_iter()
                .chain(signature.children())
                .chain([&semicolon as &dyn SyntaxNode]),
        );
        Self {
            data,
            extern_keyword,
            signature,
            semicolon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub data: NodeData,
    pub if_keyword: SyntaxToken,
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_keyword: Option<SyntaxToken>,
    pub else_branch: Option<Box<Statement>>,
}

impl IfStatement {
    pub fn new(
        id: NodeId,
        if_keyword: SyntaxToken,
        condition: Expression,
        then_branch: Statement,
        else_clause: Option<(SyntaxToken, Statement)>,
    ) -> Self {
        let (else_keyword, else_branch) = match else_clause {
            Some((keyword, branch)) => (Some(keyword), Some(Box::new(branch))),
            None => (None, None),
        };
        let data = NodeData::from_children(
            id,
            [&if_keyword as &dyn SyntaxNode, &condition, &then_branch]
                .into_iter()
                .chain(else_keyword.iter().map(|k| k as &dyn SyntaxNode))
                .chain(else_branch.iter().map(|b| b.as_ref() as &dyn SyntaxNode)),
        );
        Self {
            data,
            if_keyword,
            condition,
            then_branch: Box::new(then_branch),
            else_keyword,
            else_branch,
        }
    }
}

/// `let name = initializer;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    pub data: NodeData,
    pub let_keyword: SyntaxToken,
    pub name: IdentifierExpression,
    pub equal: Recovered<SyntaxToken>,
    pub initializer: Expression,
    pub semicolon: Recovered<SyntaxToken>,
}

impl LetStatement {
    pub fn new(
        id: NodeId,
        let_keyword: SyntaxToken,
        name: IdentifierExpression,
        equal: Recovered<SyntaxToken>,
        initializer: Expression,
        semicolon: Recovered<SyntaxToken>,
    ) -> Self {
        let data = NodeData::from_children(
            id,
            [&let_keyword as &dyn SyntaxNode, &name, &equal, &initializer, &semicolon],
        );
        Self {
            data,
            let_keyword,
            name,
            equal,
            initializer,
            semicolon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopStatement {
    pub data: NodeData,
    pub loop_keyword: SyntaxToken,
    pub body: Box<Statement>,
}

impl LoopStatement {
    pub fn new(id: NodeId, loop_keyword: SyntaxToken, body: Statement) -> Self {
        let data = NodeData::from_children(id, [&loop_keyword as &dyn SyntaxNode, &body]);
        Self {
            data,
            loop_keyword,
            body: Box::new(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    pub data: NodeData,
    pub return_keyword: SyntaxToken,
    pub expression: Option<Expression>,
    pub semicolon: Recovered<SyntaxToken>,
}

impl ReturnStatement {
    pub fn new(
        id: NodeId,
        return_keyword: SyntaxToken,
        expression: Option<Expression>,
        semicolon: Recovered<SyntaxToken>,
    ) -> Self {
        let data = NodeData::from_children(
            id,
            [&return_keyword as &dyn SyntaxNode]
                .into_iter()
                .chain(expression.iter().map(as_node))
                .chain([&semicolon as &dyn SyntaxNode]),
        );
        Self {
            data,
            return_keyword,
            expression,
            semicolon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatement {
    pub data: NodeData,
    pub while_keyword: SyntaxToken,
    pub condition: Expression,
    pub body: Box<Statement>,
}

impl WhileStatement {
    pub fn new(id: NodeId, while_keyword: SyntaxToken, condition: Expression, body: Statement) -> Self {
        let data = NodeData::from_children(id, [&while_keyword as &dyn SyntaxNode, &condition, &body]);
        Self {
            data,
            while_keyword,
            condition,
            body: Box::new(body),
        }
    }
}

impl_syntax_node!(
    RecoverySyntax,
    CompilationUnit,
    AssignmentExpression,
    BinaryExpression,
    LogicalExpression,
    UnaryExpression,
    BooleanLiteralExpression,
    IntegerLiteralExpression,
    StringLiteralExpression,
    GroupExpression,
    IdentifierExpression,
    FunctionCallExpression,
    BlockStatement,
    BreakStatement,
    ContinueStatement,
    ExpressionStatement,
    ParameterSyntax,
    FunctionDeclaration,
    ExternalFunctionDeclaration,
    IfStatement,
    LetStatement,
    LoopStatement,
    ReturnStatement,
    WhileStatement,
);

#[inline]
fn as_node<T: SyntaxNode>(node: &T) -> &dyn SyntaxNode {
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SyntaxTokenKind;

    fn token(kind: SyntaxTokenKind, start: u32, text: &str) -> SyntaxToken {
        SyntaxToken::new(kind, TextSpan::new(start, text.len() as u32), text)
    }

    #[test]
    fn test_span_is_union_of_children() {
        let left = Expression::IntegerLiteral(IntegerLiteralExpression::new(
            NodeId(0),
            token(SyntaxTokenKind::Integer, 0, "1"),
            1,
        ));
        let right = Expression::IntegerLiteral(IntegerLiteralExpression::new(
            NodeId(1),
            token(SyntaxTokenKind::Integer, 4, "22"),
            22,
        ));
        let binary = BinaryExpression::new(NodeId(2), left, token(SyntaxTokenKind::Plus, 2, "+"), right);
        assert_eq!(binary.span(), TextSpan::from_bounds(0, 6));
        assert!(binary.is_valid());
    }

    #[test]
    fn test_invalid_child_makes_parent_invalid() {
        let recovery = RecoverySyntax::new(NodeId(0), TextSpan::empty(3), Vec::new());
        let name = IdentifierExpression::missing(NodeId(1), recovery);
        assert!(!name.is_valid());
        assert!(name.is_synthesized());

        let value = Expression::BooleanLiteral(BooleanLiteralExpression::new(
            NodeId(2),
            token(SyntaxTokenKind::True, 6, "true"),
            true,
        ));
        let assignment = AssignmentExpression::new(NodeId(3), name, token(SyntaxTokenKind::Equal, 4, "="), value);
        assert!(!assignment.is_valid());
        assert!(!assignment.is_synthesized());
        assert_eq!(assignment.span(), TextSpan::from_bounds(3, 10));
    }

    #[test]
    fn test_empty_compilation_unit() {
        let unit = CompilationUnit::new(NodeId(0), Vec::new());
        assert!(unit.is_valid());
        assert_eq!(unit.span(), TextSpan::empty(0));
    }
}
