//! Syntax tree traversal.
//!
//! [`SyntaxVisitor`] has one method per node kind. Every default method walks
//! into the node's children, so an implementation overrides only what it
//! cares about. The `walk_*` functions perform the default dispatch and can
//! be called from an override to keep descending.

use crate::node::*;
use crate::token::SyntaxToken;

pub trait SyntaxVisitor: Sized {
    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        for statement in &unit.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    /// Called for every token reachable from the tree, in source order.
    fn visit_token(&mut self, _token: &SyntaxToken) {}

    fn visit_recovery(&mut self, recovery: &RecoverySyntax) {
        for token in &recovery.tokens {
            self.visit_token(token);
        }
    }

    // -- Statements --

    fn visit_block_statement(&mut self, node: &BlockStatement) {
        self.visit_recovered_token(&node.lbrace);
        for statement in &node.statements {
            self.visit_statement(statement);
        }
        self.visit_recovered_token(&node.rbrace);
    }

    fn visit_break_statement(&mut self, node: &BreakStatement) {
        self.visit_token(&node.keyword);
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_continue_statement(&mut self, node: &ContinueStatement) {
        self.visit_token(&node.keyword);
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {
        self.visit_expression(&node.expression);
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_function_declaration(&mut self, node: &FunctionDeclaration) {
        self.visit_function_signature(&node.signature);
        self.visit_statement(&node.body);
    }

    fn visit_external_function_declaration(&mut self, node: &ExternalFunctionDeclaration) {
        self.visit_token(&node.extern_keyword);
        self.visit_function_signature(&node.signature);
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_function_signature(&mut self, signature: &FunctionSignature) {
        self.visit_token(&signature.fn_keyword);
        self.visit_identifier_expression(&signature.name);
        self.visit_recovered_token(&signature.lparen);
        for parameter in &signature.parameters {
            self.visit_parameter(parameter);
        }
        self.visit_recovered_token(&signature.rparen);
        if let Some(arrow) = &signature.arrow {
            self.visit_token(arrow);
        }
        if let Some(return_type) = &signature.return_type {
            self.visit_identifier_expression(return_type);
        }
    }

    fn visit_parameter(&mut self, node: &ParameterSyntax) {
        self.visit_identifier_expression(&node.name);
        self.visit_recovered_token(&node.colon);
        self.visit_identifier_expression(&node.type_annotation);
    }

    fn visit_if_statement(&mut self, node: &IfStatement) {
        self.visit_token(&node.if_keyword);
        self.visit_expression(&node.condition);
        self.visit_statement(&node.then_branch);
        if let Some(keyword) = &node.else_keyword {
            self.visit_token(keyword);
        }
        if let Some(branch) = &node.else_branch {
            self.visit_statement(branch);
        }
    }

    fn visit_let_statement(&mut self, node: &LetStatement) {
        self.visit_token(&node.let_keyword);
        self.visit_identifier_expression(&node.name);
        self.visit_recovered_token(&node.equal);
        self.visit_expression(&node.initializer);
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_loop_statement(&mut self, node: &LoopStatement) {
        self.visit_token(&node.loop_keyword);
        self.visit_statement(&node.body);
    }

    fn visit_return_statement(&mut self, node: &ReturnStatement) {
        self.visit_token(&node.return_keyword);
        if let Some(expression) = &node.expression {
            self.visit_expression(expression);
        }
        self.visit_recovered_token(&node.semicolon);
    }

    fn visit_while_statement(&mut self, node: &WhileStatement) {
        self.visit_token(&node.while_keyword);
        self.visit_expression(&node.condition);
        self.visit_statement(&node.body);
    }

    // -- Expressions --

    fn visit_assignment_expression(&mut self, node: &AssignmentExpression) {
        self.visit_identifier_expression(&node.name);
        self.visit_token(&node.equal);
        self.visit_expression(&node.value);
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression) {
        self.visit_expression(&node.left);
        self.visit_token(&node.operator);
        self.visit_expression(&node.right);
    }

    fn visit_logical_expression(&mut self, node: &LogicalExpression) {
        self.visit_expression(&node.left);
        self.visit_token(&node.operator);
        self.visit_expression(&node.right);
    }

    fn visit_unary_expression(&mut self, node: &UnaryExpression) {
        self.visit_token(&node.operator);
        self.visit_expression(&node.operand);
    }

    fn visit_boolean_literal(&mut self, node: &BooleanLiteralExpression) {
        self.visit_token(&node.token);
    }

    fn visit_integer_literal(&mut self, node: &IntegerLiteralExpression) {
        self.visit_token(&node.token);
    }

    fn visit_string_literal(&mut self, node: &StringLiteralExpression) {
        self.visit_token(&node.token);
    }

    fn visit_group_expression(&mut self, node: &GroupExpression) {
        self.visit_token(&node.lparen);
        self.visit_expression(&node.expression);
        self.visit_token(&node.rparen);
    }

    fn visit_identifier_expression(&mut self, node: &IdentifierExpression) {
        self.visit_recovered_token(&node.identifier);
    }

    fn visit_function_call_expression(&mut self, node: &FunctionCallExpression) {
        self.visit_identifier_expression(&node.name);
        self.visit_token(&node.lparen);
        for argument in &node.arguments {
            self.visit_expression(argument);
        }
        self.visit_recovered_token(&node.rparen);
    }

    fn visit_recovered_token(&mut self, token: &Recovered<SyntaxToken>) {
        match token {
            Recovered::Parsed(token) => self.visit_token(token),
            Recovered::Recovery(recovery) => self.visit_recovery(recovery),
        }
    }
}

/// Dispatch a statement to the visitor method for its kind.
pub fn walk_statement<V: SyntaxVisitor>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Block(n) => visitor.visit_block_statement(n),
        Statement::Break(n) => visitor.visit_break_statement(n),
        Statement::Continue(n) => visitor.visit_continue_statement(n),
        Statement::Expression(n) => visitor.visit_expression_statement(n),
        Statement::ExternalFunctionDeclaration(n) => visitor.visit_external_function_declaration(n),
        Statement::FunctionDeclaration(n) => visitor.visit_function_declaration(n),
        Statement::If(n) => visitor.visit_if_statement(n),
        Statement::Let(n) => visitor.visit_let_statement(n),
        Statement::Loop(n) => visitor.visit_loop_statement(n),
        Statement::Return(n) => visitor.visit_return_statement(n),
        Statement::While(n) => visitor.visit_while_statement(n),
        Statement::Recovery(n) => visitor.visit_recovery(n),
    }
}

/// Dispatch an expression to the visitor method for its kind.
pub fn walk_expression<V: SyntaxVisitor>(visitor: &mut V, expression: &Expression) {
    match expression {
        Expression::Assignment(n) => visitor.visit_assignment_expression(n),
        Expression::Binary(n) => visitor.visit_binary_expression(n),
        Expression::BooleanLiteral(n) => visitor.visit_boolean_literal(n),
        Expression::FunctionCall(n) => visitor.visit_function_call_expression(n),
        Expression::Group(n) => visitor.visit_group_expression(n),
        Expression::Identifier(n) => visitor.visit_identifier_expression(n),
        Expression::IntegerLiteral(n) => visitor.visit_integer_literal(n),
        Expression::Logical(n) => visitor.visit_logical_expression(n),
        Expression::StringLiteral(n) => visitor.visit_string_literal(n),
        Expression::Unary(n) => visitor.visit_unary_expression(n),
        Expression::Recovery(n) => visitor.visit_recovery(n),
    }
}
