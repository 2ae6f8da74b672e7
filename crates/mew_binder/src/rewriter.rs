//! Identity-preserving rewriting of bound trees.
//!
//! A [`BoundTreeRewriter`] returns the node it was given, not a copy, when
//! none of the node's children changed. Implementors override
//! `rewrite_statement` or `rewrite_expression` for the variants they care
//! about and fall back to [`walk_statement`]/[`walk_expression`] for the rest.

use crate::bound::*;
use std::sync::Arc;

pub trait BoundTreeRewriter {
    fn rewrite_statement(&mut self, node: &BoundStatement) -> BoundStatement {
        walk_statement(self, node)
    }

    fn rewrite_expression(&mut self, node: &BoundExpression) -> BoundExpression {
        walk_expression(self, node)
    }
}

/// Rewrite every item; `None` if every item came back unchanged.
fn rewrite_all<T>(
    items: &[T],
    mut rewrite: impl FnMut(&T) -> T,
    same: impl Fn(&T, &T) -> bool,
) -> Option<Vec<T>>
where
    T: Clone,
{
    let mut rewritten: Option<Vec<T>> = None;
    for (index, item) in items.iter().enumerate() {
        let new_item = rewrite(item);
        if rewritten.is_none() && !same(&new_item, item) {
            let mut list = Vec::with_capacity(items.len());
            list.extend_from_slice(&items[..index]);
            rewritten = Some(list);
        }
        if let Some(list) = rewritten.as_mut() {
            list.push(new_item);
        }
    }
    rewritten
}

fn same_optional(new: &Option<BoundStatement>, old: &Option<BoundStatement>) -> bool {
    match (new, old) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        (None, None) => true,
        _ => false,
    }
}

pub fn walk_statement<R: BoundTreeRewriter + ?Sized>(rewriter: &mut R, node: &BoundStatement) -> BoundStatement {
    match node {
        BoundStatement::Block(n) => {
            match rewrite_all(&n.statements, |s| rewriter.rewrite_statement(s), BoundStatement::ptr_eq) {
                Some(statements) => BoundStatement::block(n.syntax, statements),
                None => node.clone(),
            }
        }
        BoundStatement::ConditionalGoto(n) => {
            let condition = rewriter.rewrite_expression(&n.condition);
            if condition.ptr_eq(&n.condition) {
                return node.clone();
            }
            BoundStatement::goto_if(n.syntax, n.label.clone(), condition, n.jump_if_true)
        }
        BoundStatement::Expression(n) => {
            let expression = rewriter.rewrite_expression(&n.expression);
            if expression.ptr_eq(&n.expression) {
                return node.clone();
            }
            BoundStatement::expression(n.syntax, expression)
        }
        BoundStatement::Goto(_) | BoundStatement::Label(_) => node.clone(),
        BoundStatement::If(n) => {
            let condition = rewriter.rewrite_expression(&n.condition);
            let then_branch = rewriter.rewrite_statement(&n.then_branch);
            let else_branch = n.else_branch.as_ref().map(|b| rewriter.rewrite_statement(b));
            if condition.ptr_eq(&n.condition)
                && then_branch.ptr_eq(&n.then_branch)
                && same_optional(&else_branch, &n.else_branch)
            {
                return node.clone();
            }
            BoundStatement::If(Arc::new(BoundIfStatement {
                syntax: n.syntax,
                condition,
                then_branch,
                else_branch,
            }))
        }
        BoundStatement::Let(n) => {
            let initializer = rewriter.rewrite_expression(&n.initializer);
            if initializer.ptr_eq(&n.initializer) {
                return node.clone();
            }
            BoundStatement::Let(Arc::new(BoundLetStatement {
                syntax: n.syntax,
                name: n.name,
                variable: n.variable,
                initializer,
            }))
        }
        BoundStatement::Loop(n) => {
            let body = rewriter.rewrite_statement(&n.body);
            if body.ptr_eq(&n.body) {
                return node.clone();
            }
            BoundStatement::Loop(Arc::new(BoundLoopStatement {
                syntax: n.syntax,
                body,
                break_label: n.break_label.clone(),
                continue_label: n.continue_label.clone(),
            }))
        }
        BoundStatement::Return(n) => {
            let Some(old) = &n.expression else {
                return node.clone();
            };
            let expression = rewriter.rewrite_expression(old);
            if expression.ptr_eq(old) {
                return node.clone();
            }
            BoundStatement::Return(Arc::new(BoundReturnStatement {
                syntax: n.syntax,
                expression: Some(expression),
            }))
        }
        BoundStatement::While(n) => {
            let condition = rewriter.rewrite_expression(&n.condition);
            let body = rewriter.rewrite_statement(&n.body);
            if condition.ptr_eq(&n.condition) && body.ptr_eq(&n.body) {
                return node.clone();
            }
            BoundStatement::While(Arc::new(BoundWhileStatement {
                syntax: n.syntax,
                condition,
                body,
                break_label: n.break_label.clone(),
                continue_label: n.continue_label.clone(),
            }))
        }
    }
}

pub fn walk_expression<R: BoundTreeRewriter + ?Sized>(rewriter: &mut R, node: &BoundExpression) -> BoundExpression {
    match node {
        BoundExpression::Assignment(n) => {
            let value = rewriter.rewrite_expression(&n.value);
            if value.ptr_eq(&n.value) {
                return node.clone();
            }
            BoundExpression::Assignment(Arc::new(BoundAssignmentExpression {
                syntax: n.syntax,
                name: n.name,
                variable: n.variable,
                value,
                ty: n.ty,
            }))
        }
        BoundExpression::Binary(n) => {
            let left = rewriter.rewrite_expression(&n.left);
            let right = rewriter.rewrite_expression(&n.right);
            if left.ptr_eq(&n.left) && right.ptr_eq(&n.right) {
                return node.clone();
            }
            BoundExpression::Binary(Arc::new(BoundBinaryExpression {
                syntax: n.syntax,
                left,
                operator: n.operator,
                right,
            }))
        }
        BoundExpression::FunctionCall(n) => {
            match rewrite_all(&n.arguments, |a| rewriter.rewrite_expression(a), BoundExpression::ptr_eq) {
                Some(arguments) => BoundExpression::FunctionCall(Arc::new(BoundFunctionCallExpression {
                    syntax: n.syntax,
                    name: n.name,
                    function: n.function,
                    arguments,
                    ty: n.ty,
                })),
                None => node.clone(),
            }
        }
        BoundExpression::Logical(n) => {
            let left = rewriter.rewrite_expression(&n.left);
            let right = rewriter.rewrite_expression(&n.right);
            if left.ptr_eq(&n.left) && right.ptr_eq(&n.right) {
                return node.clone();
            }
            BoundExpression::Logical(Arc::new(BoundLogicalExpression {
                syntax: n.syntax,
                left,
                operator: n.operator,
                right,
            }))
        }
        BoundExpression::Unary(n) => {
            let operand = rewriter.rewrite_expression(&n.operand);
            if operand.ptr_eq(&n.operand) {
                return node.clone();
            }
            BoundExpression::Unary(Arc::new(BoundUnaryExpression {
                syntax: n.syntax,
                operator: n.operator,
                operand,
            }))
        }
        BoundExpression::BooleanLiteral(_)
        | BoundExpression::Error(_)
        | BoundExpression::IntegerLiteral(_)
        | BoundExpression::StringLiteral(_)
        | BoundExpression::Variable(_) => node.clone(),
    }
}
