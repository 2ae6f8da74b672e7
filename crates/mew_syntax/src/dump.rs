//! Indented textual outline of a syntax tree, for debugging and tests.

use crate::node::*;
use crate::token::SyntaxToken;
use crate::visitor::{walk_expression, walk_statement, SyntaxVisitor};
use crate::SyntaxNode;
use std::fmt::Write;

/// Render every node and token of `unit`, one per line.
///
/// ```text
/// CompilationUnit 0..10
///   LetStatement 0..10
///     Let "let" 0..3
/// ```
pub fn dump(unit: &CompilationUnit) -> String {
    let mut dumper = SyntaxDumper {
        output: String::new(),
        depth: 0,
    };
    dumper.line(format_args!("CompilationUnit {:?}", unit.span()));
    dumper.depth += 1;
    dumper.visit_compilation_unit(unit);
    dumper.output
}

struct SyntaxDumper {
    output: String,
    depth: usize,
}

impl SyntaxDumper {
    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }
        let _ = self.output.write_fmt(args);
        self.output.push('\n');
    }

    fn node(&mut self, kind: &str, node: &dyn SyntaxNode, walk: impl FnOnce(&mut Self)) {
        let marker = if node.is_valid() { "" } else { " !" };
        self.line(format_args!("{} {:?}{}", kind, node.span(), marker));
        self.depth += 1;
        walk(self);
        self.depth -= 1;
    }
}

impl SyntaxVisitor for SyntaxDumper {
    fn visit_statement(&mut self, statement: &Statement) {
        if let Statement::Recovery(recovery) = statement {
            return self.visit_recovery(recovery);
        }
        self.node(statement.kind_name(), statement, |this| walk_statement(this, statement));
    }

    fn visit_expression(&mut self, expression: &Expression) {
        if let Expression::Recovery(recovery) = expression {
            return self.visit_recovery(recovery);
        }
        self.node(expression.kind_name(), expression, |this| walk_expression(this, expression));
    }

    fn visit_parameter(&mut self, node: &ParameterSyntax) {
        self.node("ParameterSyntax", node, |this| {
            this.visit_identifier_expression(&node.name);
            this.visit_recovered_token(&node.colon);
            this.visit_identifier_expression(&node.type_annotation);
        });
    }

    fn visit_recovery(&mut self, recovery: &RecoverySyntax) {
        self.node("RecoverySyntax", recovery, |this| {
            for token in &recovery.tokens {
                this.visit_token(token);
            }
        });
    }

    fn visit_token(&mut self, token: &SyntaxToken) {
        self.line(format_args!("{} {:?} {:?}", token.kind, token.lexeme, token.span));
    }
}
