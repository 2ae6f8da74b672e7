//! Lowering of structured control flow.
//!
//! `if`, `while` and `loop` are rewritten into blocks of labels, gotos and
//! conditional gotos. The rewritten block may itself contain structured
//! statements from the original branches, so it is rewritten again.

use crate::bound::*;
use crate::rewriter::{walk_statement, BoundTreeRewriter};
use tracing::trace;

/// Mints `Label1`, `Label2`, ... for one lowered body.
#[derive(Debug, Default)]
pub struct Lowerer {
    label_counter: u32,
}

impl Lowerer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lower(&mut self, statement: &BoundStatement) -> BoundStatement {
        self.rewrite_statement(statement)
    }

    fn create_label(&mut self) -> BoundLabel {
        self.label_counter += 1;
        BoundLabel::new(format!("Label{}", self.label_counter))
    }

    // gotoFalse <condition> else
    // <then>
    // goto end
    // else:
    // <else>
    // end:
    fn lower_if(&mut self, node: &BoundIfStatement) -> BoundStatement {
        let syntax = node.syntax;
        let result = match &node.else_branch {
            Some(else_branch) => {
                let else_label = self.create_label();
                let end_label = self.create_label();
                BoundStatement::block(
                    syntax,
                    vec![
                        BoundStatement::goto_if(syntax, else_label.clone(), node.condition.clone(), false),
                        node.then_branch.clone(),
                        BoundStatement::goto(syntax, end_label.clone()),
                        BoundStatement::label(syntax, else_label),
                        else_branch.clone(),
                        BoundStatement::label(syntax, end_label),
                    ],
                )
            }
            None => {
                let end_label = self.create_label();
                BoundStatement::block(
                    syntax,
                    vec![
                        BoundStatement::goto_if(syntax, end_label.clone(), node.condition.clone(), false),
                        node.then_branch.clone(),
                        BoundStatement::label(syntax, end_label),
                    ],
                )
            }
        };
        self.rewrite_statement(&result)
    }

    // goto continue
    // body:
    // <body>
    // continue:
    // gotoTrue <condition> body
    // break:
    fn lower_while(&mut self, node: &BoundWhileStatement) -> BoundStatement {
        let syntax = node.syntax;
        let body_label = self.create_label();
        let result = BoundStatement::block(
            syntax,
            vec![
                BoundStatement::goto(syntax, node.continue_label.clone()),
                BoundStatement::label(syntax, body_label.clone()),
                node.body.clone(),
                BoundStatement::label(syntax, node.continue_label.clone()),
                BoundStatement::goto_if(syntax, body_label, node.condition.clone(), true),
                BoundStatement::label(syntax, node.break_label.clone()),
            ],
        );
        self.rewrite_statement(&result)
    }

    // continue:
    // <body>
    // goto continue
    // break:
    fn lower_loop(&mut self, node: &BoundLoopStatement) -> BoundStatement {
        let syntax = node.syntax;
        let result = BoundStatement::block(
            syntax,
            vec![
                BoundStatement::label(syntax, node.continue_label.clone()),
                node.body.clone(),
                BoundStatement::goto(syntax, node.continue_label.clone()),
                BoundStatement::label(syntax, node.break_label.clone()),
            ],
        );
        self.rewrite_statement(&result)
    }
}

impl BoundTreeRewriter for Lowerer {
    fn rewrite_statement(&mut self, node: &BoundStatement) -> BoundStatement {
        match node {
            BoundStatement::If(n) => {
                trace!(labels = self.label_counter, "lowering if");
                self.lower_if(n)
            }
            BoundStatement::While(n) => self.lower_while(n),
            BoundStatement::Loop(n) => self.lower_loop(n),
            _ => walk_statement(self, node),
        }
    }
}

/// Lower one body with a fresh label counter.
pub fn lower(statement: &BoundStatement) -> BoundStatement {
    Lowerer::new().lower(statement)
}

/// Lower a sequence of statements as one body, so labels never collide.
pub fn lower_all(statements: &[BoundStatement]) -> Vec<BoundStatement> {
    let mut lowerer = Lowerer::new();
    statements.iter().map(|s| lowerer.lower(s)).collect()
}
