//! Text rendering of a semantic model.
//!
//! External functions come first, then every function body, then the
//! top-level statements. Bodies are printed after lowering, so control flow
//! shows up as labels and gotos:
//!
//! ```text
//! fn abs(n: int) -> int
//!     gotoFalse Label1 (n < 0)
//!     return -n
//!   Label1:
//!     return n
//! ```

use crate::semantic_model::SemanticModel;
use mew_binder::{BoundExpression, BoundStatement, SymbolArena};

const INDENT: &str = "    ";
const LABEL_INDENT: &str = "  ";

/// Render `model` as text.
pub fn print_model(model: &SemanticModel) -> String {
    let mut printer = Printer::new(model.symbols());

    for &function in model.external_functions() {
        printer.output.push_str("extern fn ");
        printer.output.push_str(&printer.symbols.function_signature(function));
        if let Some(library) = &printer.symbols.function(function).library {
            printer.output.push_str(" from ");
            printer.output.push_str(library);
        }
        printer.write_newline();
    }

    for (&function, body) in model.functions() {
        printer.separate();
        printer.output.push_str("fn ");
        printer.output.push_str(&printer.symbols.function_signature(function));
        printer.write_newline();
        printer.print_statements(&body.statements);
    }

    if !model.statements().is_empty() {
        printer.separate();
        printer.output.push_str("<top level>");
        printer.write_newline();
        printer.print_statements(model.statements());
    }

    printer.output
}

/// Render a flattened statement list, one statement per line.
pub fn print_statements(symbols: &SymbolArena, statements: &[BoundStatement]) -> String {
    let mut printer = Printer::new(symbols);
    printer.print_statements(statements);
    printer.output
}

struct Printer<'a> {
    output: String,
    symbols: &'a SymbolArena,
}

impl<'a> Printer<'a> {
    fn new(symbols: &'a SymbolArena) -> Self {
        Self {
            output: String::with_capacity(1024),
            symbols,
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
    }

    /// A blank line between sections.
    fn separate(&mut self) {
        if !self.output.is_empty() {
            self.write_newline();
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn print_statements(&mut self, statements: &[BoundStatement]) {
        for statement in statements {
            self.print_statement(statement);
        }
    }

    fn print_statement(&mut self, statement: &BoundStatement) {
        if let BoundStatement::Label(n) = statement {
            self.output.push_str(LABEL_INDENT);
            self.output.push_str(n.label.name());
            self.output.push(':');
            self.write_newline();
            return;
        }

        self.output.push_str(INDENT);
        match statement {
            BoundStatement::ConditionalGoto(n) => {
                self.output.push_str(if n.jump_if_true { "gotoTrue " } else { "gotoFalse " });
                self.output.push_str(n.label.name());
                self.output.push(' ');
                self.print_expression(&n.condition);
            }
            BoundStatement::Expression(n) => self.print_expression(&n.expression),
            BoundStatement::Goto(n) => {
                self.output.push_str("goto ");
                self.output.push_str(n.label.name());
            }
            BoundStatement::Let(n) => {
                let variable = self.symbols.variable(n.variable);
                self.output.push_str("let ");
                self.output.push_str(&variable.name_text);
                self.output.push_str(": ");
                self.output.push_str(self.symbols.type_name(variable.ty));
                self.output.push_str(" = ");
                self.print_expression(&n.initializer);
            }
            BoundStatement::Return(n) => {
                self.output.push_str("return");
                if let Some(expression) = &n.expression {
                    self.output.push(' ');
                    self.print_expression(expression);
                }
            }
            // Structured statements do not survive lowering; print a marker
            // if an unlowered list is passed in.
            other => {
                self.output.push('<');
                self.output.push_str(other.kind_name());
                self.output.push('>');
            }
        }
        self.write_newline();
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn print_expression(&mut self, expression: &BoundExpression) {
        match expression {
            BoundExpression::Assignment(n) => {
                self.output.push_str(&self.symbols.variable(n.variable).name_text);
                self.output.push_str(" = ");
                self.print_expression(&n.value);
            }
            BoundExpression::Binary(n) => {
                self.output.push('(');
                self.print_expression(&n.left);
                self.output.push(' ');
                self.output.push_str(n.operator.kind.symbol());
                self.output.push(' ');
                self.print_expression(&n.right);
                self.output.push(')');
            }
            BoundExpression::BooleanLiteral(n) => self.output.push_str(if n.value { "true" } else { "false" }),
            BoundExpression::Error(_) => self.output.push_str("<error>"),
            BoundExpression::FunctionCall(n) => {
                self.output.push_str(&self.symbols.function(n.function).name_text);
                self.output.push('(');
                for (index, argument) in n.arguments.iter().enumerate() {
                    if index > 0 {
                        self.output.push_str(", ");
                    }
                    self.print_expression(argument);
                }
                self.output.push(')');
            }
            BoundExpression::IntegerLiteral(n) => self.output.push_str(&n.value.to_string()),
            BoundExpression::Logical(n) => {
                self.output.push('(');
                self.print_expression(&n.left);
                self.output.push(' ');
                self.output.push_str(n.operator.kind.symbol());
                self.output.push(' ');
                self.print_expression(&n.right);
                self.output.push(')');
            }
            BoundExpression::StringLiteral(n) => self.output.push_str(&format!("{:?}", n.value)),
            BoundExpression::Unary(n) => {
                self.output.push_str(n.operator.kind.symbol());
                self.print_expression(&n.operand);
            }
            BoundExpression::Variable(n) => self.output.push_str(&self.symbols.variable(n.variable).name_text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mew_parser::SyntaxTree;
    use std::sync::Arc;

    fn print(source: &str) -> String {
        let model = SemanticModel::create(vec![Arc::new(SyntaxTree::parse("test.mew", source))], "mewstd");
        assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
        print_model(&model)
    }

    #[test]
    fn test_print_lowered_if_else() {
        let output = print(
            "extern fn print(value: string);\n\
             let corgi = 3;\n\
             if corgi == 3 { print(\"Three\"); } else { print(\"Not three!\"); }",
        );
        let expected = [
            "extern fn print(value: string) -> void from mewstd",
            "",
            "<top level>",
            "    let corgi: int = 3",
            "    gotoFalse Label1 (corgi == 3)",
            "    print(\"Three\")",
            "    goto Label2",
            "  Label1:",
            "    print(\"Not three!\")",
            "  Label2:",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_print_function_body() {
        let output = print("fn abs(n: int) -> int { if n < 0 { return -n; } return n; }");
        let expected = [
            "fn abs(n: int) -> int",
            "    gotoFalse Label1 (n < 0)",
            "    return -n",
            "  Label1:",
            "    return n",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_print_while_loop() {
        let output = print("let i = 0; while i < 3 and true { i = i + 1; }");
        let expected = [
            "<top level>",
            "    let i: int = 0",
            "    goto continue1",
            "  Label1:",
            "    i = (i + 1)",
            "  continue1:",
            "    gotoTrue Label1 ((i < 3) and true)",
            "  break1:",
        ];
        assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    }
}
