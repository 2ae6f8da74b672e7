//! The body binder.
//!
//! A [`Binder`] is one binding context: either a function body, seeded with
//! the function's parameters, or the top-level statements of a program.
//! It resolves names against its own scope chain and the program-wide
//! tables of a [`BoundGlobalScope`], types every expression, and reports
//! semantic diagnostics. Nothing here fails: whatever cannot be bound becomes
//! an error expression whose type is [`TypeId::ERROR`], and operators and
//! calls that consume an error stay silent so one mistake is reported once.

use crate::bound::*;
use crate::global_scope::BoundGlobalScope;
use crate::operators::{BoundBinaryOperator, BoundLogicalOperator, BoundUnaryOperator};
use crate::scope::ScopeArena;
use crate::symbols::{FunctionId, SymbolArena, TypeId, VariableId, VariableKind, VariableSymbol};
use mew_core::text::{Location, TextSpan};
use mew_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use mew_syntax::*;
use std::sync::Arc;
use tracing::trace;

struct LoopLabels {
    break_label: BoundLabel,
    continue_label: BoundLabel,
}

/// Binds statements and expressions of one context.
pub struct Binder<'a> {
    global: &'a BoundGlobalScope,
    symbols: &'a mut SymbolArena,
    scopes: ScopeArena,
    /// The function whose body is being bound; `None` at the top level.
    function: Option<FunctionId>,
    tree: TreeId,
    path: Arc<str>,
    loops: Vec<LoopLabels>,
    label_counter: u32,
    diagnostics: DiagnosticCollection,
}

impl<'a> Binder<'a> {
    /// A context for top-level statements. Call [`Binder::set_tree`] before
    /// binding statements of each tree.
    pub fn new(global: &'a BoundGlobalScope, symbols: &'a mut SymbolArena) -> Self {
        Self {
            global,
            symbols,
            scopes: ScopeArena::new(),
            function: None,
            tree: TreeId(0),
            path: Arc::from(""),
            loops: Vec::new(),
            label_counter: 0,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// A context for the body of `function`, declared in the tree at `path`.
    /// The parameters are declared in the outermost scope.
    pub fn for_function(
        global: &'a BoundGlobalScope,
        symbols: &'a mut SymbolArena,
        function: FunctionId,
        path: Arc<str>,
    ) -> Self {
        let tree = symbols.function(function).declaration.tree;
        let mut binder = Self::new(global, symbols);
        binder.function = Some(function);
        binder.set_tree(tree, path);

        let parameters = binder.symbols.function(function).parameters.clone();
        for parameter in parameters {
            let symbol = binder.symbols.variable(parameter);
            if !symbol.is_named {
                continue;
            }
            let (name, name_text, span) = (symbol.name, symbol.name_text.clone(), symbol.name_syntax.span);
            if !binder.scopes.try_declare(name, parameter) {
                binder.report(span, &messages::VARIABLE_ALREADY_DECLARED, &[name_text.as_str()]);
            }
        }
        binder
    }

    /// Switch to the tree whose statements are bound next.
    pub fn set_tree(&mut self, tree: TreeId, path: Arc<str>) {
        self.tree = tree;
        self.path = path;
    }

    /// Variables declared in the outermost scope, in declaration order.
    pub fn root_variables(&self) -> Vec<VariableId> {
        self.scopes
            .root()
            .variables
            .values()
            .copied()
            .filter(|&v| self.symbols.variable(v).kind == VariableKind::Local)
            .collect()
    }

    /// Take diagnostics from the binder.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    #[inline]
    fn syntax_ref(&self, data: &NodeData) -> SyntaxRef {
        SyntaxRef::new(self.tree, data.id, data.span)
    }

    #[inline]
    fn type_name(&self, ty: TypeId) -> String {
        self.symbols.type_name(ty).to_string()
    }

    fn report(&mut self, span: TextSpan, message: &'static DiagnosticMessage, args: &[&str]) {
        let diagnostic = Diagnostic::new(Location::new(Arc::clone(&self.path), span), message, args);
        self.diagnostics.add(diagnostic);
    }

    /// Report an operator that is not defined for its operand types, with a
    /// note on each operand.
    fn report_operator(
        &mut self,
        span: TextSpan,
        message: &'static DiagnosticMessage,
        operator: &str,
        left: &BoundExpression,
        right: &BoundExpression,
    ) {
        let left_type = self.type_name(left.ty());
        let right_type = self.type_name(right.ty());
        let diagnostic = Diagnostic::new(
            Location::new(Arc::clone(&self.path), span),
            message,
            &[operator, left_type.as_str(), right_type.as_str()],
        )
        .with_note(left.syntax().span, format!("This is of type '{left_type}'"))
        .with_note(right.syntax().span, format!("This is of type '{right_type}'"));
        self.diagnostics.add(diagnostic);
    }

    /// Report `actual` where `expected` is required, unless either type
    /// already stems from an error.
    fn check_conversion(&mut self, span: TextSpan, actual: TypeId, expected: TypeId) {
        if actual == expected || self.symbols.is_error_type(actual) || self.symbols.is_error_type(expected) {
            return;
        }
        let actual = self.type_name(actual);
        let expected = self.type_name(expected);
        self.report(span, &messages::CANNOT_CONVERT_IMPLICITLY, &[actual.as_str(), expected.as_str()]);
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn bind_statement(&mut self, syntax: &Statement) -> BoundStatement {
        match syntax {
            Statement::Block(n) => self.bind_block_statement(n),
            Statement::Break(n) => self.bind_break_statement(n),
            Statement::Continue(n) => self.bind_continue_statement(n),
            Statement::Expression(n) => self.bind_expression_statement(n),
            Statement::If(n) => self.bind_if_statement(n),
            Statement::Let(n) => self.bind_let_statement(n),
            Statement::Loop(n) => self.bind_loop_statement(n),
            Statement::Return(n) => self.bind_return_statement(n),
            Statement::While(n) => self.bind_while_statement(n),
            Statement::FunctionDeclaration(_) | Statement::ExternalFunctionDeclaration(_) => {
                self.report(syntax.span(), &messages::NESTED_FUNCTION_DECLARATION, &[]);
                BoundStatement::error(self.syntax_ref(syntax.data()))
            }
            Statement::Recovery(n) => BoundStatement::error(self.syntax_ref(&n.data)),
        }
    }

    fn bind_block_statement(&mut self, syntax: &BlockStatement) -> BoundStatement {
        self.scopes.push();
        let statements = syntax.statements.iter().map(|s| self.bind_statement(s)).collect();
        self.scopes.pop();
        BoundStatement::block(self.syntax_ref(&syntax.data), statements)
    }

    fn bind_break_statement(&mut self, syntax: &BreakStatement) -> BoundStatement {
        let bound = self.syntax_ref(&syntax.data);
        match self.loops.last().map(|labels| labels.break_label.clone()) {
            Some(label) => BoundStatement::goto(bound, label),
            None => {
                self.report(syntax.span(), &messages::BREAK_OUTSIDE_OF_LOOP, &[]);
                BoundStatement::error(bound)
            }
        }
    }

    fn bind_continue_statement(&mut self, syntax: &ContinueStatement) -> BoundStatement {
        let bound = self.syntax_ref(&syntax.data);
        match self.loops.last().map(|labels| labels.continue_label.clone()) {
            Some(label) => BoundStatement::goto(bound, label),
            None => {
                self.report(syntax.span(), &messages::CONTINUE_OUTSIDE_OF_LOOP, &[]);
                BoundStatement::error(bound)
            }
        }
    }

    fn bind_expression_statement(&mut self, syntax: &ExpressionStatement) -> BoundStatement {
        let expression = self.bind_expression(&syntax.expression);
        BoundStatement::expression(self.syntax_ref(&syntax.data), expression)
    }

    fn bind_if_statement(&mut self, syntax: &IfStatement) -> BoundStatement {
        let condition = self.bind_condition(&syntax.condition);

        if let BoundExpression::BooleanLiteral(literal) = &condition {
            if !literal.value {
                self.report(syntax.then_branch.span(), &messages::UNREACHABLE_CODE, &[]);
            } else if let Some(else_branch) = &syntax.else_branch {
                self.report(else_branch.span(), &messages::UNREACHABLE_CODE, &[]);
            }
        }

        let then_branch = self.bind_statement(&syntax.then_branch);
        let else_branch = syntax.else_branch.as_ref().map(|b| self.bind_statement(b));

        BoundStatement::If(Arc::new(BoundIfStatement {
            syntax: self.syntax_ref(&syntax.data),
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn bind_let_statement(&mut self, syntax: &LetStatement) -> BoundStatement {
        // The initializer is bound first, so `let x = x;` sees the outer `x`.
        let initializer = self.bind_expression(&syntax.initializer);

        let bound = self.syntax_ref(&syntax.data);
        let name_syntax = self.syntax_ref(&syntax.name.data);
        let name = self.symbols.names().intern(&syntax.name.name);
        let variable = self.symbols.add_variable(VariableSymbol {
            name,
            name_text: syntax.name.name.clone(),
            ty: initializer.ty(),
            kind: VariableKind::Local,
            declaration: bound,
            name_syntax,
            type_syntax: None,
            is_named: syntax.name.is_valid(),
        });

        if syntax.name.is_valid() && !self.scopes.try_declare(name, variable) {
            self.report(syntax.name.span(), &messages::VARIABLE_ALREADY_DECLARED, &[syntax.name.name.as_str()]);
        }

        BoundStatement::Let(Arc::new(BoundLetStatement {
            syntax: bound,
            name: name_syntax,
            variable,
            initializer,
        }))
    }

    fn bind_loop_statement(&mut self, syntax: &LoopStatement) -> BoundStatement {
        let (body, break_label, continue_label) = self.bind_loop_body(&syntax.body);
        BoundStatement::Loop(Arc::new(BoundLoopStatement {
            syntax: self.syntax_ref(&syntax.data),
            body,
            break_label,
            continue_label,
        }))
    }

    fn bind_while_statement(&mut self, syntax: &WhileStatement) -> BoundStatement {
        let condition = self.bind_condition(&syntax.condition);

        if let BoundExpression::BooleanLiteral(literal) = &condition {
            if !literal.value {
                self.report(syntax.body.span(), &messages::UNREACHABLE_CODE, &[]);
            }
        }

        let (body, break_label, continue_label) = self.bind_loop_body(&syntax.body);
        BoundStatement::While(Arc::new(BoundWhileStatement {
            syntax: self.syntax_ref(&syntax.data),
            condition,
            body,
            break_label,
            continue_label,
        }))
    }

    /// Bind a loop body with a fresh pair of break and continue labels.
    fn bind_loop_body(&mut self, body: &Statement) -> (BoundStatement, BoundLabel, BoundLabel) {
        self.label_counter += 1;
        let break_label = BoundLabel::new(format!("break{}", self.label_counter));
        let continue_label = BoundLabel::new(format!("continue{}", self.label_counter));
        trace!(label = %break_label, "entering loop");

        self.loops.push(LoopLabels {
            break_label: break_label.clone(),
            continue_label: continue_label.clone(),
        });
        let body = self.bind_statement(body);
        self.loops.pop();

        (body, break_label, continue_label)
    }

    fn bind_return_statement(&mut self, syntax: &ReturnStatement) -> BoundStatement {
        let expression = syntax.expression.as_ref().map(|e| self.bind_expression(e));

        if let Some(function) = self.function {
            let return_type = self.symbols.function(function).return_type;
            match &expression {
                Some(_) if return_type == TypeId::VOID => {
                    self.report(syntax.span(), &messages::FUNCTION_DOES_NOT_RETURN_A_VALUE, &[]);
                }
                Some(expression) => {
                    let actual = expression.ty();
                    if actual != return_type
                        && !self.symbols.is_error_type(actual)
                        && !self.symbols.is_error_type(return_type)
                    {
                        let expected = self.type_name(return_type);
                        let actual = self.type_name(actual);
                        self.report(syntax.span(), &messages::WRONG_RETURN_TYPE, &[expected.as_str(), actual.as_str()]);
                    }
                }
                None if return_type != TypeId::VOID && !self.symbols.is_error_type(return_type) => {
                    let expected = self.type_name(return_type);
                    self.report(syntax.span(), &messages::MISSING_RETURN_EXPRESSION, &[expected.as_str()]);
                }
                None => {}
            }
        }

        BoundStatement::Return(Arc::new(BoundReturnStatement {
            syntax: self.syntax_ref(&syntax.data),
            expression,
        }))
    }

    /// Bind an `if` or `while` condition, which must be a `bool`.
    fn bind_condition(&mut self, syntax: &Expression) -> BoundExpression {
        let condition = self.bind_expression(syntax);
        self.check_conversion(syntax.span(), condition.ty(), TypeId::BOOL);
        condition
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn bind_expression(&mut self, syntax: &Expression) -> BoundExpression {
        match syntax {
            Expression::Assignment(n) => self.bind_assignment_expression(n),
            Expression::Binary(n) => self.bind_binary_expression(n),
            Expression::BooleanLiteral(n) => BoundExpression::BooleanLiteral(Arc::new(BoundBooleanLiteralExpression {
                syntax: self.syntax_ref(&n.data),
                value: n.value,
            })),
            Expression::FunctionCall(n) => self.bind_function_call_expression(n),
            Expression::Group(n) => self.bind_expression(&n.expression),
            Expression::Identifier(n) => self.bind_identifier_expression(n),
            Expression::IntegerLiteral(n) => BoundExpression::IntegerLiteral(Arc::new(BoundIntegerLiteralExpression {
                syntax: self.syntax_ref(&n.data),
                value: n.value,
            })),
            Expression::Logical(n) => self.bind_logical_expression(n),
            Expression::StringLiteral(n) => BoundExpression::StringLiteral(Arc::new(BoundStringLiteralExpression {
                syntax: self.syntax_ref(&n.data),
                value: n.value.clone(),
            })),
            Expression::Unary(n) => self.bind_unary_expression(n),
            Expression::Recovery(n) => BoundExpression::error(self.syntax_ref(&n.data)),
        }
    }

    fn bind_assignment_expression(&mut self, syntax: &AssignmentExpression) -> BoundExpression {
        let value = self.bind_expression(&syntax.value);
        let Some(variable) = self.lookup_variable(&syntax.name) else {
            return value;
        };

        let ty = self.symbols.variable(variable).ty;
        self.check_conversion(syntax.value.span(), value.ty(), ty);

        BoundExpression::Assignment(Arc::new(BoundAssignmentExpression {
            syntax: self.syntax_ref(&syntax.data),
            name: self.syntax_ref(&syntax.name.data),
            variable,
            value,
            ty,
        }))
    }

    fn bind_binary_expression(&mut self, syntax: &BinaryExpression) -> BoundExpression {
        let bound = self.syntax_ref(&syntax.data);

        let left = self.bind_expression(&syntax.left);
        if self.symbols.is_error_type(left.ty()) {
            return BoundExpression::error(bound);
        }
        let right = self.bind_expression(&syntax.right);
        if self.symbols.is_error_type(right.ty()) {
            return BoundExpression::error(bound);
        }

        match BoundBinaryOperator::bind(syntax.operator.kind, left.ty(), right.ty()) {
            Some(operator) => BoundExpression::Binary(Arc::new(BoundBinaryExpression {
                syntax: bound,
                left,
                operator,
                right,
            })),
            None => {
                self.report_operator(
                    syntax.operator.span,
                    &messages::BINARY_OPERATOR_NOT_DEFINED,
                    &syntax.operator.lexeme,
                    &left,
                    &right,
                );
                BoundExpression::error(bound)
            }
        }
    }

    fn bind_logical_expression(&mut self, syntax: &LogicalExpression) -> BoundExpression {
        let bound = self.syntax_ref(&syntax.data);
        let left = self.bind_expression(&syntax.left);
        let right = self.bind_expression(&syntax.right);

        if self.symbols.is_error_type(left.ty()) || self.symbols.is_error_type(right.ty()) {
            return BoundExpression::error(bound);
        }

        match BoundLogicalOperator::bind(syntax.operator.kind, left.ty(), right.ty()) {
            Some(operator) => BoundExpression::Logical(Arc::new(BoundLogicalExpression {
                syntax: bound,
                left,
                operator,
                right,
            })),
            None => {
                self.report_operator(
                    syntax.span(),
                    &messages::LOGICAL_OPERATOR_NOT_DEFINED,
                    &syntax.operator.lexeme,
                    &left,
                    &right,
                );
                BoundExpression::error(bound)
            }
        }
    }

    fn bind_unary_expression(&mut self, syntax: &UnaryExpression) -> BoundExpression {
        let bound = self.syntax_ref(&syntax.data);
        let operand = self.bind_expression(&syntax.operand);
        if self.symbols.is_error_type(operand.ty()) {
            return BoundExpression::error(bound);
        }

        match BoundUnaryOperator::bind(syntax.operator.kind, operand.ty()) {
            Some(operator) => BoundExpression::Unary(Arc::new(BoundUnaryExpression {
                syntax: bound,
                operator,
                operand,
            })),
            None => {
                let ty = self.type_name(operand.ty());
                self.report(
                    syntax.span(),
                    &messages::UNARY_OPERATOR_NOT_DEFINED,
                    &[syntax.operator.lexeme.as_str(), ty.as_str()],
                );
                BoundExpression::error(bound)
            }
        }
    }

    fn bind_identifier_expression(&mut self, syntax: &IdentifierExpression) -> BoundExpression {
        let bound = self.syntax_ref(&syntax.data);
        match self.lookup_variable(syntax) {
            Some(variable) => BoundExpression::Variable(Arc::new(BoundVariableExpression {
                syntax: bound,
                variable,
                ty: self.symbols.variable(variable).ty,
            })),
            None => BoundExpression::error(bound),
        }
    }

    /// Resolve a name used as a variable, reporting why it is not one.
    fn lookup_variable(&mut self, syntax: &IdentifierExpression) -> Option<VariableId> {
        // Missing names were reported by the parser.
        if !syntax.is_valid() {
            return None;
        }

        let name = self.symbols.names().get(&syntax.name);
        if name.is_some_and(|n| self.global.functions().has_function(n)) {
            self.report(syntax.span(), &messages::NOT_A_VARIABLE, &[syntax.name.as_str()]);
            return None;
        }

        match name.and_then(|n| self.scopes.lookup(n)) {
            Some(variable) => Some(variable),
            None => {
                self.report(syntax.span(), &messages::UNDECLARED_VARIABLE, &[syntax.name.as_str()]);
                None
            }
        }
    }

    fn bind_function_call_expression(&mut self, syntax: &FunctionCallExpression) -> BoundExpression {
        let bound = self.syntax_ref(&syntax.data);
        let arguments: Vec<BoundExpression> = syntax.arguments.iter().map(|a| self.bind_expression(a)).collect();

        let name_text = syntax.name.name.as_str();
        let name = self.symbols.names().get(name_text);

        if name.and_then(|n| self.scopes.lookup(n)).is_some() {
            self.report(syntax.span(), &messages::NOT_A_FUNCTION, &[name_text]);
            return BoundExpression::error(bound);
        }

        let Some(name) = name.filter(|&n| self.global.functions().has_function(n)) else {
            self.report(syntax.span(), &messages::UNDEFINED_FUNCTION, &[name_text]);
            return BoundExpression::error(bound);
        };

        let argument_types: Vec<TypeId> = arguments.iter().map(BoundExpression::ty).collect();
        let functions = self.global.functions();
        let symbols: &SymbolArena = self.symbols;
        let resolved = functions
            .find_exact(symbols, name, &argument_types)
            .or_else(|| functions.find_with_arity(symbols, name, arguments.len()));
        let Some(function) = resolved else {
            let count = arguments.len().to_string();
            self.report(syntax.span(), &messages::NO_OVERLOAD_WITH_ARGUMENT_COUNT, &[name_text, count.as_str()]);
            return BoundExpression::error(bound);
        };

        let symbol = self.symbols.function(function);
        let return_type = symbol.return_type;
        let parameter_types: Vec<TypeId> = symbol
            .parameters
            .iter()
            .map(|&p| self.symbols.variable(p).ty)
            .collect();

        if parameter_types.len() != arguments.len() {
            let expected = parameter_types.len().to_string();
            let given = arguments.len().to_string();
            self.report(
                syntax.span(),
                &messages::INVALID_ARGUMENT_COUNT,
                &[name_text, expected.as_str(), given.as_str()],
            );
            return BoundExpression::error(bound);
        }

        for ((argument, argument_syntax), &parameter_type) in arguments.iter().zip(&syntax.arguments).zip(&parameter_types) {
            if matches!(argument_syntax, Expression::Recovery(_)) {
                continue;
            }
            self.check_conversion(argument.syntax().span, argument.ty(), parameter_type);
        }

        BoundExpression::FunctionCall(Arc::new(BoundFunctionCallExpression {
            syntax: bound,
            name: self.syntax_ref(&syntax.name.data),
            function,
            arguments,
            ty: return_type,
        }))
    }
}
