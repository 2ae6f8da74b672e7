//! The Mew parser implementation.
//!
//! A recursive descent parser over the lexed token list. Statements and
//! declarations are parsed top-down; binary operators use precedence
//! climbing. Every required token is parsed under a recovery policy (see
//! `recovery.rs`), so the parser always produces a complete
//! [`CompilationUnit`] and a list of diagnostics.

use mew_core::text::{Location, TextSpan};
use mew_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use mew_syntax::*;
use std::sync::Arc;
use tracing::debug;

use crate::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use crate::reader::TokenReader;
use crate::recovery::{suppression, ParseError, ParseResult, RecoveryFlags};

/// The default cap on parser synchronizations per file.
pub const DEFAULT_MAX_SYNCHRONIZATIONS: usize = 100;

/// Maximum nesting of statements or unary/group expressions.
const MAX_RECURSION_DEPTH: u32 = 64;

/// Options controlling a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How many times the parser may resynchronize before giving up on the
    /// rest of the file.
    pub max_synchronizations: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_synchronizations: DEFAULT_MAX_SYNCHRONIZATIONS,
        }
    }
}

/// The parser produces a [`CompilationUnit`] from the tokens of one file.
pub struct Parser {
    pub(crate) path: Arc<str>,
    pub(crate) reader: TokenReader,
    pub(crate) diagnostics: DiagnosticCollection,
    pub(crate) synchronizations: usize,
    pub(crate) max_synchronizations: usize,
    /// Set once the synchronization cap is hit.
    pub(crate) aborted: bool,
    next_id: u32,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl Parser {
    pub fn new(path: impl Into<Arc<str>>, tokens: Vec<SyntaxToken>, options: ParseOptions) -> Self {
        Self {
            path: path.into(),
            reader: TokenReader::new(tokens),
            diagnostics: DiagnosticCollection::new(),
            synchronizations: 0,
            max_synchronizations: options.max_synchronizations,
            aborted: false,
            next_id: 0,
            recursion_depth: 0,
        }
    }

    pub fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let mut statements = Vec::new();

        while !self.reader.is_at_end() {
            match self.parse_declaration() {
                Ok(Some(statement)) => statements.push(statement),
                Ok(None) => {}
                Err(error) => {
                    let diagnostic = error.into_diagnostic(Arc::clone(&self.path));
                    self.report(diagnostic);
                    self.synchronize();
                }
            }
        }

        debug!(
            path = %self.path,
            tokens = self.reader.len(),
            statements = statements.len(),
            diagnostics = self.diagnostics.len(),
            synchronizations = self.synchronizations,
            "parsed compilation unit"
        );

        CompilationUnit::new(self.next_id(), statements)
    }

    #[inline]
    pub fn synchronizations(&self) -> usize {
        self.synchronizations
    }

    pub fn take_diagnostics(self) -> DiagnosticCollection {
        self.diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    #[inline]
    fn current_token(&self) -> SyntaxTokenKind {
        self.reader.peek().kind
    }

    /// Consume a token of `kind` or fail at the current token.
    pub(crate) fn expect(
        &mut self,
        kind: SyntaxTokenKind,
        message: &'static DiagnosticMessage,
    ) -> ParseResult<SyntaxToken> {
        let span = self.reader.peek().span;
        self.expect_at(kind, message, span)
    }

    /// Consume a token of `kind` or fail, reporting at `span`.
    fn expect_at(
        &mut self,
        kind: SyntaxTokenKind,
        message: &'static DiagnosticMessage,
        span: TextSpan,
    ) -> ParseResult<SyntaxToken> {
        if self.reader.check(kind) {
            Ok(self.reader.advance())
        } else {
            Err(ParseError::new(span, message))
        }
    }

    fn optional_token(&mut self, kind: SyntaxTokenKind) -> Option<SyntaxToken> {
        if self.reader.matches(kind) {
            Some(self.reader.previous().clone())
        } else {
            None
        }
    }

    /// Parse a required token, leaving a placeholder behind on failure.
    fn token_with_recovery(
        &mut self,
        kind: SyntaxTokenKind,
        message: &'static DiagnosticMessage,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
    ) -> Recovered<SyntaxToken> {
        match self.with_recovery(flags, terminators, |p| p.expect(kind, message)) {
            Ok(token) => Recovered::Parsed(token),
            Err(recovery) => Recovered::Recovery(recovery),
        }
    }

    fn expression_with_recovery(
        &mut self,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
        parse: impl FnOnce(&mut Self) -> ParseResult<Expression>,
    ) -> Expression {
        self.with_recovery(flags, terminators, parse)
            .unwrap_or_else(Expression::Recovery)
    }

    fn statement_with_recovery(
        &mut self,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
        parse: impl FnOnce(&mut Self) -> ParseResult<Statement>,
    ) -> Statement {
        self.with_recovery(flags, terminators, parse)
            .unwrap_or_else(Statement::Recovery)
    }

    fn enter_recursion(&mut self) -> ParseResult<()> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            return Err(ParseError::new(self.reader.peek().span, &messages::NESTED_TOO_DEEPLY));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.enter_recursion()?;
        let result = parse(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn parse_declaration(&mut self) -> ParseResult<Option<Statement>> {
        if let Some(extern_keyword) = self.optional_token(SyntaxTokenKind::Extern) {
            if !self.reader.check(SyntaxTokenKind::Fn) {
                let location = Location::new(Arc::clone(&self.path), self.reader.peek().span);
                self.report(Diagnostic::new(location, &messages::EXPECTED_FN_KEYWORD, &[]));
                return Ok(None);
            }

            let fn_keyword = self.reader.advance();
            let statement = self.parse_external_function_declaration(extern_keyword, fn_keyword);
            return Ok(Some(statement));
        }

        if let Some(fn_keyword) = self.optional_token(SyntaxTokenKind::Fn) {
            return Ok(Some(self.parse_function_declaration(fn_keyword)));
        }

        if let Some(let_keyword) = self.optional_token(SyntaxTokenKind::Let) {
            return Ok(Some(self.parse_let_statement(let_keyword)));
        }

        self.parse_statement().map(Some)
    }

    fn parse_function_declaration(&mut self, fn_keyword: SyntaxToken) -> Statement {
        let signature = self.parse_function_signature(fn_keyword);

        let flags = suppression(Some(&signature.rparen));
        let body = self.parse_block_statement(flags);

        let id = self.next_id();
        Statement::FunctionDeclaration(FunctionDeclaration::new(id, signature, Statement::Block(body)))
    }

    fn parse_external_function_declaration(&mut self, extern_keyword: SyntaxToken, fn_keyword: SyntaxToken) -> Statement {
        let signature = self.parse_function_signature(fn_keyword);

        let previous: &dyn SyntaxNode = match (&signature.return_type, &signature.arrow) {
            (Some(return_type), _) => return_type,
            (None, Some(arrow)) => arrow,
            (None, None) => &signature.rparen,
        };
        let flags = suppression(Some(previous));
        let semicolon = self.token_with_recovery(
            SyntaxTokenKind::Semicolon,
            &messages::EXPECTED_SEMICOLON,
            flags,
            &[SyntaxTokenKind::NewLine],
        );

        let id = self.next_id();
        Statement::ExternalFunctionDeclaration(ExternalFunctionDeclaration::new(
            id,
            extern_keyword,
            signature,
            semicolon,
        ))
    }

    /// `fn name(parameters) -> type`, shared by both kinds of declaration.
    fn parse_function_signature(&mut self, fn_keyword: SyntaxToken) -> FunctionSignature {
        let name = self.identifier_with_recovery(
            &messages::EXPECTED_FUNCTION_NAME,
            suppression(Some(&fn_keyword)),
            &[SyntaxTokenKind::Equal, SyntaxTokenKind::NewLine],
        );

        let lparen = self.token_with_recovery(
            SyntaxTokenKind::LParen,
            &messages::EXPECTED_LPAREN_AFTER_FUNCTION_NAME,
            suppression(Some(&name)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
        );

        let mut parameters: Vec<ParameterSyntax> = Vec::new();
        if !self.reader.is_at_end() && !self.reader.check(SyntaxTokenKind::RParen) {
            loop {
                let parameter = self.parse_parameter(&parameters, &lparen);
                parameters.push(parameter);
                if !self.reader.matches(SyntaxTokenKind::Comma) {
                    break;
                }
            }
        }

        let previous: &dyn SyntaxNode = match parameters.last() {
            Some(parameter) => parameter,
            None => &lparen,
        };
        let rparen = self.token_with_recovery(
            SyntaxTokenKind::RParen,
            &messages::EXPECTED_RPAREN,
            suppression(Some(previous)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
        );

        let arrow = self.optional_token(SyntaxTokenKind::Arrow);
        let return_type = if arrow.is_some() {
            Some(self.identifier_with_recovery(
                &messages::EXPECTED_TYPE,
                suppression(Some(&rparen)),
                &[SyntaxTokenKind::Equal, SyntaxTokenKind::NewLine, SyntaxTokenKind::Comma],
            ))
        } else {
            None
        };

        FunctionSignature {
            fn_keyword,
            name,
            lparen,
            parameters,
            rparen,
            arrow,
            return_type,
        }
    }

    fn parse_parameter(&mut self, previous: &[ParameterSyntax], lparen: &Recovered<SyntaxToken>) -> ParameterSyntax {
        let previous: &dyn SyntaxNode = match previous.last() {
            Some(parameter) => parameter,
            None => lparen,
        };
        let name = self.identifier_with_recovery(
            &messages::EXPECTED_PARAMETER_NAME,
            suppression(Some(previous)),
            &[SyntaxTokenKind::Equal, SyntaxTokenKind::NewLine, SyntaxTokenKind::Comma],
        );

        let colon = self.token_with_recovery(
            SyntaxTokenKind::Colon,
            &messages::EXPECTED_COLON,
            suppression(Some(&name)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::Comma, SyntaxTokenKind::NewLine],
        );

        let type_annotation = self.identifier_with_recovery(
            &messages::EXPECTED_TYPE,
            suppression(Some(&colon)),
            &[SyntaxTokenKind::Equal, SyntaxTokenKind::NewLine, SyntaxTokenKind::Comma],
        );

        let id = self.next_id();
        ParameterSyntax::new(id, name, colon, type_annotation)
    }

    fn parse_let_statement(&mut self, let_keyword: SyntaxToken) -> Statement {
        let name = self.identifier_with_recovery(
            &messages::EXPECTED_VARIABLE_NAME,
            RecoveryFlags::NONE,
            &[SyntaxTokenKind::Equal, SyntaxTokenKind::NewLine],
        );

        let equal = self.token_with_recovery(
            SyntaxTokenKind::Equal,
            &messages::EXPECTED_EQUAL,
            suppression(Some(&name)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
        );

        let initializer = self.expression_with_recovery(
            suppression(Some(&equal)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
            |p| p.parse_expression(),
        );

        let semicolon = self.token_with_recovery(
            SyntaxTokenKind::Semicolon,
            &messages::EXPECTED_SEMICOLON,
            suppression(Some(&initializer)),
            &[SyntaxTokenKind::NewLine],
        );

        let id = self.next_id();
        Statement::Let(LetStatement::new(id, let_keyword, name, equal, initializer, semicolon))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.nested(|p| p.parse_statement_worker())
    }

    fn parse_statement_worker(&mut self) -> ParseResult<Statement> {
        if let Some(if_keyword) = self.optional_token(SyntaxTokenKind::If) {
            return Ok(self.parse_if_statement(if_keyword));
        }

        if self.reader.check(SyntaxTokenKind::LBrace) {
            return Ok(Statement::Block(self.parse_block_statement(RecoveryFlags::NONE)));
        }

        if let Some(loop_keyword) = self.optional_token(SyntaxTokenKind::Loop) {
            let body = self.parse_block_statement(suppression(Some(&loop_keyword)));
            let id = self.next_id();
            return Ok(Statement::Loop(LoopStatement::new(id, loop_keyword, Statement::Block(body))));
        }

        if let Some(while_keyword) = self.optional_token(SyntaxTokenKind::While) {
            return Ok(self.parse_while_statement(while_keyword));
        }

        if let Some(keyword) = self.optional_token(SyntaxTokenKind::Break) {
            let semicolon = self.statement_semicolon(RecoveryFlags::NONE);
            let id = self.next_id();
            return Ok(Statement::Break(BreakStatement::new(id, keyword, semicolon)));
        }

        if let Some(keyword) = self.optional_token(SyntaxTokenKind::Continue) {
            let semicolon = self.statement_semicolon(RecoveryFlags::NONE);
            let id = self.next_id();
            return Ok(Statement::Continue(ContinueStatement::new(id, keyword, semicolon)));
        }

        if let Some(return_keyword) = self.optional_token(SyntaxTokenKind::Return) {
            return Ok(self.parse_return_statement(return_keyword));
        }

        self.parse_expression_statement()
    }

    fn statement_semicolon(&mut self, flags: RecoveryFlags) -> Recovered<SyntaxToken> {
        self.token_with_recovery(
            SyntaxTokenKind::Semicolon,
            &messages::EXPECTED_SEMICOLON,
            flags,
            &[SyntaxTokenKind::NewLine],
        )
    }

    fn parse_if_statement(&mut self, if_keyword: SyntaxToken) -> Statement {
        let condition = self.expression_with_recovery(
            RecoveryFlags::NONE,
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
            |p| p.parse_expression(),
        );

        let then_branch = self.statement_with_recovery(
            suppression(Some(&condition)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
            |p| p.parse_statement(),
        );

        let else_clause = match self.optional_token(SyntaxTokenKind::Else) {
            Some(else_keyword) => {
                let else_branch = self.statement_with_recovery(
                    suppression(Some(&then_branch)),
                    &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
                    |p| p.parse_statement(),
                );
                Some((else_keyword, else_branch))
            }
            None => None,
        };

        let id = self.next_id();
        Statement::If(IfStatement::new(id, if_keyword, condition, then_branch, else_clause))
    }

    fn parse_while_statement(&mut self, while_keyword: SyntaxToken) -> Statement {
        let condition = self.expression_with_recovery(
            RecoveryFlags::NONE,
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
            |p| p.parse_expression(),
        );

        let body = self.parse_block_statement(suppression(Some(&condition)));

        let id = self.next_id();
        Statement::While(WhileStatement::new(id, while_keyword, condition, Statement::Block(body)))
    }

    fn parse_return_statement(&mut self, return_keyword: SyntaxToken) -> Statement {
        let expression = if self.current_token() != SyntaxTokenKind::Semicolon {
            Some(self.expression_with_recovery(RecoveryFlags::NONE, &[SyntaxTokenKind::NewLine], |p| {
                p.parse_expression()
            }))
        } else {
            None
        };

        let flags = suppression(expression.as_ref().map(|e| e as &dyn SyntaxNode));
        let semicolon = self.statement_semicolon(flags);

        let id = self.next_id();
        Statement::Return(ReturnStatement::new(id, return_keyword, expression, semicolon))
    }

    /// `{ declarations }`. Never fails: both braces are recovered in place.
    /// `flags` applies to the opening brace and comes from the node before it.
    fn parse_block_statement(&mut self, flags: RecoveryFlags) -> BlockStatement {
        let lbrace = self.token_with_recovery(
            SyntaxTokenKind::LBrace,
            &messages::EXPECTED_LBRACE,
            flags,
            &[SyntaxTokenKind::NewLine],
        );

        let mut statements: Vec<Statement> = Vec::new();
        while !self.reader.check(SyntaxTokenKind::RBrace) && !self.reader.is_at_end() {
            let before = self.reader.position();
            let previous: &dyn SyntaxNode = match statements.last() {
                Some(statement) => statement,
                None => &lbrace,
            };
            let flags = suppression(Some(previous));

            match self.with_recovery(flags, &[SyntaxTokenKind::NewLine], |p| p.parse_declaration()) {
                Ok(Some(statement)) => statements.push(statement),
                Ok(None) => {}
                Err(recovery) if recovery.tokens.is_empty() && self.reader.position() == before => {
                    // Nothing was consumed; step over the offending token.
                    let token = self.reader.advance();
                    let recovery = RecoverySyntax::new(recovery.data.id, token.span, vec![token]);
                    statements.push(Statement::Recovery(recovery));
                }
                Err(recovery) => statements.push(Statement::Recovery(recovery)),
            }
        }

        let previous: &dyn SyntaxNode = match statements.last() {
            Some(statement) => statement,
            None => &lbrace,
        };
        let flags = suppression(Some(previous));
        let lbrace_span = lbrace.span();
        let rbrace = match self.with_recovery(flags, &[SyntaxTokenKind::NewLine], |p| {
            p.expect_at(SyntaxTokenKind::RBrace, &messages::EXPECTED_RBRACE_AFTER_BLOCK, lbrace_span)
        }) {
            Ok(token) => Recovered::Parsed(token),
            Err(recovery) => Recovered::Recovery(recovery),
        };

        let id = self.next_id();
        BlockStatement::new(id, lbrace, statements, rbrace)
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expression = self.parse_expression()?;

        let flags = if self.diagnostics.is_empty() {
            RecoveryFlags::NONE
        } else {
            RecoveryFlags::SUPPRESS_DIAGNOSTICS
        };
        let expression_span = expression.span();
        let semicolon = match self.with_recovery(flags, &[SyntaxTokenKind::NewLine], |p| {
            p.expect_at(SyntaxTokenKind::Semicolon, &messages::EXPECTED_SEMICOLON, expression_span)
        }) {
            Ok(token) => Recovered::Parsed(token),
            Err(recovery) => Recovered::Recovery(recovery),
        };

        let id = self.next_id();
        Ok(Statement::Expression(ExpressionStatement::new(id, expression, semicolon)))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_assignment()
    }

    /// Right-associative; the target must be a plain identifier.
    fn parse_assignment(&mut self) -> ParseResult<Expression> {
        let expression = self.parse_or()?;

        let Some(equal) = self.optional_token(SyntaxTokenKind::Equal) else {
            return Ok(expression);
        };

        let value = self.expression_with_recovery(
            suppression(Some(&expression)),
            &[SyntaxTokenKind::Semicolon, SyntaxTokenKind::NewLine],
            |p| p.nested(|p| p.parse_assignment()),
        );

        match expression {
            Expression::Identifier(name) => {
                let id = self.next_id();
                Ok(Expression::Assignment(AssignmentExpression::new(id, name, equal, value)))
            }
            _ => Err(ParseError::new(value.span(), &messages::INVALID_ASSIGNMENT_TARGET)),
        }
    }

    /// `a or b or c` groups as `a or (b or c)`.
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let left = self.parse_and()?;
        match self.optional_token(SyntaxTokenKind::Or) {
            Some(operator) => {
                let right = self.nested(|p| p.parse_or())?;
                let id = self.next_id();
                Ok(Expression::Logical(LogicalExpression::new(id, left, operator, right)))
            }
            None => Ok(left),
        }
    }

    /// `a and b and c` groups as `a and (b and c)`.
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let left = self.parse_binary_expression(OperatorPrecedence::LogicalAnd)?;
        match self.optional_token(SyntaxTokenKind::And) {
            Some(operator) => {
                let right = self.nested(|p| p.parse_and())?;
                let id = self.next_id();
                Ok(Expression::Logical(LogicalExpression::new(id, left, operator, right)))
            }
            None => Ok(left),
        }
    }

    /// Precedence climbing over the equality, comparison, additive and
    /// multiplicative tiers. Each tier is left-associative.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> ParseResult<Expression> {
        let depth = self.recursion_depth;
        let result = self.parse_binary_chain(min_precedence);
        self.recursion_depth = depth;
        result
    }

    /// Every operator in a chain deepens the left operand, so each one counts
    /// as a nesting level.
    fn parse_binary_chain(&mut self, min_precedence: OperatorPrecedence) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let precedence = get_binary_operator_precedence(self.current_token());
            if precedence == OperatorPrecedence::Invalid
                || precedence <= min_precedence
                || precedence <= OperatorPrecedence::LogicalAnd
            {
                break;
            }

            self.enter_recursion()?;
            let operator = self.reader.advance();
            let right = self.parse_binary_expression(precedence)?;
            let id = self.next_id();
            left = Expression::Binary(BinaryExpression::new(id, left, operator, right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        self.nested(|p| p.parse_unary_worker())
    }

    fn parse_unary_worker(&mut self) -> ParseResult<Expression> {
        if self.reader.check_any(&[SyntaxTokenKind::Bang, SyntaxTokenKind::Minus]) {
            let operator = self.reader.advance();
            let operand = self.expression_with_recovery(
                RecoveryFlags::NONE,
                &[SyntaxTokenKind::RBrace, SyntaxTokenKind::RParen, SyntaxTokenKind::NewLine],
                |p| p.parse_unary(),
            );
            let id = self.next_id();
            return Ok(Expression::Unary(UnaryExpression::new(id, operator, operand)));
        }

        self.parse_call()
    }

    /// `name(arguments)`. Only a plain identifier can be called.
    fn parse_call(&mut self) -> ParseResult<Expression> {
        let expression = self.parse_primary()?;

        match expression {
            Expression::Identifier(name) if self.reader.check(SyntaxTokenKind::LParen) => {
                let lparen = self.reader.advance();
                Ok(self.finish_call(name, lparen))
            }
            other => Ok(other),
        }
    }

    fn finish_call(&mut self, name: IdentifierExpression, lparen: SyntaxToken) -> Expression {
        let mut arguments: Vec<Expression> = Vec::new();

        if !self.reader.check(SyntaxTokenKind::RParen) {
            loop {
                let argument = self.expression_with_recovery(
                    suppression(Some(&name)),
                    &[SyntaxTokenKind::Comma, SyntaxTokenKind::NewLine],
                    |p| p.parse_expression(),
                );
                arguments.push(argument);
                if !self.reader.matches(SyntaxTokenKind::Comma) {
                    break;
                }
            }
        }

        let previous: &dyn SyntaxNode = match arguments.last() {
            Some(argument) => argument,
            None => &name,
        };
        let rparen = self.token_with_recovery(
            SyntaxTokenKind::RParen,
            &messages::EXPECTED_RPAREN,
            suppression(Some(previous)),
            &[SyntaxTokenKind::NewLine],
        );

        let id = self.next_id();
        Expression::FunctionCall(FunctionCallExpression::new(id, name, lparen, arguments, rparen))
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            SyntaxTokenKind::True | SyntaxTokenKind::False => {
                let token = self.reader.advance();
                let value = token.kind == SyntaxTokenKind::True;
                let id = self.next_id();
                Ok(Expression::BooleanLiteral(BooleanLiteralExpression::new(id, token, value)))
            }
            SyntaxTokenKind::Integer => {
                let token = self.reader.advance();
                let Ok(value) = token.lexeme.parse::<i64>() else {
                    return Err(ParseError::new(token.span, &messages::INTEGER_LITERAL_TOO_LARGE)
                        .with_arg(token.lexeme.clone()));
                };
                let id = self.next_id();
                Ok(Expression::IntegerLiteral(IntegerLiteralExpression::new(id, token, value)))
            }
            SyntaxTokenKind::String => {
                let token = self.reader.advance();
                let value = token.literal.clone().unwrap_or_default();
                let id = self.next_id();
                Ok(Expression::StringLiteral(StringLiteralExpression::new(id, token, value)))
            }
            SyntaxTokenKind::LParen => {
                let lparen = self.reader.advance();
                let expression = self.parse_expression()?;
                let span = TextSpan::between(lparen.span, expression.span());
                let rparen = self.expect_at(SyntaxTokenKind::RParen, &messages::EXPECTED_RPAREN, span)?;
                let id = self.next_id();
                Ok(Expression::Group(GroupExpression::new(id, lparen, expression, rparen)))
            }
            SyntaxTokenKind::Identifier => {
                let token = self.reader.advance();
                let id = self.next_id();
                Ok(Expression::Identifier(IdentifierExpression::new(id, token)))
            }
            _ => Err(ParseError::new(self.reader.peek().span, &messages::UNRECOGNIZED_EXPRESSION)),
        }
    }
}
