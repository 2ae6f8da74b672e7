//! Panic-mode error recovery.
//!
//! A sub-parse that fails returns a [`ParseError`]. [`Parser::with_recovery`]
//! turns that error into a diagnostic, skips ahead to one of the caller's
//! terminator tokens and hands back a [`RecoverySyntax`] covering whatever
//! was skipped. The suppression rule keeps one root error from producing a
//! cascade: a recovery that directly follows an empty placeholder or an
//! invalid node records its diagnostic silently.

use bitflags::bitflags;
use mew_core::text::{Location, TextSpan};
use mew_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use mew_syntax::{IdentifierExpression, RecoverySyntax, SyntaxNode, SyntaxTokenKind};
use std::sync::Arc;
use tracing::{trace, warn};

use crate::parser::Parser;

bitflags! {
    /// Options for a single recovery point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct RecoveryFlags: u8 {
        const NONE = 0;
        /// Resynchronize, but do not report the diagnostic.
        const SUPPRESS_DIAGNOSTICS = 1 << 0;
    }
}

/// A failed sub-parse: where it failed and what to report.
#[derive(Debug, Clone)]
pub(crate) struct ParseError {
    pub span: TextSpan,
    pub message: &'static DiagnosticMessage,
    pub args: Vec<String>,
}

impl ParseError {
    pub fn new(span: TextSpan, message: &'static DiagnosticMessage) -> Self {
        Self {
            span,
            message,
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn into_diagnostic(self, path: Arc<str>) -> Diagnostic {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        Diagnostic::new(Location::new(path, self.span), self.message, &args)
    }
}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Decide whether a recovery that follows `previous` should stay silent.
pub(crate) fn suppression(previous: Option<&dyn SyntaxNode>) -> RecoveryFlags {
    let Some(node) = previous else {
        return RecoveryFlags::NONE;
    };

    let suppress = if node.is_synthesized() {
        node.span().is_empty()
    } else {
        !node.is_valid()
    };

    if suppress {
        RecoveryFlags::SUPPRESS_DIAGNOSTICS
    } else {
        RecoveryFlags::NONE
    }
}

impl Parser {
    // ========================================================================
    // Recovery points
    // ========================================================================

    /// Run `parse`; on failure, report, resynchronize on `terminators` and
    /// return the placeholder for the skipped tokens.
    pub(crate) fn with_recovery<T>(
        &mut self,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> Result<T, RecoverySyntax> {
        let start = self.reader.position();
        match parse(self) {
            Ok(value) => Ok(value),
            Err(error) => Err(self.recover(start, error, flags, terminators)),
        }
    }

    /// Parse an identifier, reporting reserved keywords specially.
    pub(crate) fn identifier_with_recovery(
        &mut self,
        message: &'static DiagnosticMessage,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
    ) -> IdentifierExpression {
        let result = self.with_recovery(flags, terminators, |p| {
            let current = p.reader.peek();
            if current.kind.is_keyword() {
                return Err(ParseError::new(current.span, &messages::EXPECTED_IDENTIFIER_FOUND_KEYWORD)
                    .with_arg(current.lexeme.clone()));
            }

            let token = p.expect(SyntaxTokenKind::Identifier, message)?;
            Ok(IdentifierExpression::new(p.next_id(), token))
        });

        match result {
            Ok(identifier) => identifier,
            Err(recovery) => IdentifierExpression::missing(self.next_id(), recovery),
        }
    }

    fn recover(
        &mut self,
        start: usize,
        error: ParseError,
        flags: RecoveryFlags,
        terminators: &[SyntaxTokenKind],
    ) -> RecoverySyntax {
        let diagnostic = error.into_diagnostic(Arc::clone(&self.path));

        self.count_synchronization();
        self.synchronize_to(terminators);

        let skipped = self.reader.slice(start, self.reader.position()).to_vec();
        let fallback = self.reader.token_at(start).span.start;
        let span = TextSpan::safe_between(skipped.iter().map(|t| t.span), fallback);

        if flags.contains(RecoveryFlags::SUPPRESS_DIAGNOSTICS) {
            trace!(code = diagnostic.code, "suppressed cascading diagnostic");
        } else {
            self.report(diagnostic);
        }

        RecoverySyntax::new(self.next_id(), span, skipped)
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Skip tokens until one of `terminators` is current. A `NewLine`
    /// terminator matches any token followed by a line break; that token is
    /// consumed so the next parse starts on the new line.
    fn synchronize_to(&mut self, terminators: &[SyntaxTokenKind]) {
        if self.reader.is_at_end() {
            return;
        }

        let stops_at_newline = terminators.contains(&SyntaxTokenKind::NewLine);
        if stops_at_newline && self.reader.position() > 0 && self.reader.previous().has_trailing_newline() {
            return;
        }

        while !self.reader.is_at_end() {
            let current = self.reader.peek();
            if terminators.contains(&current.kind) {
                return;
            }
            if stops_at_newline && current.has_trailing_newline() {
                self.reader.advance();
                return;
            }
            self.reader.advance();
        }
    }

    /// Skip to the start of the next declaration or statement after an error
    /// that escaped to the top level.
    pub(crate) fn synchronize(&mut self) {
        self.count_synchronization();
        self.reader.advance();

        while !self.reader.is_at_end() {
            if self.reader.previous().kind == SyntaxTokenKind::Semicolon {
                return;
            }

            match self.reader.peek().kind {
                SyntaxTokenKind::Fn
                | SyntaxTokenKind::If
                | SyntaxTokenKind::Break
                | SyntaxTokenKind::Continue
                | SyntaxTokenKind::Return
                | SyntaxTokenKind::Loop
                | SyntaxTokenKind::Let
                | SyntaxTokenKind::While => return,
                _ => {
                    self.reader.advance();
                }
            }
        }
    }

    /// Count one synchronization. Past the cap the parser reports once, jumps
    /// to the end of input and stops reporting.
    fn count_synchronization(&mut self) {
        self.synchronizations += 1;
        if self.synchronizations <= self.max_synchronizations || self.aborted {
            return;
        }

        warn!(
            path = %self.path,
            synchronizations = self.synchronizations,
            "too many syntax errors, skipping the rest of the file"
        );

        let span = self.reader.peek().span;
        let diagnostic = Diagnostic::new(
            Location::new(Arc::clone(&self.path), span),
            &messages::TOO_MANY_SYNTAX_ERRORS,
            &[],
        );
        self.diagnostics.add(diagnostic);
        self.aborted = true;
        self.reader.skip_to_end();
    }

    /// Add a diagnostic unless the parser has given up on this file.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        if !self.aborted {
            self.diagnostics.add(diagnostic);
        }
    }
}
