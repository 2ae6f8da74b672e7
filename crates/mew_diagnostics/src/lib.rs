//! mew_diagnostics: Diagnostic catalog and reporting infrastructure.
//!
//! Every stage of the front end reports problems as [`Diagnostic`] values
//! built from the closed catalog in [`messages`]. A diagnostic has a code,
//! a severity, a primary location and zero or more secondary notes that
//! point at related source, such as the operands of a failed binary operator.

pub mod messages;

use mew_core::text::{Location, TextSpan};
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A catalog entry: a code, a severity and a message template.
///
/// Templates may contain `{0}`, `{1}`, ... placeholders that are filled in
/// by [`format_message`] when a [`Diagnostic`] is created.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The numeric part of the code; rendered as `MEW{code:04}`.
    pub code: u32,
    pub severity: Severity,
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// The rendered code, e.g. `MEW1105`.
    pub fn code_string(&self) -> String {
        format!("MEW{:04}", self.code)
    }
}

/// Secondary information attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticNote {
    pub location: Location,
    pub message: String,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: u32,
    pub severity: Severity,
    /// Where the problem is; the primary label when rendered.
    pub location: Location,
    /// The message with every placeholder substituted.
    pub message_text: String,
    pub notes: Vec<DiagnosticNote>,
}

impl Diagnostic {
    /// Create a diagnostic from a catalog entry.
    pub fn new(location: Location, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            code: message.code,
            severity: message.severity,
            location,
            message_text: format_message(message.message, args),
            notes: Vec::new(),
        }
    }

    /// Attach a note pointing at another span of the same file.
    pub fn with_note(mut self, span: TextSpan, message: impl Into<String>) -> Self {
        self.notes.push(DiagnosticNote {
            location: self.location.with_span(span),
            message: message.into(),
        });
        self
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.location.span
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The rendered code, e.g. `MEW1105`.
    pub fn code_string(&self) -> String {
        format!("MEW{:04}", self.code)
    }

    /// Severity and message without location, e.g.
    /// `Error: Undeclared variable 'corgi'`.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.severity, self.message_text)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location,
            self.severity,
            self.code_string(),
            self.message_text
        )
    }
}

/// Format a diagnostic message template with arguments.
/// Replaces `{0}`, `{1}`, etc. with the corresponding arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Append every diagnostic of `other`, keeping its order.
    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn extend_from_slice(&mut self, diagnostics: &[Diagnostic]) {
        self.diagnostics.extend_from_slice(diagnostics);
    }

    /// Sort by file, then by position. The sort is stable, so diagnostics
    /// reported at the same position keep their reporting order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.location
                .path
                .cmp(&b.location.path)
                .then(a.location.span.start.cmp(&b.location.span.start))
        });
    }

    /// Sort by position only, for diagnostics that all come from one file.
    pub fn sort_by_position(&mut self) {
        self.diagnostics.sort_by_key(|d| d.location.span.start);
    }
}

impl<'a> IntoIterator for &'a DiagnosticCollection {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl FromIterator<Diagnostic> for DiagnosticCollection {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}
