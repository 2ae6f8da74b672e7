//! Diagnostic rendering through miette's graphical report handler.

use mew_core::text::TextSpan;
use mew_diagnostics::{Diagnostic, Severity};
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteDiagnostic, NamedSource, Report, SourceSpan};

pub struct DiagnosticRenderer {
    handler: GraphicalReportHandler,
}

impl DiagnosticRenderer {
    /// `color` selects the Unicode theme; otherwise plain ASCII is used.
    pub fn new(color: bool) -> Self {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::ascii()
        };
        Self {
            handler: GraphicalReportHandler::new_themed(theme),
        }
    }

    /// Render `diagnostic` against `source`, the text of the file it points
    /// into. Falls back to the one-line form when there is no source.
    pub fn render(&self, diagnostic: &Diagnostic, source: Option<&str>) -> String {
        let Some(source) = source else {
            return format!("{diagnostic}\n");
        };

        let report = to_report(diagnostic, source);
        let mut output = String::new();
        match self.handler.render_report(&mut output, &*report) {
            Ok(()) => output,
            Err(_) => format!("{diagnostic}\n"),
        }
    }
}

/// The diagnostic as a miette report: the primary span unlabeled, each note
/// in the same file as a labeled secondary span.
pub fn to_report(diagnostic: &Diagnostic, source: &str) -> Report {
    let mut labels = vec![LabeledSpan::new_primary_with_span(None, source_span(diagnostic.span()))];
    labels.extend(
        diagnostic
            .notes
            .iter()
            .filter(|note| note.location.path == diagnostic.location.path)
            .map(|note| LabeledSpan::new_with_span(Some(note.message.clone()), source_span(note.location.span))),
    );

    let report = MietteDiagnostic::new(diagnostic.message_text.clone())
        .with_code(diagnostic.code_string())
        .with_severity(severity(diagnostic.severity))
        .with_labels(labels);

    Report::new(report).with_source_code(NamedSource::new(&*diagnostic.location.path, source.to_string()))
}

#[inline]
fn source_span(span: TextSpan) -> SourceSpan {
    SourceSpan::from((span.start as usize, span.length as usize))
}

fn severity(severity: Severity) -> miette::Severity {
    match severity {
        Severity::Error => miette::Severity::Error,
        Severity::Warning => miette::Severity::Warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mew_core::text::Location;
    use mew_diagnostics::messages;
    use std::sync::Arc;

    fn binary_error() -> Diagnostic {
        let path: Arc<str> = Arc::from("main.mew");
        Diagnostic::new(
            Location::new(Arc::clone(&path), TextSpan::new(12, 1)),
            &messages::BINARY_OPERATOR_NOT_DEFINED,
            &["+", "int", "bool"],
        )
        .with_note(TextSpan::new(10, 1), "This is of type 'int'")
        .with_note(TextSpan::new(14, 5), "This is of type 'bool'")
    }

    #[test]
    fn test_report_carries_code_severity_and_labels() {
        let source = "let foo = 1 + false;";
        let report = to_report(&binary_error(), source);
        assert_eq!(report.code().map(|c| c.to_string()).as_deref(), Some("MEW1105"));
        assert_eq!(report.severity(), Some(miette::Severity::Error));

        let labels: Vec<LabeledSpan> = report.labels().map(|labels| labels.collect()).unwrap_or_default();
        assert_eq!(labels.len(), 3);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 12);
        assert_eq!(labels[2].label(), Some("This is of type 'bool'"));
    }

    #[test]
    fn test_render_mentions_message_and_notes() {
        let rendered = DiagnosticRenderer::new(false).render(&binary_error(), Some("let foo = 1 + false;"));
        assert!(rendered.contains("MEW1105"));
        assert!(rendered.contains("Binary operator '+' is not defined for types 'int' and 'bool'"));
        assert!(rendered.contains("This is of type 'bool'"));
    }

    #[test]
    fn test_render_without_source_is_one_line() {
        let rendered = DiagnosticRenderer::new(false).render(&binary_error(), None);
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.starts_with("main.mew"));
    }
}
