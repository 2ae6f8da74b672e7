//! A parsed source file.

use mew_core::text::LineMap;
use mew_diagnostics::DiagnosticCollection;
use mew_syntax::CompilationUnit;
use std::sync::Arc;
use tracing::info_span;

use crate::parser::{ParseOptions, Parser};

/// One source file together with its syntax tree and the lexer and parser
/// diagnostics produced while building it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    path: Arc<str>,
    source: Arc<str>,
    root: CompilationUnit,
    diagnostics: DiagnosticCollection,
    line_map: LineMap,
}

impl SyntaxTree {
    /// Lex and parse `source` with the default options.
    pub fn parse(path: impl Into<Arc<str>>, source: impl Into<Arc<str>>) -> Self {
        Self::parse_with_options(path, source, ParseOptions::default())
    }

    pub fn parse_with_options(
        path: impl Into<Arc<str>>,
        source: impl Into<Arc<str>>,
        options: ParseOptions,
    ) -> Self {
        let path: Arc<str> = path.into();
        let source: Arc<str> = source.into();
        let _span = info_span!("parse", path = %path).entered();

        let lexed = mew_lexer::scan(Arc::clone(&path), &source);
        let mut parser = Parser::new(Arc::clone(&path), lexed.tokens, options);
        let root = parser.parse_compilation_unit();

        // Lexer diagnostics first, then parser diagnostics, ordered by
        // position. The sort is stable so ties keep that order.
        let mut diagnostics = lexed.diagnostics;
        diagnostics.extend(parser.take_diagnostics());
        diagnostics.sort_by_position();

        let line_map = LineMap::new(&source);
        Self {
            path,
            source,
            root,
            diagnostics,
            line_map,
        }
    }

    #[inline]
    pub fn path(&self) -> &Arc<str> {
        &self.path
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn root(&self) -> &CompilationUnit {
        &self.root
    }

    #[inline]
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    #[inline]
    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Indented outline of the tree's nodes and tokens.
    pub fn dump(&self) -> String {
        mew_syntax::dump::dump(&self.root)
    }
}
