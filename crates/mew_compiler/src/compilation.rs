//! Compilations: an immutable set of syntax trees plus options.

use crate::semantic_model::SemanticModel;
use mew_binder::DEFAULT_LIBRARY;
use mew_diagnostics::DiagnosticCollection;
use mew_parser::{ParseOptions, SyntaxTree, DEFAULT_MAX_SYNCHRONIZATIONS};
use rayon::prelude::*;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Settings that reach the core from a project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationOptions {
    /// Library name stamped onto external function symbols.
    pub library: String,
    /// Parser synchronization cap per file.
    pub max_synchronizations: usize,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_string(),
            max_synchronizations: DEFAULT_MAX_SYNCHRONIZATIONS,
        }
    }
}

impl CompilationOptions {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_synchronizations: self.max_synchronizations,
        }
    }
}

/// A named set of syntax trees. Adding a tree produces a new compilation;
/// the semantic model of each compilation is built at most once.
#[derive(Debug)]
pub struct Compilation {
    name: String,
    options: CompilationOptions,
    syntax_trees: Vec<Arc<SyntaxTree>>,
    model: OnceLock<Arc<SemanticModel>>,
}

impl Compilation {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, CompilationOptions::default())
    }

    pub fn with_options(name: impl Into<String>, options: CompilationOptions) -> Self {
        Self {
            name: name.into(),
            options,
            syntax_trees: Vec::new(),
            model: OnceLock::new(),
        }
    }

    /// Parse `(path, source)` pairs in parallel. Trees keep the input order.
    pub fn parse_sources(name: impl Into<String>, sources: Vec<(String, String)>, options: CompilationOptions) -> Self {
        let parse_options = options.parse_options();
        let syntax_trees: Vec<Arc<SyntaxTree>> = sources
            .into_par_iter()
            .map(|(path, source)| Arc::new(SyntaxTree::parse_with_options(path, source, parse_options)))
            .collect();
        debug!(trees = syntax_trees.len(), "parsed sources");

        Self {
            name: name.into(),
            options,
            syntax_trees,
            model: OnceLock::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }

    #[inline]
    pub fn syntax_trees(&self) -> &[Arc<SyntaxTree>] {
        &self.syntax_trees
    }

    /// A new compilation with `tree` appended.
    pub fn add_syntax_tree(&self, tree: Arc<SyntaxTree>) -> Compilation {
        self.add_syntax_trees([tree])
    }

    pub fn add_syntax_trees(&self, trees: impl IntoIterator<Item = Arc<SyntaxTree>>) -> Compilation {
        let mut syntax_trees = self.syntax_trees.clone();
        syntax_trees.extend(trees);
        Self {
            name: self.name.clone(),
            options: self.options.clone(),
            syntax_trees,
            model: OnceLock::new(),
        }
    }

    /// The semantic model, bound on first use. Concurrent first calls bind
    /// once and all observe the same model.
    pub fn semantic_model(&self) -> Arc<SemanticModel> {
        Arc::clone(self.model())
    }

    /// Diagnostics of every stage, in pipeline order.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        self.model().diagnostics()
    }

    fn model(&self) -> &Arc<SemanticModel> {
        self.model
            .get_or_init(|| Arc::new(SemanticModel::create(self.syntax_trees.clone(), &self.options.library)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(path: &str, source: &str) -> Arc<SyntaxTree> {
        Arc::new(SyntaxTree::parse(path, source))
    }

    #[test]
    fn test_add_syntax_tree_returns_new_compilation() {
        let empty = Compilation::new("app");
        let one = empty.add_syntax_tree(tree("a.mew", "let a = 1;"));
        assert!(empty.syntax_trees().is_empty());
        assert_eq!(one.syntax_trees().len(), 1);
        assert_eq!(one.name(), "app");
    }

    #[test]
    fn test_semantic_model_is_built_once() {
        let compilation = Compilation::new("app").add_syntax_tree(tree("a.mew", "let a = 1;"));
        let first = compilation.semantic_model();
        let second = compilation.semantic_model();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_first_access_sees_one_model() {
        let compilation = Compilation::new("app").add_syntax_tree(tree("a.mew", "let a = 1 + false;"));
        let models: Vec<Arc<SemanticModel>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| compilation.semantic_model())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(models.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
        assert_eq!(compilation.diagnostics().len(), 1);
    }

    #[test]
    fn test_parse_sources_keeps_order() {
        let sources = (0..8).map(|i| (format!("f{i}.mew"), format!("let v{i} = {i};"))).collect();
        let compilation = Compilation::parse_sources("app", sources, CompilationOptions::default());
        let paths: Vec<&str> = compilation.syntax_trees().iter().map(|t| &**t.path()).collect();
        assert_eq!(paths, (0..8).map(|i| format!("f{i}.mew")).collect::<Vec<_>>());
    }

    #[test]
    fn test_default_options() {
        let options = CompilationOptions::default();
        assert_eq!(options.library, "mewstd");
        assert_eq!(options.max_synchronizations, 100);
    }
}
