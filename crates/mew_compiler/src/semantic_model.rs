//! The bound, lowered and flattened program.

use crate::symbol_cache::SymbolCache;
use indexmap::IndexMap;
use mew_binder::{
    bind_global_scope, flatten, flatten_all, function_declaration, lower, lower_all, Binder, BoundBlockStatement,
    BoundGlobalScope, BoundStatement, FunctionId, SymbolArena, SymbolRef, TreeId,
};
use mew_diagnostics::DiagnosticCollection;
use mew_parser::SyntaxTree;
use mew_syntax::{NodeId, Statement};
use std::sync::{Arc, OnceLock};
use tracing::{debug, debug_span, info_span};

/// Everything the back ends and editor tooling read from a compilation.
///
/// Function bodies and the top-level statements are lowered and flattened:
/// they contain no blocks, `if`, `while` or `loop` statements, only labels
/// and gotos. If [`SemanticModel::diagnostics`] has no errors, no bound node
/// has the error type.
#[derive(Debug)]
pub struct SemanticModel {
    syntax_trees: Vec<Arc<SyntaxTree>>,
    symbols: SymbolArena,
    global_scope: BoundGlobalScope,
    functions: IndexMap<FunctionId, BoundBlockStatement>,
    external_functions: Vec<FunctionId>,
    statements: Vec<BoundStatement>,
    diagnostics: DiagnosticCollection,
    symbol_cache: OnceLock<SymbolCache>,
}

impl SemanticModel {
    /// Bind `syntax_trees` as one program. External functions are stamped
    /// with `library`.
    pub fn create(syntax_trees: Vec<Arc<SyntaxTree>>, library: &str) -> Self {
        let _span = info_span!("semantic_model", trees = syntax_trees.len()).entered();

        let mut diagnostics = DiagnosticCollection::new();
        for tree in &syntax_trees {
            diagnostics.extend(tree.diagnostics().clone());
        }

        let mut symbols = SymbolArena::default();
        let mut global_scope = bind_global_scope(&syntax_trees, &mut symbols, library);
        diagnostics.extend(global_scope.diagnostics().clone());

        let declared: Vec<(FunctionId, bool)> = symbols
            .functions()
            .map(|(id, symbol)| (id, symbol.is_external()))
            .collect();

        let mut functions = IndexMap::new();
        let mut external_functions = Vec::new();
        for (id, external) in declared {
            if external {
                external_functions.push(id);
                continue;
            }

            let symbol = symbols.function(id);
            let Some(declaration) = function_declaration(&syntax_trees, symbol) else {
                continue;
            };
            let path = Arc::clone(syntax_trees[symbol.declaration.tree.index()].path());
            let _span = debug_span!("bind_function", function = %symbol.name_text).entered();

            let mut binder = Binder::for_function(&global_scope, &mut symbols, id, path);
            let body = binder.bind_statement(&declaration.body);
            diagnostics.extend(binder.take_diagnostics());
            drop(binder);

            functions.insert(id, flatten(&lower(&body)));
        }

        let mut binder = Binder::new(&global_scope, &mut symbols);
        let mut bound = Vec::new();
        for (index, tree) in syntax_trees.iter().enumerate() {
            binder.set_tree(TreeId(index as u32), Arc::clone(tree.path()));
            for statement in &tree.root().statements {
                if !is_declaration(statement) {
                    bound.push(binder.bind_statement(statement));
                }
            }
        }
        diagnostics.extend(binder.take_diagnostics());
        let variables = binder.root_variables();
        drop(binder);
        global_scope.set_variables(variables);

        let statements = {
            let _span = debug_span!("lower").entered();
            flatten_all(&lower_all(&bound))
        };

        debug!(
            functions = functions.len(),
            externals = external_functions.len(),
            statements = statements.len(),
            diagnostics = diagnostics.len(),
            "built semantic model"
        );

        Self {
            syntax_trees,
            symbols,
            global_scope,
            functions,
            external_functions,
            statements,
            diagnostics,
            symbol_cache: OnceLock::new(),
        }
    }

    #[inline]
    pub fn syntax_trees(&self) -> &[Arc<SyntaxTree>] {
        &self.syntax_trees
    }

    /// The symbol arena: names and types of every symbol in the model.
    #[inline]
    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    #[inline]
    pub fn global_scope(&self) -> &BoundGlobalScope {
        &self.global_scope
    }

    /// Flattened bodies of functions with a body, in declaration order.
    #[inline]
    pub fn functions(&self) -> &IndexMap<FunctionId, BoundBlockStatement> {
        &self.functions
    }

    pub fn function_body(&self, function: FunctionId) -> Option<&BoundBlockStatement> {
        self.functions.get(&function)
    }

    #[inline]
    pub fn external_functions(&self) -> &[FunctionId] {
        &self.external_functions
    }

    /// The flattened top-level statements of all trees, in tree order.
    #[inline]
    pub fn statements(&self) -> &[BoundStatement] {
        &self.statements
    }

    #[inline]
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// The id of `tree` within this model, if it belongs to it.
    pub fn tree_id(&self, tree: &SyntaxTree) -> Option<TreeId> {
        self.syntax_trees
            .iter()
            .position(|t| std::ptr::eq(Arc::as_ptr(t), tree))
            .map(|index| TreeId(index as u32))
    }

    /// The syntax node to symbol map, built on first use.
    pub fn symbol_cache(&self) -> &SymbolCache {
        self.symbol_cache.get_or_init(|| SymbolCache::build(self))
    }

    /// Shorthand for a [`SymbolCache`] lookup.
    pub fn get_symbol(&self, tree: TreeId, node: NodeId) -> Option<SymbolRef> {
        self.symbol_cache().get_symbol(tree, node)
    }
}

#[inline]
fn is_declaration(statement: &Statement) -> bool {
    matches!(
        statement,
        Statement::FunctionDeclaration(_) | Statement::ExternalFunctionDeclaration(_)
    )
}
