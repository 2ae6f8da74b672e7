//! The declaration pass.
//!
//! Before any body is bound, every function and external function signature
//! in every syntax tree is declared in one program-wide function table.
//! Bodies can therefore call functions declared later or in other files.

use crate::bound::{SyntaxRef, TreeId};
use crate::scope::{FunctionTable, TypeTable};
use crate::symbols::{FunctionId, FunctionSymbol, SymbolArena, TypeId, VariableId, VariableKind, VariableSymbol};
use mew_core::text::Location;
use mew_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use mew_parser::SyntaxTree;
use mew_syntax::{FunctionDeclaration, FunctionSignature, IdentifierExpression, NodeId, Statement, SyntaxNode};
use std::sync::Arc;
use tracing::{debug, info_span};

/// Library name stamped onto external functions unless configured otherwise.
pub const DEFAULT_LIBRARY: &str = "mewstd";

/// The program-wide tables produced by the declaration pass.
#[derive(Debug, Clone)]
pub struct BoundGlobalScope {
    types: TypeTable,
    functions: FunctionTable,
    variables: Vec<VariableId>,
    diagnostics: DiagnosticCollection,
}

impl BoundGlobalScope {
    #[inline]
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    #[inline]
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Variables declared by top-level `let` statements. Empty until the
    /// top-level statements have been bound.
    #[inline]
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn set_variables(&mut self, variables: Vec<VariableId>) {
        self.variables = variables;
    }

    /// Diagnostics reported while declaring signatures.
    #[inline]
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }
}

/// Declare every function of `trees`: all function declarations first, in
/// tree order, then all external function declarations.
pub fn bind_global_scope(trees: &[Arc<SyntaxTree>], symbols: &mut SymbolArena, library: &str) -> BoundGlobalScope {
    let _span = info_span!("bind_global_scope", trees = trees.len()).entered();

    let types = TypeTable::with_primitives(symbols);
    let mut declarer = Declarer {
        symbols,
        types,
        functions: FunctionTable::new(),
        diagnostics: DiagnosticCollection::new(),
    };

    for (index, tree) in trees.iter().enumerate() {
        let tree_id = TreeId(index as u32);
        for statement in &tree.root().statements {
            if let Statement::FunctionDeclaration(declaration) = statement {
                let syntax = SyntaxRef::new(tree_id, declaration.data.id, declaration.data.span);
                declarer.declare_function(tree_id, tree.path(), &declaration.signature, syntax, None);
            }
        }
    }

    for (index, tree) in trees.iter().enumerate() {
        let tree_id = TreeId(index as u32);
        for statement in &tree.root().statements {
            if let Statement::ExternalFunctionDeclaration(declaration) = statement {
                let syntax = SyntaxRef::new(tree_id, declaration.data.id, declaration.data.span);
                declarer.declare_function(tree_id, tree.path(), &declaration.signature, syntax, Some(library));
            }
        }
    }

    debug!(
        functions = declarer.functions.len(),
        diagnostics = declarer.diagnostics.len(),
        "declared functions"
    );

    BoundGlobalScope {
        types: declarer.types,
        functions: declarer.functions,
        variables: Vec::new(),
        diagnostics: declarer.diagnostics,
    }
}

/// The top-level declaration a function symbol was created from, if it has
/// a body.
pub fn function_declaration<'t>(trees: &'t [Arc<SyntaxTree>], symbol: &FunctionSymbol) -> Option<&'t FunctionDeclaration> {
    let tree = trees.get(symbol.declaration.tree.index())?;
    find_function_declaration(tree, symbol.declaration.node)
}

fn find_function_declaration(tree: &SyntaxTree, node: NodeId) -> Option<&FunctionDeclaration> {
    tree.root().statements.iter().find_map(|statement| match statement {
        Statement::FunctionDeclaration(declaration) if declaration.data.id == node => Some(declaration),
        _ => None,
    })
}

struct Declarer<'a> {
    symbols: &'a mut SymbolArena,
    types: TypeTable,
    functions: FunctionTable,
    diagnostics: DiagnosticCollection,
}

impl Declarer<'_> {
    fn declare_function(
        &mut self,
        tree: TreeId,
        path: &Arc<str>,
        signature: &FunctionSignature,
        declaration: SyntaxRef,
        library: Option<&str>,
    ) -> Option<FunctionId> {
        let parameter_types: Vec<TypeId> = signature
            .parameters
            .iter()
            .map(|parameter| self.bind_type(path, &parameter.type_annotation))
            .collect();

        let return_type = match &signature.return_type {
            Some(return_type) => self.bind_type(path, return_type),
            None => TypeId::VOID,
        };

        // The parser already reported the missing name.
        if !signature.name.is_valid() {
            return None;
        }

        let name_text = &signature.name.name;
        let name = self.symbols.names().intern(name_text);
        if self
            .functions
            .contains_signature(self.symbols, name, return_type, &parameter_types)
        {
            self.diagnostics.add(Diagnostic::new(
                Location::new(Arc::clone(path), declaration.span),
                &messages::FUNCTION_ALREADY_DECLARED,
                &[name_text.as_str()],
            ));
            return None;
        }

        let mut parameters = Vec::with_capacity(parameter_types.len());
        for (parameter, &ty) in signature.parameters.iter().zip(&parameter_types) {
            let parameter_name = self.symbols.names().intern(&parameter.name.name);
            parameters.push(self.symbols.add_variable(VariableSymbol {
                name: parameter_name,
                name_text: parameter.name.name.clone(),
                ty,
                kind: VariableKind::Parameter,
                declaration: SyntaxRef::new(tree, parameter.data.id, parameter.data.span),
                name_syntax: identifier_ref(tree, &parameter.name),
                type_syntax: Some(identifier_ref(tree, &parameter.type_annotation)),
                is_named: parameter.name.is_valid(),
            }));
        }

        let id = self.symbols.add_function(FunctionSymbol {
            name,
            name_text: name_text.clone(),
            parameters,
            return_type,
            declaration,
            name_syntax: identifier_ref(tree, &signature.name),
            return_type_syntax: signature.return_type.as_ref().map(|t| identifier_ref(tree, t)),
            library: library.map(str::to_string),
        });
        self.functions.insert(name, id);

        debug!(function = %name_text, external = library.is_some(), "declared function");
        Some(id)
    }

    /// Resolve a type annotation. Unknown names are reported and bound to a
    /// shared placeholder so later checks still have a type to compare.
    fn bind_type(&mut self, path: &Arc<str>, syntax: &IdentifierExpression) -> TypeId {
        if !syntax.is_valid() {
            return TypeId::ERROR;
        }

        let known = self
            .symbols
            .names()
            .get(&syntax.name)
            .and_then(|name| self.types.get(name));
        if let Some(ty) = known {
            return ty;
        }

        self.diagnostics.add(Diagnostic::new(
            Location::new(Arc::clone(path), syntax.span()),
            &messages::UNDECLARED_TYPE,
            &[syntax.name.as_str()],
        ));
        self.types.undeclared(self.symbols, &syntax.name)
    }
}

#[inline]
fn identifier_ref(tree: TreeId, identifier: &IdentifierExpression) -> SyntaxRef {
    SyntaxRef::new(tree, identifier.data.id, identifier.data.span)
}
