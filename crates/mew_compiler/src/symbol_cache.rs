//! Syntax node to symbol lookup.

use crate::semantic_model::SemanticModel;
use mew_binder::{BoundExpression, BoundStatement, SymbolArena, SymbolRef, SyntaxRef, TreeId};
use mew_syntax::NodeId;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Maps every syntax node that names a symbol to that symbol.
///
/// Declarations map their name (and, for functions and parameters, the
/// declaration node itself) to the declared symbol. Type annotations map to
/// the type they resolved to. Uses map to the symbol the binder resolved,
/// so a call site points at the chosen overload.
#[derive(Debug, Default)]
pub struct SymbolCache {
    symbols: FxHashMap<(TreeId, NodeId), SymbolRef>,
}

impl SymbolCache {
    pub(crate) fn build(model: &SemanticModel) -> Self {
        let mut builder = CacheBuilder {
            symbols: FxHashMap::default(),
        };
        builder.declarations(model.symbols());

        for body in model.functions().values() {
            for statement in &body.statements {
                builder.statement(statement);
            }
        }
        for statement in model.statements() {
            builder.statement(statement);
        }

        debug!(entries = builder.symbols.len(), "built symbol cache");
        Self {
            symbols: builder.symbols,
        }
    }

    pub fn get_symbol(&self, tree: TreeId, node: NodeId) -> Option<SymbolRef> {
        self.symbols.get(&(tree, node)).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((TreeId, NodeId), SymbolRef)> + '_ {
        self.symbols.iter().map(|(&key, &symbol)| (key, symbol))
    }
}

struct CacheBuilder {
    symbols: FxHashMap<(TreeId, NodeId), SymbolRef>,
}

impl CacheBuilder {
    fn record(&mut self, syntax: SyntaxRef, symbol: SymbolRef) {
        self.symbols.insert((syntax.tree, syntax.node), symbol);
    }

    fn declarations(&mut self, arena: &SymbolArena) {
        for (id, function) in arena.functions() {
            self.record(function.declaration, SymbolRef::Function(id));
            self.record(function.name_syntax, SymbolRef::Function(id));
            if let Some(syntax) = function.return_type_syntax {
                self.record(syntax, SymbolRef::Type(function.return_type));
            }

            for &parameter in &function.parameters {
                let symbol = arena.variable(parameter);
                self.record(symbol.declaration, SymbolRef::Variable(parameter));
                self.record(symbol.name_syntax, SymbolRef::Variable(parameter));
                if let Some(syntax) = symbol.type_syntax {
                    self.record(syntax, SymbolRef::Type(symbol.ty));
                }
            }
        }
    }

    fn statement(&mut self, statement: &BoundStatement) {
        match statement {
            BoundStatement::Block(n) => {
                for statement in &n.statements {
                    self.statement(statement);
                }
            }
            BoundStatement::ConditionalGoto(n) => self.expression(&n.condition),
            BoundStatement::Expression(n) => self.expression(&n.expression),
            BoundStatement::If(n) => {
                self.expression(&n.condition);
                self.statement(&n.then_branch);
                if let Some(else_branch) = &n.else_branch {
                    self.statement(else_branch);
                }
            }
            BoundStatement::Let(n) => {
                self.record(n.syntax, SymbolRef::Variable(n.variable));
                self.record(n.name, SymbolRef::Variable(n.variable));
                self.expression(&n.initializer);
            }
            BoundStatement::Loop(n) => self.statement(&n.body),
            BoundStatement::Return(n) => {
                if let Some(expression) = &n.expression {
                    self.expression(expression);
                }
            }
            BoundStatement::While(n) => {
                self.expression(&n.condition);
                self.statement(&n.body);
            }
            BoundStatement::Goto(_) | BoundStatement::Label(_) => {}
        }
    }

    fn expression(&mut self, expression: &BoundExpression) {
        match expression {
            BoundExpression::Assignment(n) => {
                self.record(n.name, SymbolRef::Variable(n.variable));
                self.expression(&n.value);
            }
            BoundExpression::Binary(n) => {
                self.expression(&n.left);
                self.expression(&n.right);
            }
            BoundExpression::FunctionCall(n) => {
                self.record(n.name, SymbolRef::Function(n.function));
                for argument in &n.arguments {
                    self.expression(argument);
                }
            }
            BoundExpression::Logical(n) => {
                self.expression(&n.left);
                self.expression(&n.right);
            }
            BoundExpression::Unary(n) => self.expression(&n.operand),
            BoundExpression::Variable(n) => self.record(n.syntax, SymbolRef::Variable(n.variable)),
            BoundExpression::BooleanLiteral(_)
            | BoundExpression::Error(_)
            | BoundExpression::IntegerLiteral(_)
            | BoundExpression::StringLiteral(_) => {}
        }
    }
}
