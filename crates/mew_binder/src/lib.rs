//! mew_binder: Name and type binding, lowering and flattening.
//!
//! Binding runs in two passes over a set of syntax trees. The declaration
//! pass ([`bind_global_scope`]) declares every function signature in one
//! program-wide table; the body pass ([`Binder`]) then binds function bodies
//! and top-level statements into typed bound trees. The [`lowerer`] rewrites
//! structured control flow into labels and gotos, and the [`flattener`]
//! inlines nested blocks so each body is one addressable statement list.

mod binder;
pub mod bound;
pub mod flattener;
mod global_scope;
pub mod lowerer;
pub mod operators;
pub mod rewriter;
pub mod scope;
pub mod symbols;

pub use binder::Binder;
pub use bound::{BoundBlockStatement, BoundExpression, BoundLabel, BoundStatement, SyntaxRef, TreeId};
pub use flattener::{flatten, flatten_all, LabelError, LabelMap};
pub use global_scope::{bind_global_scope, function_declaration, BoundGlobalScope, DEFAULT_LIBRARY};
pub use lowerer::{lower, lower_all, Lowerer};
pub use rewriter::BoundTreeRewriter;
pub use symbols::{
    FunctionId, FunctionSymbol, SymbolArena, SymbolKind, SymbolRef, TypeId, TypeKind, TypeSymbol, VariableId,
    VariableKind, VariableSymbol,
};
