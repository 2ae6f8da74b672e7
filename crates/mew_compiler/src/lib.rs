//! mew_compiler: Compilation orchestration for Mew.
//!
//! A [`Compilation`] owns a set of syntax trees. Its [`SemanticModel`] is
//! built on first request: declaration pass, body binding, lowering and
//! flattening, with the diagnostics of every stage merged in one collection.

mod compilation;
pub mod printer;
mod semantic_model;
mod symbol_cache;

pub use compilation::{Compilation, CompilationOptions};
pub use semantic_model::SemanticModel;
pub use symbol_cache::SymbolCache;
