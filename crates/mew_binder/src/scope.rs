//! Scope management for the binder.
//!
//! Variables live in a chain of scopes kept in an arena and linked by index.
//! Functions and types live in single tables shared by the whole program.

use crate::symbols::{FunctionId, SymbolArena, TypeId, TypeKind, VariableId};
use indexmap::IndexMap;
use mew_core::Name;
use rustc_hash::FxHashMap;

// ============================================================================
// Variable scopes
// ============================================================================

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A scope's variables, in declaration order, and its parent.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub variables: IndexMap<Name, VariableId>,
}

/// Every scope created by one binder context. Scopes are never freed;
/// leaving a scope only moves the cursor back to its parent.
#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl ScopeArena {
    /// An arena holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            current: ScopeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> &Scope {
        &self.scopes[0]
    }

    #[inline]
    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn push(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(self.current),
            variables: IndexMap::new(),
        });
        self.current = id;
        id
    }

    pub fn pop(&mut self) {
        if let Some(parent) = self.scopes[self.current.index()].parent {
            self.current = parent;
        }
    }

    /// Declare a variable in the current scope. Fails if the name is already
    /// declared in that same scope; outer declarations may be shadowed.
    pub fn try_declare(&mut self, name: Name, variable: VariableId) -> bool {
        let scope = &mut self.scopes[self.current.index()];
        if scope.variables.contains_key(&name) {
            return false;
        }
        scope.variables.insert(name, variable);
        true
    }

    /// Find the nearest declaration of `name`.
    pub fn lookup(&self, name: Name) -> Option<VariableId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let current = &self.scopes[id.index()];
            if let Some(&variable) = current.variables.get(&name) {
                return Some(variable);
            }
            scope = current.parent;
        }
        None
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Types
// ============================================================================

/// Maps type names to type symbols.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    declared: FxHashMap<Name, TypeId>,
    undeclared: FxHashMap<Name, TypeId>,
}

impl TypeTable {
    /// A table holding the primitive types of `symbols`.
    pub fn with_primitives(symbols: &SymbolArena) -> Self {
        let declared = symbols
            .primitive_types()
            .map(|id| (symbols.ty(id).name, id))
            .collect();
        Self {
            declared,
            undeclared: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: Name) -> Option<TypeId> {
        self.declared.get(&name).copied()
    }

    /// The placeholder for an unknown type name. Every reference to the same
    /// unknown name shares one placeholder.
    pub fn undeclared(&mut self, symbols: &mut SymbolArena, name: &str) -> TypeId {
        let key = symbols.names().intern(name);
        *self
            .undeclared
            .entry(key)
            .or_insert_with(|| symbols.add_type(name, TypeKind::Undeclared))
    }

    pub fn undeclared_count(&self) -> usize {
        self.undeclared.len()
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Maps each function name to its overloads, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: IndexMap<Name, Vec<FunctionId>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_function(&self, name: Name) -> bool {
        self.functions.get(&name).is_some_and(|overloads| !overloads.is_empty())
    }

    pub fn overloads(&self, name: Name) -> &[FunctionId] {
        self.functions.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every function, grouped by name in first-declaration order.
    pub fn iter(&self) -> impl Iterator<Item = FunctionId> + '_ {
        self.functions.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an overload with exactly this signature exists.
    pub fn contains_signature(
        &self,
        symbols: &SymbolArena,
        name: Name,
        return_type: TypeId,
        parameter_types: &[TypeId],
    ) -> bool {
        self.overloads(name).iter().any(|&id| {
            let function = symbols.function(id);
            function.return_type == return_type
                && function.parameters.len() == parameter_types.len()
                && function
                    .parameters
                    .iter()
                    .zip(parameter_types)
                    .all(|(&p, &ty)| symbols.variable(p).ty == ty)
        })
    }

    pub fn insert(&mut self, name: Name, function: FunctionId) {
        self.functions.entry(name).or_default().push(function);
    }

    /// The overload whose parameter types equal `argument_types`.
    pub fn find_exact(&self, symbols: &SymbolArena, name: Name, argument_types: &[TypeId]) -> Option<FunctionId> {
        self.overloads(name).iter().copied().find(|&id| {
            let function = symbols.function(id);
            function.parameters.len() == argument_types.len()
                && function
                    .parameters
                    .iter()
                    .zip(argument_types)
                    .all(|(&p, &ty)| symbols.variable(p).ty == ty)
        })
    }

    /// The first-declared overload taking `arity` parameters.
    pub fn find_with_arity(&self, symbols: &SymbolArena, name: Name, arity: usize) -> Option<FunctionId> {
        self.overloads(name)
            .iter()
            .copied()
            .find(|&id| symbols.function(id).arity() == arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mew_core::NameInterner;

    #[test]
    fn test_shadowing_and_redeclaration() {
        let names = NameInterner::new();
        let foo = names.intern("foo");
        let mut scopes = ScopeArena::new();

        assert!(scopes.try_declare(foo, VariableId(0)));
        assert!(!scopes.try_declare(foo, VariableId(1)));

        scopes.push();
        assert_eq!(scopes.lookup(foo), Some(VariableId(0)));
        assert!(scopes.try_declare(foo, VariableId(2)));
        assert_eq!(scopes.lookup(foo), Some(VariableId(2)));

        scopes.pop();
        assert_eq!(scopes.lookup(foo), Some(VariableId(0)));
    }

    #[test]
    fn test_pop_at_root_stays_at_root() {
        let mut scopes = ScopeArena::new();
        let root = scopes.current();
        scopes.pop();
        assert_eq!(scopes.current(), root);
    }

    #[test]
    fn test_root_scope_keeps_declaration_order() {
        let names = NameInterner::new();
        let mut scopes = ScopeArena::new();
        scopes.try_declare(names.intern("b"), VariableId(0));
        scopes.try_declare(names.intern("a"), VariableId(1));
        let order: Vec<VariableId> = scopes.root().variables.values().copied().collect();
        assert_eq!(order, vec![VariableId(0), VariableId(1)]);
    }

    #[test]
    fn test_undeclared_types_are_shared_by_name() {
        let mut symbols = SymbolArena::default();
        let mut types = TypeTable::with_primitives(&symbols);

        let first = types.undeclared(&mut symbols, "corgi");
        let second = types.undeclared(&mut symbols, "corgi");
        let other = types.undeclared(&mut symbols, "waldo");

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(types.undeclared_count(), 2);
        assert!(symbols.is_error_type(first));
        assert!(types.get(symbols.names().intern("corgi")).is_none());
    }

    #[test]
    fn test_primitive_lookup() {
        let symbols = SymbolArena::default();
        let types = TypeTable::with_primitives(&symbols);
        assert_eq!(types.get(symbols.names().intern("int")), Some(TypeId::INT));
        assert_eq!(types.get(symbols.names().intern("#error")), None);
    }
}
