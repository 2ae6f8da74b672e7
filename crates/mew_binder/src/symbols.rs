//! Symbol and symbol arena definitions.
//!
//! Symbols are stored in a [`SymbolArena`] and referred to by small typed
//! ids, so bound nodes and symbol tables can point at them without owning
//! them. Every symbol keeps both its interned [`Name`] (used as a table key)
//! and its text (used in diagnostics and printing).

use crate::bound::SyntaxRef;
use mew_core::{Name, NameInterner};
use std::fmt;

// ============================================================================
// Ids
// ============================================================================

/// Identifies a type symbol in its arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const BOOL: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const STRING: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    /// The type of anything that failed to bind.
    pub const ERROR: TypeId = TypeId(4);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies a function or external function symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FunctionId(pub u32);

impl FunctionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifies a variable or parameter symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VariableId(pub u32);

impl VariableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A reference to any symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SymbolRef {
    Variable(VariableId),
    Function(FunctionId),
    Type(TypeId),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    ExternalFunction,
    Type,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Function => "function",
            SymbolKind::ExternalFunction => "external function",
            SymbolKind::Type => "type",
        };
        f.write_str(text)
    }
}

// ============================================================================
// Symbols
// ============================================================================

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Primitive,
    /// The synthetic type of failed bindings.
    Error,
    /// A type name that was referenced but never declared.
    Undeclared,
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: Name,
    pub name_text: String,
    pub kind: TypeKind,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VariableKind {
    Local,
    Parameter,
}

#[derive(Debug, Clone)]
pub struct VariableSymbol {
    pub name: Name,
    pub name_text: String,
    pub ty: TypeId,
    pub kind: VariableKind,
    /// The `let` statement or parameter that declared the variable.
    pub declaration: SyntaxRef,
    /// The name identifier in the declaration.
    pub name_syntax: SyntaxRef,
    /// The type annotation of a parameter.
    pub type_syntax: Option<SyntaxRef>,
    /// False when the name came out of parser recovery. Such a variable
    /// keeps its place in a parameter list but is never entered in a scope.
    pub is_named: bool,
}

#[derive(Debug, Clone)]
pub struct FunctionSymbol {
    pub name: Name,
    pub name_text: String,
    pub parameters: Vec<VariableId>,
    pub return_type: TypeId,
    pub declaration: SyntaxRef,
    pub name_syntax: SyntaxRef,
    pub return_type_syntax: Option<SyntaxRef>,
    /// The native library an external function links against. `None` for
    /// functions with a body.
    pub library: Option<String>,
}

impl FunctionSymbol {
    #[inline]
    pub fn is_external(&self) -> bool {
        self.library.is_some()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Owns every symbol created while binding one compilation.
#[derive(Debug, Clone)]
pub struct SymbolArena {
    names: NameInterner,
    types: Vec<TypeSymbol>,
    functions: Vec<FunctionSymbol>,
    variables: Vec<VariableSymbol>,
}

impl SymbolArena {
    /// Create an arena holding the primitive types and the error type, in
    /// the order of the [`TypeId`] constants.
    pub fn new(names: NameInterner) -> Self {
        let mut arena = Self {
            names,
            types: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
        };
        arena.add_type("bool", TypeKind::Primitive);
        arena.add_type("int", TypeKind::Primitive);
        arena.add_type("string", TypeKind::Primitive);
        arena.add_type("void", TypeKind::Primitive);
        arena.add_type("#error", TypeKind::Error);
        arena
    }

    #[inline]
    pub fn names(&self) -> &NameInterner {
        &self.names
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    pub fn ty(&self, id: TypeId) -> &TypeSymbol {
        &self.types[id.index()]
    }

    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionSymbol {
        &self.functions[id.index()]
    }

    #[inline]
    pub fn variable(&self, id: VariableId) -> &VariableSymbol {
        &self.variables[id.index()]
    }

    #[inline]
    pub fn type_name(&self, id: TypeId) -> &str {
        &self.ty(id).name_text
    }

    /// Whether values of this type come from a failed binding: the error
    /// type itself or an undeclared type name.
    #[inline]
    pub fn is_error_type(&self, id: TypeId) -> bool {
        self.ty(id).kind != TypeKind::Primitive
    }

    /// The primitive types, in id order.
    pub fn primitive_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TypeKind::Primitive)
            .map(|(i, _)| TypeId(i as u32))
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &FunctionSymbol)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId(i as u32), f))
    }

    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &VariableSymbol)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (VariableId(i as u32), v))
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn name_of(&self, symbol: SymbolRef) -> &str {
        match symbol {
            SymbolRef::Variable(id) => &self.variable(id).name_text,
            SymbolRef::Function(id) => &self.function(id).name_text,
            SymbolRef::Type(id) => &self.ty(id).name_text,
        }
    }

    pub fn kind_of(&self, symbol: SymbolRef) -> SymbolKind {
        match symbol {
            SymbolRef::Variable(id) => match self.variable(id).kind {
                VariableKind::Local => SymbolKind::Variable,
                VariableKind::Parameter => SymbolKind::Parameter,
            },
            SymbolRef::Function(id) => {
                if self.function(id).is_external() {
                    SymbolKind::ExternalFunction
                } else {
                    SymbolKind::Function
                }
            }
            SymbolRef::Type(_) => SymbolKind::Type,
        }
    }

    /// `name(a: int, b: string) -> int`
    pub fn function_signature(&self, id: FunctionId) -> String {
        let function = self.function(id);
        let parameters: Vec<String> = function
            .parameters
            .iter()
            .map(|&p| {
                let parameter = self.variable(p);
                format!("{}: {}", parameter.name_text, self.type_name(parameter.ty))
            })
            .collect();
        format!(
            "{}({}) -> {}",
            function.name_text,
            parameters.join(", "),
            self.type_name(function.return_type)
        )
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    pub(crate) fn add_type(&mut self, name: &str, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeSymbol {
            name: self.names.intern(name),
            name_text: name.to_string(),
            kind,
        });
        id
    }

    pub(crate) fn add_function(&mut self, symbol: FunctionSymbol) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(symbol);
        id
    }

    pub(crate) fn add_variable(&mut self, symbol: VariableSymbol) -> VariableId {
        let id = VariableId(self.variables.len() as u32);
        self.variables.push(symbol);
        id
    }
}

impl Default for SymbolArena {
    fn default() -> Self {
        Self::new(NameInterner::new())
    }
}
