//! Scope frames and the values they bind.

use crate::trace::FixedState;
use crate::types::{StructType, TypeDefinition};
use hashbrown::HashMap;
use pgsl_mem::Symbol;
use pgsl_syntax::NodeId;
use pgsl_syntax::ast::DeclarationKind;

/// The construct that opened a scope.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeOwner {
    /// Module scope of a document
    Document(NodeId),
    /// Function body, carrying the declared return type
    Function {
        /// The function declaration
        node: NodeId,
        /// Declared return type
        return_type: TypeDefinition,
    },
    /// Body of a `while`, `do`-`while` or `for` loop
    Loop(NodeId),
    /// Plain block
    Block(NodeId),
}

impl ScopeOwner {
    /// Tag used for ancestor lookups.
    #[must_use]
    pub fn tag(&self) -> ScopeTag {
        match self {
            ScopeOwner::Document(_) => ScopeTag::Document,
            ScopeOwner::Function { .. } => ScopeTag::Function,
            ScopeOwner::Loop(_) => ScopeTag::Loop,
            ScopeOwner::Block(_) => ScopeTag::Block,
        }
    }

    /// Node that owns the scope.
    #[must_use]
    pub fn node(&self) -> NodeId {
        match self {
            ScopeOwner::Document(node)
            | ScopeOwner::Function { node, .. }
            | ScopeOwner::Loop(node)
            | ScopeOwner::Block(node) => *node,
        }
    }
}

/// Kind of a scope owner, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeTag {
    /// See [`ScopeOwner::Document`]
    Document,
    /// See [`ScopeOwner::Function`]
    Function,
    /// See [`ScopeOwner::Loop`]
    Loop,
    /// See [`ScopeOwner::Block`]
    Block,
}

/// A variable or parameter binding.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
    /// Declaring node
    pub declaration: NodeId,
    /// Declaration kind, `None` for parameters
    pub kind: Option<DeclarationKind>,
    /// Declared or inferred type
    pub ty: TypeDefinition,
}

impl VariableBinding {
    /// Constant for `const` bindings, Variable otherwise.
    #[must_use]
    pub fn fixed_state(&self) -> FixedState {
        match self.kind {
            Some(kind) if kind.is_constant() => FixedState::Constant,
            _ => FixedState::Variable,
        }
    }

    /// Whether naming the binding yields a memory location. Parameters are
    /// plain values.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        self.kind.is_some()
    }
}

/// Signature of a declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    /// Declaring node
    pub declaration: NodeId,
    /// Whether calls with constant arguments are constant expressions
    pub constant: bool,
    /// Parameter types in order
    pub parameters: Vec<TypeDefinition>,
    /// Declared return type
    pub return_type: TypeDefinition,
}

/// Anything a name can resolve to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopedValue {
    /// A variable or parameter
    Variable(VariableBinding),
    /// A function
    Function(FunctionSignature),
    /// A struct type
    Struct(StructType),
}

impl ScopedValue {
    /// Short description used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            ScopedValue::Variable(_) => "variable",
            ScopedValue::Function(_) => "function",
            ScopedValue::Struct(_) => "struct",
        }
    }
}

/// One frame of the scope stack.
#[derive(Debug, Clone)]
pub struct Scope {
    owner: ScopeOwner,
    values: HashMap<Symbol, ScopedValue>,
}

impl Scope {
    pub(crate) fn new(owner: ScopeOwner) -> Self {
        Self {
            owner,
            values: HashMap::new(),
        }
    }

    /// The construct that opened this scope.
    #[must_use]
    pub fn owner(&self) -> &ScopeOwner {
        &self.owner
    }

    /// Value bound to `name` in this frame only.
    #[must_use]
    pub fn get(&self, name: Symbol) -> Option<&ScopedValue> {
        self.values.get(&name)
    }

    /// Binds `name`, refusing to replace an existing binding of this frame.
    pub(crate) fn insert(&mut self, name: Symbol, value: ScopedValue) -> bool {
        if self.values.contains_key(&name) {
            return false;
        }
        self.values.insert(name, value);
        true
    }

    /// Number of names bound in this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the frame binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
