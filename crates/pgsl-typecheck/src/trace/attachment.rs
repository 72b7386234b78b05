//! Per-node validation results.

use crate::trace::{FunctionSignature, VariableBinding};
use crate::types::TypeDefinition;

/// Whether an expression's value is known at shader creation time.
///
/// Ordered `Variable < Constant`; combining operands takes the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FixedState {
    /// Only known at runtime
    Variable,
    /// Known at shader creation time
    Constant,
}

impl FixedState {
    /// Meet of two states: Constant only if both are.
    #[must_use]
    pub fn meet(self, other: FixedState) -> FixedState {
        self.min(other)
    }

    /// Meet over any number of states; Constant for none.
    pub fn meet_all(states: impl IntoIterator<Item = FixedState>) -> FixedState {
        states.into_iter().fold(FixedState::Constant, FixedState::meet)
    }
}

/// What validation computed for an expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionAttachment {
    /// Constness of the value
    pub fixed_state: FixedState,
    /// Whether the expression names a memory location
    pub is_storage: bool,
    /// Type of the value
    pub resolve_type: TypeDefinition,
}

impl ExpressionAttachment {
    /// Creates an attachment.
    #[must_use]
    pub fn new(fixed_state: FixedState, is_storage: bool, resolve_type: TypeDefinition) -> Self {
        Self {
            fixed_state,
            is_storage,
            resolve_type,
        }
    }

    /// A constant non-storage value.
    #[must_use]
    pub fn constant(resolve_type: TypeDefinition) -> Self {
        Self::new(FixedState::Constant, false, resolve_type)
    }

    /// Recorded for expressions that failed to resolve, so parents can still
    /// read an attachment. A diagnostic has always been pushed beforehand.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FixedState::Variable, false, TypeDefinition::Unresolved)
    }
}

/// Validation result of any node kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Expressions
    Expression(ExpressionAttachment),
    /// Type declarations, struct declarations and struct properties
    Type(TypeDefinition),
    /// Variable declarations and parameters
    Variable(VariableBinding),
    /// Function declarations
    Function(FunctionSignature),
}

impl Attachment {
    /// The type the node resolved to.
    #[must_use]
    pub fn resolved_type(&self) -> &TypeDefinition {
        match self {
            Attachment::Expression(expression) => &expression.resolve_type,
            Attachment::Type(ty) => ty,
            Attachment::Variable(binding) => &binding.ty,
            Attachment::Function(signature) => &signature.return_type,
        }
    }
}
