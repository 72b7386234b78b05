//! Validation trace: the state threaded through one validation pass.
//!
//! A [`ValidationTrace`] holds
//!
//! - the scope stack, entered and left in strict stack order through
//!   [`ValidationTrace::new_scope`],
//! - one [`Attachment`] per validated node, keyed by node identity and
//!   written exactly once,
//! - the struct registry consulted by type capability checks,
//! - every diagnostic pushed during the pass, in order.
//!
//! # Example
//!
//! ```
//! use pgsl_mem::StringInterner;
//! use pgsl_syntax::NodeId;
//! use pgsl_typecheck::trace::{ScopeOwner, ScopeTag, ScopedValue, ValidationTrace, VariableBinding};
//! use pgsl_typecheck::types::TypeDefinition;
//!
//! let mut interner = StringInterner::new();
//! let name = interner.intern("albedo");
//! let mut trace = ValidationTrace::default();
//!
//! trace.new_scope(ScopeOwner::Document(NodeId::from_raw(0)), |trace| {
//!     let binding = VariableBinding {
//!         declaration: NodeId::from_raw(1),
//!         kind: None,
//!         ty: TypeDefinition::FLOAT,
//!     };
//!     assert!(trace.declare(name, ScopedValue::Variable(binding)));
//!
//!     trace.new_scope(ScopeOwner::Loop(NodeId::from_raw(2)), |trace| {
//!         assert!(trace.has_scope(ScopeTag::Loop));
//!         assert!(trace.scoped_value(name).is_some());
//!     });
//!     assert!(!trace.has_scope(ScopeTag::Loop));
//! });
//! assert!(trace.scoped_value(name).is_none());
//! ```

pub mod attachment;
pub mod scope;

pub use attachment::{Attachment, ExpressionAttachment, FixedState};
pub use scope::{FunctionSignature, Scope, ScopeOwner, ScopeTag, ScopedValue, VariableBinding};

use crate::error::{ErrorKind, ValidationError};
use crate::types::{StructType, TypeDefinition};
use fxhash::FxHashMap;
use pgsl_log::{debug, trace};
use pgsl_mem::Symbol;
use pgsl_syntax::{NodeId, Span};

/// Validation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceOptions {
    /// Permit `Float16` types
    pub enable_f16: bool,
    /// Check argument count and types of calls against the callee signature
    pub check_call_arguments: bool,
}

/// A named struct member.
#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    /// Property name
    pub name: Symbol,
    /// Property type
    pub ty: TypeDefinition,
}

/// A declared struct with its members in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    /// The nominal type
    pub ty: StructType,
    /// Members in declaration order
    pub members: Vec<StructMember>,
}

impl StructDefinition {
    /// Member named `name`.
    #[must_use]
    pub fn member(&self, name: Symbol) -> Option<&StructMember> {
        self.members.iter().find(|member| member.name == name)
    }
}

/// Scopes, attachments and diagnostics of one validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationTrace {
    options: TraceOptions,
    scopes: Vec<Scope>,
    attachments: FxHashMap<NodeId, Attachment>,
    structs: FxHashMap<NodeId, StructDefinition>,
    errors: Vec<ValidationError>,
}

impl ValidationTrace {
    /// Creates an empty trace.
    #[must_use]
    pub fn new(options: TraceOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options this trace validates with.
    #[must_use]
    pub fn options(&self) -> TraceOptions {
        self.options
    }

    /// Number of open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Runs `body` inside a new scope owned by `owner`.
    pub fn new_scope<R>(&mut self, owner: ScopeOwner, body: impl FnOnce(&mut Self) -> R) -> R {
        debug!("enter {:?} scope of node {} at depth {}", owner.tag(), owner.node(), self.depth());
        self.scopes.push(Scope::new(owner));
        let result = body(self);
        let scope = self.scopes.pop();
        debug_assert!(scope.is_some());
        debug!("leave scope at depth {}", self.depth());
        result
    }

    /// Resolves `name`, innermost scope first.
    #[must_use]
    pub fn scoped_value(&self, name: Symbol) -> Option<&ScopedValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Binds `name` in the innermost scope. Returns `false`, leaving the
    /// scope unchanged, when the innermost scope already binds `name`.
    ///
    /// # Panics
    ///
    /// Panics when no scope is open.
    pub fn declare(&mut self, name: Symbol, value: ScopedValue) -> bool {
        let scope = self
            .scopes
            .last_mut()
            .unwrap_or_else(|| panic!("declaration of {name} outside of any scope"));
        scope.insert(name, value)
    }

    /// Innermost open scope.
    #[must_use]
    pub fn current_scope(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// Whether any open scope is owned by a `tag` construct.
    #[must_use]
    pub fn has_scope(&self, tag: ScopeTag) -> bool {
        self.scope_of(tag).is_some()
    }

    /// Innermost open scope owned by a `tag` construct.
    #[must_use]
    pub fn scope_of(&self, tag: ScopeTag) -> Option<&Scope> {
        self.scopes.iter().rev().find(|scope| scope.owner().tag() == tag)
    }

    /// Records the validation result of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` already has an attachment, i.e. it was validated twice.
    pub fn attach(&mut self, node: NodeId, attachment: Attachment) {
        trace!("attach node {node}: {attachment:?}");
        let previous = self.attachments.insert(node, attachment);
        assert!(previous.is_none(), "node {node} was validated twice");
    }

    /// Validation result of `node`, if it was validated.
    #[must_use]
    pub fn try_attachment(&self, node: NodeId) -> Option<&Attachment> {
        self.attachments.get(&node)
    }

    /// Validation result of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` has not been validated.
    #[must_use]
    pub fn attachment(&self, node: NodeId) -> &Attachment {
        self.attachments
            .get(&node)
            .unwrap_or_else(|| panic!("node {node} read before it was validated"))
    }

    /// Expression attachment of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` has not been validated or is not an expression.
    #[must_use]
    pub fn expression(&self, node: NodeId) -> &ExpressionAttachment {
        match self.attachment(node) {
            Attachment::Expression(expression) => expression,
            other => panic!("node {node} is not an expression: {other:?}"),
        }
    }

    /// Type `node` resolved to.
    ///
    /// # Panics
    ///
    /// Panics if `node` has not been validated.
    #[must_use]
    pub fn type_of(&self, node: NodeId) -> &TypeDefinition {
        self.attachment(node).resolved_type()
    }

    /// Adds a struct to the registry, keyed by its declaration node.
    pub fn register_struct(&mut self, definition: StructDefinition) {
        self.structs.insert(definition.ty.declaration, definition);
    }

    /// Struct declared by `declaration`.
    #[must_use]
    pub fn struct_definition(&self, declaration: NodeId) -> Option<&StructDefinition> {
        self.structs.get(&declaration)
    }

    /// Appends a diagnostic. Validation continues.
    pub fn push_error(&mut self, kind: ErrorKind, span: Span, node: NodeId) {
        debug!("validation error at {span} (node {node}): {kind}");
        self.errors.push(ValidationError::new(kind, span, node));
    }

    /// Diagnostics in the order they were pushed.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether any diagnostic was pushed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Takes the diagnostics out of the trace.
    pub fn take_errors(&mut self) -> Vec<ValidationError> {
        std::mem::take(&mut self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgsl_mem::StringInterner;

    fn binding(raw: u32, ty: TypeDefinition) -> ScopedValue {
        ScopedValue::Variable(VariableBinding {
            declaration: NodeId::from_raw(raw),
            kind: None,
            ty,
        })
    }

    #[test]
    fn test_lookup_innermost_first() {
        let mut interner = StringInterner::new();
        let name = interner.intern("value");
        let mut trace = ValidationTrace::default();

        trace.new_scope(ScopeOwner::Document(NodeId::from_raw(0)), |trace| {
            assert!(trace.declare(name, binding(1, TypeDefinition::FLOAT)));
            trace.new_scope(ScopeOwner::Block(NodeId::from_raw(2)), |trace| {
                assert!(trace.declare(name, binding(3, TypeDefinition::INTEGER)));
                match trace.scoped_value(name) {
                    Some(ScopedValue::Variable(b)) => assert_eq!(b.ty, TypeDefinition::INTEGER),
                    other => panic!("unexpected {other:?}"),
                }
            });
            match trace.scoped_value(name) {
                Some(ScopedValue::Variable(b)) => assert_eq!(b.ty, TypeDefinition::FLOAT),
                other => panic!("unexpected {other:?}"),
            }
        });
        assert_eq!(trace.depth(), 0);
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        let mut interner = StringInterner::new();
        let name = interner.intern("value");
        let mut trace = ValidationTrace::default();

        trace.new_scope(ScopeOwner::Block(NodeId::from_raw(0)), |trace| {
            assert!(trace.declare(name, binding(1, TypeDefinition::FLOAT)));
            assert!(!trace.declare(name, binding(2, TypeDefinition::INTEGER)));
            assert_eq!(trace.current_scope().map(Scope::len), Some(1));
        });
    }

    #[test]
    fn test_scope_of_finds_function() {
        let mut trace = ValidationTrace::default();
        let function = ScopeOwner::Function {
            node: NodeId::from_raw(4),
            return_type: TypeDefinition::FLOAT,
        };

        trace.new_scope(function, |trace| {
            trace.new_scope(ScopeOwner::Loop(NodeId::from_raw(5)), |trace| {
                let scope = trace.scope_of(ScopeTag::Function).unwrap();
                assert_eq!(scope.owner().node(), NodeId::from_raw(4));
                assert!(trace.has_scope(ScopeTag::Loop));
                assert!(!trace.has_scope(ScopeTag::Document));
            });
        });
    }

    #[test]
    fn test_attachment_roundtrip() {
        let mut trace = ValidationTrace::default();
        let node = NodeId::from_raw(7);
        assert!(trace.try_attachment(node).is_none());

        trace.attach(node, Attachment::Expression(ExpressionAttachment::constant(TypeDefinition::BOOLEAN)));
        assert_eq!(trace.expression(node).fixed_state, FixedState::Constant);
        assert_eq!(trace.type_of(node), &TypeDefinition::BOOLEAN);
    }

    #[test]
    #[should_panic(expected = "read before it was validated")]
    fn test_unvalidated_read_panics() {
        let trace = ValidationTrace::default();
        let _ = trace.attachment(NodeId::from_raw(1));
    }

    #[test]
    #[should_panic(expected = "validated twice")]
    fn test_double_attach_panics() {
        let mut trace = ValidationTrace::default();
        let node = NodeId::from_raw(1);
        trace.attach(node, Attachment::Type(TypeDefinition::Void));
        trace.attach(node, Attachment::Type(TypeDefinition::Void));
    }

    #[test]
    fn test_errors_keep_order() {
        let mut trace = ValidationTrace::default();
        trace.push_error(ErrorKind::BreakOutsideLoop, Span::point(1, 1), NodeId::from_raw(0));
        trace.push_error(ErrorKind::ContinueOutsideLoop, Span::point(2, 1), NodeId::from_raw(1));

        assert!(trace.has_errors());
        assert_eq!(trace.errors()[0].kind, ErrorKind::BreakOutsideLoop);
        assert_eq!(trace.errors()[1].kind, ErrorKind::ContinueOutsideLoop);
        assert_eq!(trace.take_errors().len(), 2);
        assert!(!trace.has_errors());
    }
}
