//! PGSL Type Checker: scope-aware semantic validation
//!
//! This crate validates a [`SyntaxTree`](pgsl_syntax::SyntaxTree) produced by
//! the upstream grammar matcher:
//!
//! - [`types`] - resolved types, cast relations, capability flags and layout
//! - [`trace`] - the scope stack, per-node attachments and diagnostic sink of
//!   one validation pass
//! - [`check`] - the validation hooks per node kind
//! - [`error`] - user diagnostics
//!
//! Validation never stops at the first problem. Every independent error of a
//! tree is pushed into the trace; a tree is only fit for transpilation when
//! the trace holds no errors afterwards.
//!
//! # Example
//!
//! ```
//! use pgsl_syntax::TreeBuilder;
//! use pgsl_typecheck::{ErrorKind, ValidationTrace, validate};
//!
//! let mut b = TreeBuilder::new();
//! let condition = b.integer(1).unwrap();
//! let body = b.block(vec![]).unwrap();
//! let looped = b.while_loop(condition, body).unwrap();
//! let block = b.block(vec![looped]).unwrap();
//! let void = b.ty("Void", vec![]).unwrap();
//! let main = b.function("main", false, vec![], void, block).unwrap();
//! let document = b.document(vec![main]).unwrap();
//! let tree = b.finish();
//!
//! let mut trace = ValidationTrace::default();
//! validate(&tree, document, &mut trace);
//!
//! assert_eq!(trace.errors().len(), 1);
//! assert!(matches!(trace.errors()[0].kind, ErrorKind::NonBooleanCondition { .. }));
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod error;
pub mod trace;
pub mod types;

pub use check::validate;
pub use error::{ErrorKind, ValidationError};
pub use trace::{
    Attachment, ExpressionAttachment, FixedState, ScopeOwner, ScopeTag, ScopedValue, TraceOptions, ValidationTrace,
};
pub use types::{MemoryLayout, ScalarType, TypeDefinition};
