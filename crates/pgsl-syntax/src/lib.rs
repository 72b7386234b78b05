//! PGSL Syntax: syntax tree, spans and diagnostics
//!
//! This crate holds the data the upstream grammar matcher produces:
//!
//! - [`span`] - line/column position ranges
//! - [`ast`] - the closed set of node kinds (declarations, expressions,
//!   statements)
//! - [`tree`] - the arena that owns every node and records parent links
//! - [`diagnostic`] - rendering of positioned messages
//! - [`error`] - errors reported while building a tree
//! - [`builder`] - one-call-per-node tree construction
//!
//! # Building a tree
//!
//! Nodes are added bottom-up. Adding a node appends every child it references,
//! which sets the child's parent exactly once.
//!
//! ```
//! use pgsl_syntax::ast::{ExprKind, LiteralValue, NodeKind, StmtKind};
//! use pgsl_syntax::{Span, SyntaxTree};
//!
//! let mut tree = SyntaxTree::new();
//! let span = Span::new(1, 1, 1, 10);
//! let cond = tree.add(NodeKind::Expression(ExprKind::Literal(LiteralValue::Boolean(true))), span).unwrap();
//! let block = tree.add(NodeKind::Statement(StmtKind::Block { statements: vec![] }), span).unwrap();
//! let node = tree
//!     .add(NodeKind::Statement(StmtKind::While { condition: cond, block }), span)
//!     .unwrap();
//!
//! assert_eq!(tree.parent(cond), Some(node));
//! assert_eq!(tree.children(node), &[cond, block]);
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod span;
pub mod tree;

pub use ast::NodeKind;
pub use builder::TreeBuilder;
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticLevel, Emitter};
pub use error::{TreeError, TreeResult};
pub use span::{LineCol, Span, Spanned};
pub use tree::{Node, NodeId, SyntaxTree};
