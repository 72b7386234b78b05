//! Node kinds of the PGSL syntax tree.
//!
//! The kind set is closed and fixed by the grammar, so every node is one
//! variant of [`NodeKind`]. Child nodes are referenced by [`NodeId`]; the
//! order in which [`NodeKind::children`] lists them is the order of the
//! node's child list in the tree.
//!
//! # Modules
//!
//! - [`decl`] - document, functions, variables, structs and type annotations
//! - [`expr`] - expressions, literals and operators
//! - [`stmt`] - statements

pub mod decl;
pub mod expr;
pub mod stmt;

pub use decl::{DeclKind, DeclarationKind};
pub use expr::{BinaryOperator, ExprKind, LiteralValue, UnaryOperator};
pub use stmt::StmtKind;

use crate::tree::NodeId;

/// Kind and construction data of one syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Declarations, including the document root
    Declaration(DeclKind),
    /// Value producing expressions
    Expression(ExprKind),
    /// Statements inside function bodies
    Statement(StmtKind),
}

impl NodeKind {
    /// Child nodes referenced by this kind, in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Declaration(decl) => decl.children(),
            NodeKind::Expression(expr) => expr.children(),
            NodeKind::Statement(stmt) => stmt.children(),
        }
    }

    /// Short lowercase name used in logs and diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Declaration(decl) => decl.name(),
            NodeKind::Expression(expr) => expr.name(),
            NodeKind::Statement(stmt) => stmt.name(),
        }
    }

    /// Whether this is the document root.
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self, NodeKind::Declaration(DeclKind::Document { .. }))
    }
}

impl From<DeclKind> for NodeKind {
    fn from(kind: DeclKind) -> Self {
        NodeKind::Declaration(kind)
    }
}

impl From<ExprKind> for NodeKind {
    fn from(kind: ExprKind) -> Self {
        NodeKind::Expression(kind)
    }
}

impl From<StmtKind> for NodeKind {
    fn from(kind: StmtKind) -> Self {
        NodeKind::Statement(kind)
    }
}
