//! Node validation.
//!
//! [`validate`] walks a subtree depth first. Each node kind has its own hook
//! in one of the submodules:
//!
//! - [`decl`] - document, functions, parameters, variables and structs
//! - [`ty`] - type declarations
//! - [`expr`] - expressions, through the operator rules in [`ops`]
//! - [`stmt`] - statements
//!
//! A hook validates its children, pushes a diagnostic for every problem it
//! finds and returns the node's attachment. Hooks never stop at the first
//! error; nodes that fail to resolve get a fallback attachment so their
//! parents can keep going.

pub mod decl;
pub mod expr;
pub mod ops;
pub mod stmt;
pub mod ty;

use crate::error::ErrorKind;
use crate::trace::{Attachment, ScopeOwner, ValidationTrace};
use crate::types::TypeDefinition;
use pgsl_log::trace;
use pgsl_syntax::{NodeId, NodeKind, SyntaxTree};

/// Validates `node` and its subtree, recording attachments and diagnostics
/// in `trace`. Returns `node`.
///
/// Validation normally starts at a document, which opens the module scope.
/// Starting anywhere else opens a module scope for the node's document first.
///
/// # Panics
///
/// Panics when validation starts at a node that is not attached to a
/// document, or when a node of the subtree was already validated.
pub fn validate(tree: &SyntaxTree, node: NodeId, trace: &mut ValidationTrace) -> NodeId {
    if trace.depth() == 0 && !tree.kind(node).is_document() {
        let document = tree.document_of(node);
        return trace.new_scope(ScopeOwner::Document(document), |trace| {
            validate(tree, node, trace)
        });
    }

    trace!("validate {} {node}", tree.kind(node).name());
    let attachment = match tree.kind(node) {
        NodeKind::Declaration(kind) => decl::validate_declaration(tree, node, kind, trace),
        NodeKind::Expression(kind) => {
            Some(Attachment::Expression(expr::validate_expression(tree, node, kind, trace)))
        }
        NodeKind::Statement(kind) => {
            stmt::validate_statement(tree, node, kind, trace);
            None
        }
    };

    if let Some(attachment) = attachment {
        trace.attach(node, attachment);
    }
    node
}

/// Validates every node of `nodes` in order.
pub(crate) fn validate_all(tree: &SyntaxTree, nodes: &[NodeId], trace: &mut ValidationTrace) {
    for &node in nodes {
        validate(tree, node, trace);
    }
}

/// Pushes `kind` at the position of `node`.
pub(crate) fn report(tree: &SyntaxTree, trace: &mut ValidationTrace, node: NodeId, kind: ErrorKind) {
    trace.push_error(kind, tree.span(node), node);
}

/// PGSL spelling of `ty` for diagnostics.
pub(crate) fn type_name(tree: &SyntaxTree, ty: &TypeDefinition) -> String {
    ty.display(tree.interner()).to_string()
}

/// Checks that a validated condition expression resolved to Boolean.
/// `Void` results are reported like any other type.
pub(crate) fn expect_boolean(tree: &SyntaxTree, trace: &mut ValidationTrace, condition: NodeId) {
    let found = trace.expression(condition).resolve_type.loaded().clone();
    if !found.is_boolean() && !found.is_unresolved() {
        let found = type_name(tree, &found);
        report(tree, trace, condition, ErrorKind::NonBooleanCondition { found });
    }
}
