//! Errors reported while building a syntax tree.
//!
//! The upstream grammar matcher builds trees through
//! [`SyntaxTree::add`](crate::SyntaxTree::add). Misuse it can recover from,
//! such as handing over a node that already belongs to another parent, is
//! reported as a [`TreeError`] instead of corrupting the tree.

use crate::tree::NodeId;
use std::fmt;

/// Errors raised by tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A referenced child id does not belong to this tree.
    UnknownNode {
        /// The foreign id
        node: NodeId,
    },

    /// A referenced child was already appended to a parent.
    ///
    /// ```text
    /// tree.add(If { condition: c, .. })
    /// tree.add(While { condition: c, .. })
    ///                             ^ c already belongs to the if statement
    /// ```
    AlreadyAttached {
        /// The child node
        child: NodeId,
        /// Its existing parent
        parent: NodeId,
    },

    /// A document root was referenced as a child.
    DocumentAsChild {
        /// The document node
        node: NodeId,
    },

    /// The same child was referenced twice by one node.
    DuplicateChild {
        /// The repeated child
        child: NodeId,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnknownNode { node } => {
                write!(f, "node {node} does not belong to this syntax tree")
            }
            TreeError::AlreadyAttached { child, parent } => {
                write!(f, "node {child} is already a child of node {parent}")
            }
            TreeError::DocumentAsChild { node } => {
                write!(f, "document node {node} cannot be appended as a child")
            }
            TreeError::DuplicateChild { child } => {
                write!(f, "node {child} is referenced more than once")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Result of a tree construction step.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
