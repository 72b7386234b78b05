//! Arena-owned syntax tree.
//!
//! Every node lives in one [`Arena`] owned by the [`SyntaxTree`]. A node's
//! children are exclusively its own: [`SyntaxTree::add`] refuses a child that
//! already has a parent, so the parent id stored in a node is written exactly
//! once. Because children must exist before the node referencing them, the
//! structure cannot contain cycles.
//!
//! Node ids are identities. Two structurally equal nodes at different
//! positions have different ids, which is what the validation trace keys its
//! attachments by.

use crate::ast::NodeKind;
use crate::error::{TreeError, TreeResult};
use crate::span::{Span, Spanned};
use pgsl_mem::{Arena, Idx, StringInterner, Symbol};

/// Identity of a node inside its [`SyntaxTree`].
pub type NodeId = Idx<Node>;

/// One syntax tree node.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    build_in: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Kind and construction data.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether the node represents a language intrinsic.
    ///
    /// Build-in nodes are validated like any other node but never emitted.
    #[must_use]
    pub fn is_build_in(&self) -> bool {
        self.build_in
    }

    /// Parent node, `None` for roots and nodes not appended yet.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Spanned for Node {
    fn span(&self) -> Span {
        self.span
    }
}

/// Owner of all nodes of one shader module and of its name table.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Arena<Node>,
    interner: StringInterner,
}

impl SyntaxTree {
    /// Creates an empty tree with a fresh interner.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interner(StringInterner::new())
    }

    /// Creates an empty tree using an existing interner.
    #[must_use]
    pub fn with_interner(interner: StringInterner) -> Self {
        Self {
            nodes: Arena::new(),
            interner,
        }
    }

    /// Interns a name for use in node kinds.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.interner.intern(name)
    }

    /// The tree's name table.
    #[must_use]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolves a name; symbols from another interner resolve to `""`.
    #[must_use]
    pub fn name(&self, sym: Symbol) -> &str {
        self.interner.resolve(sym).unwrap_or_default()
    }

    /// Adds a node and appends every child its kind references.
    ///
    /// # Errors
    ///
    /// Fails without modifying the tree if a child is unknown, already has a
    /// parent, is a document, or is referenced twice.
    pub fn add(&mut self, kind: impl Into<NodeKind>, span: Span) -> TreeResult<NodeId> {
        self.insert(kind.into(), span, false)
    }

    /// Adds a build-in (intrinsic) node. See [`SyntaxTree::add`].
    ///
    /// # Errors
    ///
    /// Same as [`SyntaxTree::add`].
    pub fn add_build_in(&mut self, kind: impl Into<NodeKind>, span: Span) -> TreeResult<NodeId> {
        self.insert(kind.into(), span, true)
    }

    fn insert(&mut self, kind: NodeKind, span: Span, build_in: bool) -> TreeResult<NodeId> {
        let children = kind.children();

        for (position, &child) in children.iter().enumerate() {
            let node = self
                .nodes
                .get(child)
                .ok_or(TreeError::UnknownNode { node: child })?;
            if let Some(parent) = node.parent {
                return Err(TreeError::AlreadyAttached { child, parent });
            }
            if node.kind.is_document() {
                return Err(TreeError::DocumentAsChild { node: child });
            }
            if children[..position].contains(&child) {
                return Err(TreeError::DuplicateChild { child });
            }
        }

        let id = self.nodes.alloc(Node {
            kind,
            span,
            build_in,
            parent: None,
            children: Vec::with_capacity(children.len()),
        });
        for child in children {
            self.append_child(id, child);
        }

        Ok(id)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child].parent.is_none());
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Returns a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns a node if `id` belongs to this tree.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    /// Span of a node.
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id].span
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Children of a node in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Whether a node is a build-in.
    #[must_use]
    pub fn is_build_in(&self, id: NodeId) -> bool {
        self.nodes[id].build_in
    }

    /// Iterates from the parent of `id` up to its root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Topmost ancestor of `id`, or `id` itself when it has no parent.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Document that `id` belongs to.
    ///
    /// # Panics
    ///
    /// Panics if the node's root is not a document. Asking for tree-wide
    /// context before the node was attached to a document is a caller bug.
    #[must_use]
    pub fn document_of(&self, id: NodeId) -> NodeId {
        let root = self.root_of(id);
        assert!(
            self.kind(root).is_document(),
            "{} {id} is not attached to a document",
            self.kind(id).name()
        );
        root
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }
}
