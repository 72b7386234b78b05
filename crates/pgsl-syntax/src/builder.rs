//! Convenience construction of syntax trees.
//!
//! [`TreeBuilder`] wraps [`SyntaxTree::add`] with one method per node kind,
//! interning names on the way. Every node gets a span on its own line, in
//! creation order, unless [`TreeBuilder::at`] sets one explicitly. Tests and
//! benchmarks use it in place of the grammar matcher.
//!
//! ```
//! use pgsl_syntax::ast::{BinaryOperator, DeclarationKind};
//! use pgsl_syntax::builder::TreeBuilder;
//!
//! let mut b = TreeBuilder::new();
//! let ty = b.ty("Integer", vec![]).unwrap();
//! let one = b.integer(1).unwrap();
//! let two = b.integer(2).unwrap();
//! let sum = b.binary(BinaryOperator::Add, one, two).unwrap();
//! let decl = b.declare(DeclarationKind::Private, "total", Some(ty), Some(sum)).unwrap();
//! let document = b.document(vec![decl]).unwrap();
//!
//! let tree = b.finish();
//! assert_eq!(tree.document_of(one), document);
//! ```

use crate::ast::{BinaryOperator, DeclKind, DeclarationKind, ExprKind, LiteralValue, NodeKind, StmtKind, UnaryOperator};
use crate::error::TreeResult;
use crate::span::Span;
use crate::tree::{NodeId, SyntaxTree};

/// Builds a [`SyntaxTree`] bottom-up.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: SyntaxTree,
    line: usize,
    span: Option<Span>,
    build_in: bool,
}

impl TreeBuilder {
    /// Creates a builder over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built tree.
    #[must_use]
    pub fn finish(self) -> SyntaxTree {
        self.tree
    }

    /// The tree built so far.
    #[must_use]
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Uses `span` for the next node only.
    pub fn at(&mut self, span: Span) -> &mut Self {
        self.span = Some(span);
        self
    }

    /// Runs `body` with every node it adds flagged as build-in.
    ///
    /// # Errors
    ///
    /// Returns the error of `body`.
    pub fn build_in(&mut self, body: impl FnOnce(&mut Self) -> TreeResult<NodeId>) -> TreeResult<NodeId> {
        let previous = std::mem::replace(&mut self.build_in, true);
        let result = body(self);
        self.build_in = previous;
        result
    }

    /// Adds a node of any kind.
    ///
    /// # Errors
    ///
    /// Fails when a child cannot be appended, see [`SyntaxTree::add`].
    pub fn node(&mut self, kind: impl Into<NodeKind>) -> TreeResult<NodeId> {
        let span = self.span.take().unwrap_or_else(|| {
            self.line += 1;
            Span::new(self.line, 1, self.line, 2)
        });
        if self.build_in {
            self.tree.add_build_in(kind, span)
        } else {
            self.tree.add(kind, span)
        }
    }

    // Expressions

    /// `true` / `false`
    pub fn boolean(&mut self, value: bool) -> TreeResult<NodeId> {
        self.node(ExprKind::Literal(LiteralValue::Boolean(value)))
    }

    /// Signed integer literal.
    pub fn integer(&mut self, value: i64) -> TreeResult<NodeId> {
        self.node(ExprKind::Literal(LiteralValue::Integer(value)))
    }

    /// Unsigned integer literal.
    pub fn unsigned(&mut self, value: u64) -> TreeResult<NodeId> {
        self.node(ExprKind::Literal(LiteralValue::UnsignedInteger(value)))
    }

    /// Float literal.
    pub fn float(&mut self, value: f64) -> TreeResult<NodeId> {
        self.node(ExprKind::Literal(LiteralValue::Float(value)))
    }

    /// Variable reference.
    pub fn variable(&mut self, name: &str) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(ExprKind::VariableName { name })
    }

    /// Function call expression.
    pub fn call(&mut self, name: &str, arguments: Vec<NodeId>) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(ExprKind::FunctionCall { name, arguments })
    }

    /// `(expression)`
    pub fn parenthesized(&mut self, expression: NodeId) -> TreeResult<NodeId> {
        self.node(ExprKind::Parenthesized { expression })
    }

    /// `left operator right`
    pub fn binary(&mut self, operator: BinaryOperator, left: NodeId, right: NodeId) -> TreeResult<NodeId> {
        self.node(ExprKind::Binary { operator, left, right })
    }

    /// `operator expression`
    pub fn unary(&mut self, operator: UnaryOperator, expression: NodeId) -> TreeResult<NodeId> {
        self.node(ExprKind::Unary { operator, expression })
    }

    /// `value.property`
    pub fn decompose(&mut self, value: NodeId, property: &str) -> TreeResult<NodeId> {
        let property = self.tree.intern(property);
        self.node(ExprKind::ValueDecomposition { value, property })
    }

    /// `value[index]`
    pub fn index(&mut self, value: NodeId, index: NodeId) -> TreeResult<NodeId> {
        self.node(ExprKind::IndexedValue { value, index })
    }

    /// `Type(expression)`
    pub fn convert(&mut self, type_declaration: NodeId, expression: NodeId) -> TreeResult<NodeId> {
        self.node(ExprKind::TypeConversion {
            type_declaration,
            expression,
        })
    }

    // Statements

    /// `{ statements }`
    pub fn block(&mut self, statements: Vec<NodeId>) -> TreeResult<NodeId> {
        self.node(StmtKind::Block { statements })
    }

    /// `if (condition) block else else_branch`
    pub fn if_statement(&mut self, condition: NodeId, block: NodeId, else_branch: Option<NodeId>) -> TreeResult<NodeId> {
        self.node(StmtKind::If {
            condition,
            block,
            else_branch,
        })
    }

    /// `while (condition) block`
    pub fn while_loop(&mut self, condition: NodeId, block: NodeId) -> TreeResult<NodeId> {
        self.node(StmtKind::While { condition, block })
    }

    /// `do block while (condition);`
    pub fn do_while(&mut self, condition: NodeId, block: NodeId) -> TreeResult<NodeId> {
        self.node(StmtKind::DoWhile { condition, block })
    }

    /// `for (init; condition; update) block`
    pub fn for_loop(
        &mut self,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
        block: NodeId,
    ) -> TreeResult<NodeId> {
        self.node(StmtKind::For {
            init,
            condition,
            update,
            block,
        })
    }

    /// `return expression;`
    pub fn return_statement(&mut self, expression: Option<NodeId>) -> TreeResult<NodeId> {
        self.node(StmtKind::Return { expression })
    }

    /// `break;`
    pub fn break_statement(&mut self) -> TreeResult<NodeId> {
        self.node(StmtKind::Break)
    }

    /// `continue;`
    pub fn continue_statement(&mut self) -> TreeResult<NodeId> {
        self.node(StmtKind::Continue)
    }

    /// `discard;`
    pub fn discard(&mut self) -> TreeResult<NodeId> {
        self.node(StmtKind::Discard)
    }

    /// `left operator right;`
    pub fn assign(&mut self, operator: &str, left: NodeId, right: NodeId) -> TreeResult<NodeId> {
        self.node(StmtKind::Assignment {
            operator: operator.to_string(),
            left,
            right,
        })
    }

    /// `expression++;` / `expression--;`
    pub fn increment(&mut self, operator: &str, expression: NodeId) -> TreeResult<NodeId> {
        self.node(StmtKind::IncrementDecrement {
            operator: operator.to_string(),
            expression,
        })
    }

    /// `call;`
    pub fn call_statement(&mut self, call: NodeId) -> TreeResult<NodeId> {
        self.node(StmtKind::FunctionCall { call })
    }

    // Declarations

    /// Type annotation with template arguments.
    pub fn ty(&mut self, name: &str, templates: Vec<NodeId>) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::Type { name, templates })
    }

    /// Variable declaration of any kind.
    pub fn declare(
        &mut self,
        declaration: DeclarationKind,
        name: &str,
        type_declaration: Option<NodeId>,
        expression: Option<NodeId>,
    ) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::Variable {
            declaration,
            name,
            type_declaration,
            expression,
        })
    }

    /// Function parameter.
    pub fn parameter(&mut self, name: &str, type_declaration: NodeId) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::Parameter { name, type_declaration })
    }

    /// Function declaration.
    pub fn function(
        &mut self,
        name: &str,
        constant: bool,
        parameters: Vec<NodeId>,
        return_type: NodeId,
        block: NodeId,
    ) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::Function {
            name,
            constant,
            parameters,
            return_type,
            block,
        })
    }

    /// Struct property.
    pub fn struct_property(&mut self, name: &str, type_declaration: NodeId) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::StructProperty { name, type_declaration })
    }

    /// Struct declaration.
    pub fn structure(&mut self, name: &str, properties: Vec<NodeId>) -> TreeResult<NodeId> {
        let name = self.tree.intern(name);
        self.node(DeclKind::Struct { name, properties })
    }

    /// Document root.
    pub fn document(&mut self, declarations: Vec<NodeId>) -> TreeResult<NodeId> {
        self.node(DeclKind::Document { declarations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;

    #[test]
    fn test_spans_follow_creation_order() {
        let mut b = TreeBuilder::new();
        let first = b.boolean(true).unwrap();
        let second = b.at(Span::new(9, 4, 9, 8)).boolean(false).unwrap();
        let third = b.boolean(true).unwrap();

        let tree = b.finish();
        assert_eq!(tree.span(first).start_line, 1);
        assert_eq!(tree.span(second), Span::new(9, 4, 9, 8));
        assert_eq!(tree.span(third).start_line, 2);
    }

    #[test]
    fn test_build_in_scope() {
        let mut b = TreeBuilder::new();
        let intrinsic = b
            .build_in(|b| {
                let ty = b.ty("Float", vec![])?;
                let block = b.block(vec![])?;
                b.function("sqrt", true, vec![], ty, block)
            })
            .unwrap();
        let user = b.integer(1).unwrap();

        let tree = b.finish();
        assert!(tree.is_build_in(intrinsic));
        assert!(tree.children(intrinsic).iter().all(|&child| tree.is_build_in(child)));
        assert!(!tree.is_build_in(user));
    }

    #[test]
    fn test_reused_child_is_rejected() {
        let mut b = TreeBuilder::new();
        let value = b.integer(1).unwrap();
        let first = b.parenthesized(value).unwrap();
        let err = b.parenthesized(value).unwrap_err();

        assert_eq!(err, TreeError::AlreadyAttached { child: value, parent: first });
    }
}
