//! Statement nodes in the PGSL syntax tree.
//!
//! Statements appear inside function bodies. Variable declarations are
//! allowed wherever a statement is; they are [`DeclKind`](super::DeclKind)
//! nodes placed directly in a block's statement list.

use crate::tree::NodeId;

/// A statement node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StmtKind {
    /// Block: `{ statements }`
    Block {
        /// Statements in order
        statements: Vec<NodeId>,
    },

    /// If statement: `if (cond) { } else ...`
    If {
        /// Condition
        condition: NodeId,
        /// Then block
        block: NodeId,
        /// Else block or chained if statement
        else_branch: Option<NodeId>,
    },

    /// While loop: `while (cond) { }`
    While {
        /// Condition
        condition: NodeId,
        /// Loop body
        block: NodeId,
    },

    /// Do-while loop: `do { } while (cond);`
    DoWhile {
        /// Condition
        condition: NodeId,
        /// Loop body
        block: NodeId,
    },

    /// For loop: `for (init; cond; update) { }`
    For {
        /// Optional variable declaration
        init: Option<NodeId>,
        /// Optional condition
        condition: Option<NodeId>,
        /// Optional update statement
        update: Option<NodeId>,
        /// Loop body
        block: NodeId,
    },

    /// Return statement: `return expr;` or `return;`
    Return {
        /// Optional returned value
        expression: Option<NodeId>,
    },

    /// `break;`
    Break,

    /// `continue;`
    Continue,

    /// `discard;`
    Discard,

    /// Assignment: `target op value;`
    Assignment {
        /// Raw operator token, checked during validation
        operator: String,
        /// Assignment target
        left: NodeId,
        /// Assigned value
        right: NodeId,
    },

    /// Increment or decrement: `i++;` / `i--;`
    IncrementDecrement {
        /// Raw operator token, checked during validation
        operator: String,
        /// Target expression
        expression: NodeId,
    },

    /// Function call used as a statement: `name(args);`
    FunctionCall {
        /// The call expression
        call: NodeId,
    },
}

impl StmtKind {
    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            StmtKind::Block { statements } => statements.clone(),
            StmtKind::If {
                condition,
                block,
                else_branch,
            } => [*condition, *block].into_iter().chain(*else_branch).collect(),
            StmtKind::While { condition, block } => vec![*condition, *block],
            StmtKind::DoWhile { condition, block } => vec![*block, *condition],
            StmtKind::For {
                init,
                condition,
                update,
                block,
            } => init
                .iter()
                .chain(condition)
                .chain(update)
                .copied()
                .chain(Some(*block))
                .collect(),
            StmtKind::Return { expression } => expression.iter().copied().collect(),
            StmtKind::Break | StmtKind::Continue | StmtKind::Discard => Vec::new(),
            StmtKind::Assignment { left, right, .. } => vec![*left, *right],
            StmtKind::IncrementDecrement { expression, .. } => vec![*expression],
            StmtKind::FunctionCall { call } => vec![*call],
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Block { .. } => "block",
            StmtKind::If { .. } => "if statement",
            StmtKind::While { .. } => "while statement",
            StmtKind::DoWhile { .. } => "do-while statement",
            StmtKind::For { .. } => "for statement",
            StmtKind::Return { .. } => "return statement",
            StmtKind::Break => "break statement",
            StmtKind::Continue => "continue statement",
            StmtKind::Discard => "discard statement",
            StmtKind::Assignment { .. } => "assignment statement",
            StmtKind::IncrementDecrement { .. } => "increment/decrement statement",
            StmtKind::FunctionCall { .. } => "function call statement",
        }
    }
}
