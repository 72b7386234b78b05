//! Statement validation.
//!
//! Statements carry no attachment of their own. They check the structure
//! around them (enclosing function or loop), the attachments of their
//! expressions, and open scopes for their blocks:
//!
//! - blocks open a block scope
//! - loops open a loop scope around their body (and, for `for`, around the
//!   initializer, condition and update as well)
//! - `return` looks up the enclosing function scope for the declared type

use crate::check::ops::{AssignmentOperator, binary_result};
use crate::check::{expect_boolean, report, type_name, validate, validate_all};
use crate::error::ErrorKind;
use crate::trace::{FixedState, ScopeOwner, ScopeTag, ValidationTrace};
use crate::types::{ScalarType, TypeDefinition};
use pgsl_syntax::ast::{DeclKind, DeclarationKind, StmtKind};
use pgsl_syntax::{NodeId, NodeKind, SyntaxTree};

/// Validates a statement node.
pub fn validate_statement(tree: &SyntaxTree, node: NodeId, kind: &StmtKind, trace: &mut ValidationTrace) {
    match kind {
        StmtKind::Block { statements } => {
            trace.new_scope(ScopeOwner::Block(node), |trace| validate_all(tree, statements, trace));
        }
        StmtKind::If {
            condition,
            block,
            else_branch,
        } => {
            validate(tree, *condition, trace);
            expect_boolean(tree, trace, *condition);
            validate(tree, *block, trace);
            if let Some(else_branch) = else_branch {
                validate(tree, *else_branch, trace);
            }
        }
        StmtKind::While { condition, block } => {
            validate(tree, *condition, trace);
            expect_boolean(tree, trace, *condition);
            trace.new_scope(ScopeOwner::Loop(node), |trace| validate(tree, *block, trace));
        }
        StmtKind::DoWhile { condition, block } => {
            trace.new_scope(ScopeOwner::Loop(node), |trace| validate(tree, *block, trace));
            validate(tree, *condition, trace);
            expect_boolean(tree, trace, *condition);
        }
        StmtKind::For {
            init,
            condition,
            update,
            block,
        } => {
            trace.new_scope(ScopeOwner::Loop(node), |trace| {
                for_clauses(tree, *init, *condition, *update, trace);
                validate(tree, *block, trace);
            });
        }
        StmtKind::Return { expression } => return_statement(tree, node, *expression, trace),
        StmtKind::Break => {
            if !trace.has_scope(ScopeTag::Loop) {
                report(tree, trace, node, ErrorKind::BreakOutsideLoop);
            }
        }
        StmtKind::Continue => {
            if !trace.has_scope(ScopeTag::Loop) {
                report(tree, trace, node, ErrorKind::ContinueOutsideLoop);
            }
        }
        StmtKind::Discard => {}
        StmtKind::Assignment { operator, left, right } => {
            assignment(tree, node, operator, *left, *right, trace);
        }
        StmtKind::IncrementDecrement { operator, expression } => {
            increment_decrement(tree, node, operator, *expression, trace);
        }
        StmtKind::FunctionCall { call } => {
            validate(tree, *call, trace);
        }
    }
}

fn for_clauses(
    tree: &SyntaxTree,
    init: Option<NodeId>,
    condition: Option<NodeId>,
    update: Option<NodeId>,
    trace: &mut ValidationTrace,
) {
    if let Some(init) = init {
        let is_let = matches!(
            tree.kind(init),
            NodeKind::Declaration(DeclKind::Variable {
                declaration: DeclarationKind::Let,
                ..
            })
        );
        if !is_let {
            report(tree, trace, init, ErrorKind::ForInitNotLet);
        }
        validate(tree, init, trace);
    }

    if let Some(condition) = condition {
        validate(tree, condition, trace);
        expect_boolean(tree, trace, condition);
    }

    if let Some(update) = update {
        let allowed = matches!(
            tree.kind(update),
            NodeKind::Statement(
                StmtKind::Assignment { .. } | StmtKind::IncrementDecrement { .. } | StmtKind::FunctionCall { .. }
            )
        );
        if allowed {
            validate(tree, update, trace);
        } else {
            report(tree, trace, update, ErrorKind::InvalidForUpdate);
        }
    }
}

fn return_statement(tree: &SyntaxTree, node: NodeId, expression: Option<NodeId>, trace: &mut ValidationTrace) {
    let found = match expression {
        Some(expression) => {
            validate(tree, expression, trace);
            trace.expression(expression).resolve_type.clone()
        }
        None => TypeDefinition::Void,
    };

    let expected = trace
        .scope_of(ScopeTag::Function)
        .and_then(|scope| match scope.owner() {
            ScopeOwner::Function { return_type, .. } => Some(return_type.clone()),
            _ => None,
        });

    let Some(expected) = expected else {
        report(tree, trace, node, ErrorKind::ReturnOutsideFunction);
        return;
    };

    if found.is_unresolved() || expected.is_unresolved() {
        return;
    }

    // `return;` in a Void function: Void is equal to itself but never castable.
    let fits = found.equals(trace, &expected) || found.is_implicit_castable_into(trace, &expected);
    if !fits {
        let kind = ErrorKind::ReturnTypeMismatch {
            expected: type_name(tree, &expected),
            found: type_name(tree, &found),
        };
        report(tree, trace, node, kind);
    }
}

/// Reports targets that are not writable and returns whether the target's
/// type is worth checking further. Shared by assignments and increments.
///
/// At most one error is pushed: a constant non-storage value (e.g. a literal
/// or a call result) is only reported as not being storage. Unresolved
/// targets were reported already.
fn check_writable(tree: &SyntaxTree, target: NodeId, trace: &mut ValidationTrace) -> bool {
    let attachment = trace.expression(target);
    if attachment.resolve_type.is_unresolved() {
        return false;
    }
    let (is_storage, is_constant) = (attachment.is_storage, attachment.fixed_state == FixedState::Constant);

    if !is_storage {
        report(tree, trace, target, ErrorKind::NotStorage);
        false
    } else if is_constant {
        report(tree, trace, target, ErrorKind::AssignmentToConstant);
        false
    } else {
        true
    }
}

fn assignment(
    tree: &SyntaxTree,
    node: NodeId,
    operator: &str,
    left: NodeId,
    right: NodeId,
    trace: &mut ValidationTrace,
) {
    validate(tree, left, trace);
    validate(tree, right, trace);
    let writable = check_writable(tree, left, trace);

    let Some(operator) = AssignmentOperator::from_token(operator) else {
        let kind = ErrorKind::UnknownAssignmentOperator {
            operator: operator.to_string(),
        };
        report(tree, trace, node, kind);
        return;
    };

    let target = trace.expression(left).resolve_type.clone();
    let value = trace.expression(right).resolve_type.clone();
    if !writable || value.is_unresolved() {
        return;
    }

    let produced = match operator {
        AssignmentOperator::Assign => Some(value.clone()),
        AssignmentOperator::Compound(operator) => binary_result(operator, &target, &value),
    };
    let fits = produced.is_some_and(|ty| ty.is_implicit_castable_into(trace, target.loaded()));
    if !fits {
        let kind = ErrorKind::TypeMismatch {
            expected: type_name(tree, &target),
            found: type_name(tree, &value),
        };
        report(tree, trace, right, kind);
    }
}

fn increment_decrement(
    tree: &SyntaxTree,
    node: NodeId,
    operator: &str,
    expression: NodeId,
    trace: &mut ValidationTrace,
) {
    validate(tree, expression, trace);
    let writable = check_writable(tree, expression, trace);

    if !matches!(operator, "++" | "--") {
        let kind = ErrorKind::UnknownIncrementOperator {
            operator: operator.to_string(),
        };
        report(tree, trace, node, kind);
    }

    if !writable {
        return;
    }

    let target = trace.expression(expression).resolve_type.loaded().clone();
    let integer = matches!(
        target,
        TypeDefinition::Scalar(ScalarType::Integer | ScalarType::UnsignedInteger)
    );
    if !integer {
        let found = type_name(tree, &target);
        report(tree, trace, expression, ErrorKind::InvalidIncrementTarget { found });
    }
}
