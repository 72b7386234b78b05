//! Expression validation.
//!
//! Every expression resolves into an [`ExpressionAttachment`]:
//!
//! - `fixed_state`: Constant when the value is known at shader creation
//!   time; composite expressions take the meet of their operands
//! - `is_storage`: whether the expression names a memory location and can be
//!   assigned to
//! - `resolve_type`: the value's type
//!
//! Expressions that cannot be resolved report once and fall back to
//! [`ExpressionAttachment::fallback`].

use crate::check::ops::{binary_result, unary_result};
use crate::check::{report, type_name, validate, validate_all};
use crate::error::ErrorKind;
use crate::trace::{ExpressionAttachment, FixedState, FunctionSignature, ScopedValue, ValidationTrace};
use crate::types::{ScalarType, TypeDefinition};
use pgsl_mem::Symbol;
use pgsl_syntax::ast::{BinaryOperator, ExprKind, LiteralValue, UnaryOperator};
use pgsl_syntax::{NodeId, SyntaxTree};

/// Validates an expression node and computes its attachment.
pub fn validate_expression(
    tree: &SyntaxTree,
    node: NodeId,
    kind: &ExprKind,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    match kind {
        ExprKind::Literal(value) => literal(tree, node, *value, trace),
        ExprKind::VariableName { name } => variable_name(tree, node, *name, trace),
        ExprKind::FunctionCall { name, arguments } => function_call(tree, node, *name, arguments, trace),
        ExprKind::Parenthesized { expression } => {
            validate(tree, *expression, trace);
            trace.expression(*expression).clone()
        }
        ExprKind::Binary { operator, left, right } => binary(tree, node, *operator, *left, *right, trace),
        ExprKind::Unary { operator, expression } => unary(tree, node, *operator, *expression, trace),
        ExprKind::ValueDecomposition { value, property } => {
            value_decomposition(tree, node, *value, *property, trace)
        }
        ExprKind::IndexedValue { value, index } => indexed_value(tree, node, *value, *index, trace),
        ExprKind::TypeConversion {
            type_declaration,
            expression,
        } => type_conversion(tree, node, *type_declaration, *expression, trace),
    }
}

fn literal(tree: &SyntaxTree, node: NodeId, value: LiteralValue, trace: &mut ValidationTrace) -> ExpressionAttachment {
    let (ty, fits) = match value {
        LiteralValue::Boolean(_) => (TypeDefinition::BOOLEAN, true),
        LiteralValue::Integer(value) => (TypeDefinition::INTEGER, i32::try_from(value).is_ok()),
        LiteralValue::UnsignedInteger(value) => {
            (TypeDefinition::UNSIGNED_INTEGER, u32::try_from(value).is_ok())
        }
        LiteralValue::Float(value) => (
            TypeDefinition::FLOAT,
            value.is_finite() && value.abs() <= f64::from(f32::MAX),
        ),
    };

    if !fits {
        let literal = match value {
            LiteralValue::Integer(value) => value.to_string(),
            LiteralValue::UnsignedInteger(value) => format!("{value}u"),
            LiteralValue::Float(value) => value.to_string(),
            LiteralValue::Boolean(value) => value.to_string(),
        };
        let ty = match ty {
            TypeDefinition::Scalar(scalar) => scalar.pgsl_name(),
            _ => "Void",
        };
        report(tree, trace, node, ErrorKind::LiteralOutOfRange { literal, ty });
    }

    ExpressionAttachment::constant(ty)
}

fn variable_name(tree: &SyntaxTree, node: NodeId, name: Symbol, trace: &mut ValidationTrace) -> ExpressionAttachment {
    let resolved = match trace.scoped_value(name) {
        Some(ScopedValue::Variable(binding)) => Ok(ExpressionAttachment::new(
            binding.fixed_state(),
            binding.is_storage(),
            binding.ty.clone(),
        )),
        Some(other) => Err(ErrorKind::NotAVariable {
            name: tree.name(name).to_string(),
            found: other.describe(),
        }),
        None => Err(ErrorKind::UndefinedName {
            name: tree.name(name).to_string(),
        }),
    };

    resolved.unwrap_or_else(|kind| {
        report(tree, trace, node, kind);
        ExpressionAttachment::fallback()
    })
}

fn function_call(
    tree: &SyntaxTree,
    node: NodeId,
    name: Symbol,
    arguments: &[NodeId],
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate_all(tree, arguments, trace);
    let arguments_state = FixedState::meet_all(
        arguments
            .iter()
            .map(|&argument| trace.expression(argument).fixed_state),
    );

    let signature = match trace.scoped_value(name) {
        Some(ScopedValue::Function(signature)) => Ok(signature.clone()),
        Some(other) => Err(ErrorKind::NotAFunction {
            name: tree.name(name).to_string(),
            found: other.describe(),
        }),
        None => Err(ErrorKind::UndefinedName {
            name: tree.name(name).to_string(),
        }),
    };

    match signature {
        Ok(signature) => {
            if trace.options().check_call_arguments {
                check_arguments(tree, node, name, &signature, arguments, trace);
            }
            let callee_state = if signature.constant {
                FixedState::Constant
            } else {
                FixedState::Variable
            };
            ExpressionAttachment::new(
                callee_state.meet(arguments_state),
                false,
                signature.return_type,
            )
        }
        Err(kind) => {
            report(tree, trace, node, kind);
            ExpressionAttachment::fallback()
        }
    }
}

fn check_arguments(
    tree: &SyntaxTree,
    node: NodeId,
    name: Symbol,
    signature: &FunctionSignature,
    arguments: &[NodeId],
    trace: &mut ValidationTrace,
) {
    if signature.parameters.len() != arguments.len() {
        let kind = ErrorKind::ArgumentCount {
            name: tree.name(name).to_string(),
            expected: signature.parameters.len(),
            found: arguments.len(),
        };
        report(tree, trace, node, kind);
        return;
    }

    for (index, (&argument, parameter)) in arguments.iter().zip(&signature.parameters).enumerate() {
        let found = trace.expression(argument).resolve_type.clone();
        if found.is_unresolved() || parameter.is_unresolved() {
            continue;
        }
        if !found.is_implicit_castable_into(trace, parameter) {
            let kind = ErrorKind::ArgumentType {
                name: tree.name(name).to_string(),
                index,
                expected: type_name(tree, parameter),
                found: type_name(tree, &found),
            };
            report(tree, trace, argument, kind);
        }
    }
}

fn binary(
    tree: &SyntaxTree,
    node: NodeId,
    operator: BinaryOperator,
    left: NodeId,
    right: NodeId,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate(tree, left, trace);
    validate(tree, right, trace);
    let left = trace.expression(left).clone();
    let right = trace.expression(right).clone();
    let fixed_state = left.fixed_state.meet(right.fixed_state);

    let ty = binary_result(operator, &left.resolve_type, &right.resolve_type).unwrap_or_else(|| {
        if left.resolve_type.is_unresolved() || right.resolve_type.is_unresolved() {
            return TypeDefinition::Unresolved;
        }
        let kind = ErrorKind::InvalidOperands {
            operator: operator.as_str(),
            left: type_name(tree, &left.resolve_type),
            right: type_name(tree, &right.resolve_type),
        };
        report(tree, trace, node, kind);
        if operator.is_comparison() || operator.is_logical() {
            TypeDefinition::BOOLEAN
        } else {
            reported_fallback(&left.resolve_type)
        }
    });

    ExpressionAttachment::new(fixed_state, false, ty)
}

fn unary(
    tree: &SyntaxTree,
    node: NodeId,
    operator: UnaryOperator,
    expression: NodeId,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate(tree, expression, trace);
    let operand = trace.expression(expression).clone();

    let ty = unary_result(operator, &operand.resolve_type).unwrap_or_else(|| {
        if operand.resolve_type.is_unresolved() {
            return TypeDefinition::Unresolved;
        }
        let kind = ErrorKind::InvalidOperand {
            operator: operator.as_str(),
            operand: type_name(tree, &operand.resolve_type),
        };
        report(tree, trace, node, kind);
        reported_fallback(&operand.resolve_type)
    });

    ExpressionAttachment::new(operand.fixed_state, false, ty)
}

/// Result type after an operator error was reported: the operand's type
/// keeps parents checking, unless it carries no value.
fn reported_fallback(operand: &TypeDefinition) -> TypeDefinition {
    let operand = operand.loaded();
    if operand.is_concrete() {
        operand.clone()
    } else {
        TypeDefinition::Unresolved
    }
}

/// Number of components selected by `swizzle` on a vector of `dimension`
/// components, using either `xyzw` or `rgba` names.
fn swizzle_length(swizzle: &str, dimension: u8) -> Option<u8> {
    const COMPONENT_SETS: [&str; 2] = ["xyzw", "rgba"];

    if swizzle.is_empty() || swizzle.len() > 4 {
        return None;
    }
    let components = usize::from(dimension).min(4);
    COMPONENT_SETS.iter().find_map(|set| {
        let names = &set[..components];
        swizzle
            .chars()
            .all(|c| names.contains(c))
            .then_some(swizzle.len() as u8)
    })
}

fn value_decomposition(
    tree: &SyntaxTree,
    node: NodeId,
    value: NodeId,
    property: Symbol,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate(tree, value, trace);
    let base = trace.expression(value).clone();
    let property_name = tree.name(property);

    // (type, whether the access still names a single memory location)
    let resolved = match base.resolve_type.loaded() {
        TypeDefinition::Struct(ty) => trace
            .struct_definition(ty.declaration)
            .and_then(|definition| definition.member(property))
            .map(|member| (member.ty.clone(), true))
            .ok_or_else(|| ErrorKind::UnknownProperty {
                ty: type_name(tree, &base.resolve_type),
                property: property_name.to_string(),
            }),
        TypeDefinition::Vector { dimension, inner } => swizzle_length(property_name, *dimension)
            .map(|length| match length {
                1 => (TypeDefinition::Scalar(*inner), true),
                _ => (TypeDefinition::Vector { dimension: length, inner: *inner }, false),
            })
            .ok_or_else(|| ErrorKind::InvalidSwizzle {
                ty: type_name(tree, &base.resolve_type),
                swizzle: property_name.to_string(),
            }),
        TypeDefinition::Unresolved => Ok((TypeDefinition::Unresolved, false)),
        other => Err(ErrorKind::NotDecomposable {
            ty: type_name(tree, other),
        }),
    };

    match resolved {
        Ok((ty, single)) => ExpressionAttachment::new(base.fixed_state, base.is_storage && single, ty),
        Err(kind) => {
            report(tree, trace, node, kind);
            ExpressionAttachment::new(base.fixed_state, false, TypeDefinition::Unresolved)
        }
    }
}

fn indexed_value(
    tree: &SyntaxTree,
    node: NodeId,
    value: NodeId,
    index: NodeId,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate(tree, value, trace);
    validate(tree, index, trace);
    let base = trace.expression(value).clone();
    let position = trace.expression(index).clone();

    let index_type = position.resolve_type.loaded();
    let integer = matches!(
        index_type,
        TypeDefinition::Scalar(ScalarType::Integer | ScalarType::UnsignedInteger)
    );
    if !integer && !index_type.is_unresolved() {
        let found = type_name(tree, index_type);
        report(tree, trace, index, ErrorKind::InvalidIndex { found });
    }

    let element = match base.resolve_type.loaded() {
        TypeDefinition::Vector { inner, .. } => Some(TypeDefinition::Scalar(*inner)),
        TypeDefinition::Matrix { rows, inner, .. } => Some(TypeDefinition::Vector {
            dimension: *rows,
            inner: *inner,
        }),
        TypeDefinition::Array { inner, .. } => Some(inner.as_ref().clone()),
        TypeDefinition::Unresolved => Some(TypeDefinition::Unresolved),
        _ => None,
    };
    let ty = element.unwrap_or_else(|| {
        let ty = type_name(tree, &base.resolve_type);
        report(tree, trace, node, ErrorKind::NotIndexable { ty });
        TypeDefinition::Unresolved
    });

    ExpressionAttachment::new(
        base.fixed_state.meet(position.fixed_state),
        base.is_storage,
        ty,
    )
}

fn type_conversion(
    tree: &SyntaxTree,
    node: NodeId,
    type_declaration: NodeId,
    expression: NodeId,
    trace: &mut ValidationTrace,
) -> ExpressionAttachment {
    validate(tree, type_declaration, trace);
    validate(tree, expression, trace);
    let target = trace.type_of(type_declaration).clone();
    let source = trace.expression(expression).clone();

    let unresolved = target.is_unresolved() || source.resolve_type.is_unresolved();
    if !unresolved && !source.resolve_type.is_explicit_castable_into(trace, &target) {
        let kind = ErrorKind::InvalidConversion {
            from: type_name(tree, &source.resolve_type),
            to: type_name(tree, &target),
        };
        report(tree, trace, node, kind);
    }

    ExpressionAttachment::new(source.fixed_state, false, target)
}
