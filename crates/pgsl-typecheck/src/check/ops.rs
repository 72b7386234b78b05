//! Operator typing.
//!
//! Operands are compared by their loaded types. Every rule returns `None`
//! when the operator does not apply, leaving the diagnostic to the caller.

use crate::types::{ScalarType, TypeDefinition};
use pgsl_syntax::ast::{BinaryOperator, UnaryOperator};

/// Operator of an assignment statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`, `<<=` and the other compound forms
    Compound(BinaryOperator),
}

impl AssignmentOperator {
    /// Parses `= += -= *= /= %= &= |= ^= <<= >>=`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token == "=" {
            return Some(AssignmentOperator::Assign);
        }
        let operator = BinaryOperator::from_token(token.strip_suffix('=')?)?;
        (operator.is_arithmetic() || operator.is_bitwise() || operator.is_shift())
            .then_some(AssignmentOperator::Compound(operator))
    }
}

/// Result type of `left op right`.
#[must_use]
pub fn binary_result(
    operator: BinaryOperator,
    left: &TypeDefinition,
    right: &TypeDefinition,
) -> Option<TypeDefinition> {
    let (left, right) = (left.loaded(), right.loaded());

    if operator.is_arithmetic() {
        arithmetic(operator, left, right)
    } else if operator.is_bitwise() {
        bitwise(operator, left, right)
    } else if operator.is_shift() {
        shift(left, right)
    } else if operator.is_comparison() {
        comparison(operator, left, right)
    } else {
        (left.is_boolean() && right.is_boolean()).then_some(TypeDefinition::BOOLEAN)
    }
}

/// Result type of `op operand`.
#[must_use]
pub fn unary_result(operator: UnaryOperator, operand: &TypeDefinition) -> Option<TypeDefinition> {
    let operand = operand.loaded();
    let component = scalar_or_vector(operand)?;
    let applies = match operator {
        UnaryOperator::Minus => component.is_signed(),
        UnaryOperator::Not => component == ScalarType::Boolean,
        UnaryOperator::BitNot => component.is_integer(),
    };
    applies.then(|| operand.clone())
}

fn scalar_or_vector(ty: &TypeDefinition) -> Option<ScalarType> {
    match ty {
        TypeDefinition::Scalar(scalar) | TypeDefinition::Vector { inner: scalar, .. } => Some(*scalar),
        _ => None,
    }
}

fn arithmetic(operator: BinaryOperator, left: &TypeDefinition, right: &TypeDefinition) -> Option<TypeDefinition> {
    use TypeDefinition::{Matrix, Scalar, Vector};

    match (left, right) {
        (Scalar(a), Scalar(b)) if a == b && a.is_numeric() => Some(left.clone()),
        (Vector { dimension: da, inner: a }, Vector { dimension: db, inner: b })
            if da == db && a == b && a.is_numeric() =>
        {
            Some(left.clone())
        }
        (Vector { inner: a, .. }, Scalar(b)) if a == b && a.is_numeric() => Some(left.clone()),
        (Scalar(a), Vector { inner: b, .. }) if a == b && a.is_numeric() => Some(right.clone()),
        (Matrix { .. }, Matrix { .. })
            if left == right && matches!(operator, BinaryOperator::Add | BinaryOperator::Subtract) =>
        {
            Some(left.clone())
        }
        _ if operator == BinaryOperator::Multiply => matrix_product(left, right),
        _ => None,
    }
}

fn matrix_product(left: &TypeDefinition, right: &TypeDefinition) -> Option<TypeDefinition> {
    use TypeDefinition::{Matrix, Scalar, Vector};

    match (left, right) {
        (Matrix { inner: a, .. }, Scalar(b)) if a == b => Some(left.clone()),
        (Scalar(a), Matrix { inner: b, .. }) if a == b => Some(right.clone()),
        (Matrix { columns, rows, inner: a }, Vector { dimension, inner: b }) if columns == dimension && a == b => {
            Some(Vector { dimension: *rows, inner: *a })
        }
        (Vector { dimension, inner: a }, Matrix { columns, rows, inner: b }) if rows == dimension && a == b => {
            Some(Vector { dimension: *columns, inner: *a })
        }
        (
            Matrix { columns: inner_left, rows, inner: a },
            Matrix { columns, rows: inner_right, inner: b },
        ) if inner_left == inner_right && a == b => Some(Matrix {
            columns: *columns,
            rows: *rows,
            inner: *a,
        }),
        _ => None,
    }
}

fn bitwise(operator: BinaryOperator, left: &TypeDefinition, right: &TypeDefinition) -> Option<TypeDefinition> {
    if left != right {
        return None;
    }
    let component = scalar_or_vector(left)?;
    let applies = component.is_integer()
        || (component == ScalarType::Boolean && operator != BinaryOperator::BitXor);
    applies.then(|| left.clone())
}

fn shift(left: &TypeDefinition, right: &TypeDefinition) -> Option<TypeDefinition> {
    use TypeDefinition::{Scalar, Vector};

    let matches = match (left, right) {
        (Scalar(a), Scalar(ScalarType::UnsignedInteger)) => a.is_integer(),
        (
            Vector { dimension: da, inner: a },
            Vector { dimension: db, inner: ScalarType::UnsignedInteger },
        ) => da == db && a.is_integer(),
        _ => false,
    };
    matches.then(|| left.clone())
}

fn comparison(operator: BinaryOperator, left: &TypeDefinition, right: &TypeDefinition) -> Option<TypeDefinition> {
    if left != right {
        return None;
    }
    let component = scalar_or_vector(left)?;
    let ordering = !matches!(operator, BinaryOperator::Equal | BinaryOperator::NotEqual);
    if ordering && !component.is_numeric() {
        return None;
    }

    match left {
        TypeDefinition::Vector { dimension, .. } => Some(TypeDefinition::Vector {
            dimension: *dimension,
            inner: ScalarType::Boolean,
        }),
        _ => Some(TypeDefinition::BOOLEAN),
    }
}
