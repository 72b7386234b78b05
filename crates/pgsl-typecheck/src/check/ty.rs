//! Type declaration resolution.
//!
//! A type declaration names a builtin type or a struct and may carry
//! template arguments:
//!
//! ```text
//! Float                 Vector3<Float>          Matrix4x4<Float>
//! Array<Integer>        Array<Light, 8>         Pointer<Float>
//! Texture2d<Float>      Sampler                 Light
//! ```
//!
//! Template arguments are type declarations, except the length of a fixed
//! size array, which is a constant integer literal.

use crate::check::{report, validate_all};
use crate::error::ErrorKind;
use crate::trace::{ScopedValue, ValidationTrace};
use crate::types::{ArrayLength, ScalarType, TextureDimension, TypeDefinition};
use pgsl_mem::Symbol;
use pgsl_syntax::ast::{DeclKind, ExprKind, LiteralValue};
use pgsl_syntax::{NodeId, NodeKind, SyntaxTree};

/// Validates the templates of a type declaration and resolves it. Failures
/// push one diagnostic and resolve to [`TypeDefinition::Unresolved`].
pub fn validate_type(
    tree: &SyntaxTree,
    node: NodeId,
    name: Symbol,
    templates: &[NodeId],
    trace: &mut ValidationTrace,
) -> TypeDefinition {
    validate_all(tree, templates, trace);

    // A template that failed to resolve has already been reported.
    let poisoned = templates
        .iter()
        .any(|&template| is_type_declaration(tree, template) && trace.type_of(template).is_unresolved());
    if poisoned {
        return TypeDefinition::Unresolved;
    }

    match resolve(tree, name, templates, trace) {
        Ok(ty) => ty,
        Err(kind) => {
            report(tree, trace, node, kind);
            TypeDefinition::Unresolved
        }
    }
}

fn resolve(
    tree: &SyntaxTree,
    name: Symbol,
    templates: &[NodeId],
    trace: &ValidationTrace,
) -> Result<TypeDefinition, ErrorKind> {
    let type_name = tree.name(name);
    let invalid = |expected: &'static str| ErrorKind::InvalidTemplate {
        name: type_name.to_string(),
        expected,
    };
    let plain = |ty: TypeDefinition| {
        if templates.is_empty() {
            Ok(ty)
        } else {
            Err(invalid("no template arguments"))
        }
    };

    match type_name {
        "Void" => plain(TypeDefinition::Void),
        "Boolean" => plain(TypeDefinition::BOOLEAN),
        "Integer" => plain(TypeDefinition::INTEGER),
        "UnsignedInteger" => plain(TypeDefinition::UNSIGNED_INTEGER),
        "Float" => plain(TypeDefinition::FLOAT),
        "Float16" => {
            if !trace.options().enable_f16 {
                return Err(ErrorKind::Float16Disabled);
            }
            plain(TypeDefinition::Scalar(ScalarType::Float16))
        }
        "Sampler" => plain(TypeDefinition::Sampler { comparison: false }),
        "SamplerComparison" => plain(TypeDefinition::Sampler { comparison: true }),
        "Pointer" => {
            let inner = single_type(tree, templates, trace)
                .filter(TypeDefinition::is_concrete)
                .ok_or(invalid("one type argument"))?;
            Ok(TypeDefinition::Pointer(Box::new(inner)))
        }
        "Array" => array(tree, templates, trace).ok_or(invalid(
            "an element type with a fixed footprint and an optional positive integer literal length",
        )),
        _ => {
            if let Some(dimension) = vector_dimension(type_name) {
                let inner = single_scalar(tree, templates, trace).ok_or(invalid("one scalar type argument"))?;
                Ok(TypeDefinition::Vector { dimension, inner })
            } else if let Some((columns, rows)) = matrix_shape(type_name) {
                let inner = single_scalar(tree, templates, trace)
                    .filter(|scalar| scalar.is_float())
                    .ok_or(invalid("one float type argument"))?;
                Ok(TypeDefinition::Matrix { columns, rows, inner })
            } else if let Some(dimension) = texture_dimension(type_name) {
                let sampled = single_scalar(tree, templates, trace)
                    .filter(|scalar| !matches!(scalar, ScalarType::Boolean | ScalarType::Float16))
                    .ok_or(invalid("one of Float, Integer or UnsignedInteger"))?;
                Ok(TypeDefinition::Texture { dimension, sampled })
            } else {
                match trace.scoped_value(name) {
                    Some(ScopedValue::Struct(ty)) => plain(TypeDefinition::Struct(*ty)),
                    _ => Err(ErrorKind::UnknownType {
                        name: type_name.to_string(),
                    }),
                }
            }
        }
    }
}

fn is_type_declaration(tree: &SyntaxTree, node: NodeId) -> bool {
    matches!(tree.kind(node), NodeKind::Declaration(DeclKind::Type { .. }))
}

fn template_type(tree: &SyntaxTree, node: NodeId, trace: &ValidationTrace) -> Option<TypeDefinition> {
    is_type_declaration(tree, node).then(|| trace.type_of(node).clone())
}

fn single_type(tree: &SyntaxTree, templates: &[NodeId], trace: &ValidationTrace) -> Option<TypeDefinition> {
    match templates {
        [template] => template_type(tree, *template, trace),
        _ => None,
    }
}

fn single_scalar(tree: &SyntaxTree, templates: &[NodeId], trace: &ValidationTrace) -> Option<ScalarType> {
    match single_type(tree, templates, trace)? {
        TypeDefinition::Scalar(scalar) => Some(scalar),
        _ => None,
    }
}

fn array(tree: &SyntaxTree, templates: &[NodeId], trace: &ValidationTrace) -> Option<TypeDefinition> {
    let (element, length) = match templates {
        [element] => (*element, ArrayLength::Variable),
        [element, length] => (*element, ArrayLength::Fixed(array_length(tree, *length)?)),
        _ => return None,
    };

    let inner = template_type(tree, element, trace)?;
    if !inner.is_fixed_footprint(trace) {
        return None;
    }
    Some(TypeDefinition::Array {
        inner: Box::new(inner),
        length,
    })
}

fn array_length(tree: &SyntaxTree, node: NodeId) -> Option<u32> {
    let NodeKind::Expression(ExprKind::Literal(literal)) = tree.kind(node) else {
        return None;
    };

    let count = match *literal {
        LiteralValue::Integer(value) => u32::try_from(value).ok()?,
        LiteralValue::UnsignedInteger(value) => u32::try_from(value).ok()?,
        _ => return None,
    };
    (count > 0).then_some(count)
}

fn vector_dimension(name: &str) -> Option<u8> {
    match name {
        "Vector2" => Some(2),
        "Vector3" => Some(3),
        "Vector4" => Some(4),
        _ => None,
    }
}

fn matrix_shape(name: &str) -> Option<(u8, u8)> {
    let (columns, rows) = name.strip_prefix("Matrix")?.split_once('x')?;
    let columns = columns.parse::<u8>().ok().filter(|n| (2..=4).contains(n))?;
    let rows = rows.parse::<u8>().ok().filter(|n| (2..=4).contains(n))?;
    Some((columns, rows))
}

fn texture_dimension(name: &str) -> Option<TextureDimension> {
    match name {
        "Texture1d" => Some(TextureDimension::D1),
        "Texture2d" => Some(TextureDimension::D2),
        "Texture3d" => Some(TextureDimension::D3),
        "TextureCube" => Some(TextureDimension::Cube),
        _ => None,
    }
}
