//! Declaration validation.
//!
//! Declarations bind names into the innermost scope:
//!
//! - the document opens the module scope and validates its declarations in
//!   order, so a name is visible to every declaration after it
//! - a function binds its signature before validating its body, so it can
//!   call itself, then binds its parameters inside a function scope
//! - a variable binds after its initialiser was validated, so
//!   `let x = x;` refers to an outer `x`
//! - a struct registers its members with the trace and binds its type

use crate::check::ty::validate_type;
use crate::check::{report, type_name, validate, validate_all};
use crate::error::ErrorKind;
use crate::trace::{
    Attachment, FixedState, FunctionSignature, ScopeOwner, ScopeTag, ScopedValue, StructDefinition, StructMember,
    ValidationTrace, VariableBinding,
};
use crate::types::{ArrayLength, StructType, TypeDefinition};
use pgsl_mem::Symbol;
use pgsl_syntax::ast::{DeclKind, DeclarationKind};
use pgsl_syntax::{NodeId, NodeKind, SyntaxTree};

/// Validates a declaration node and computes its attachment.
pub fn validate_declaration(
    tree: &SyntaxTree,
    node: NodeId,
    kind: &DeclKind,
    trace: &mut ValidationTrace,
) -> Option<Attachment> {
    match kind {
        DeclKind::Document { declarations } => {
            trace.new_scope(ScopeOwner::Document(node), |trace| {
                validate_all(tree, declarations, trace);
            });
            None
        }
        DeclKind::Function {
            name,
            constant,
            parameters,
            return_type,
            block,
        } => {
            let signature = function(tree, node, *name, *constant, parameters, *return_type, *block, trace);
            Some(Attachment::Function(signature))
        }
        DeclKind::Parameter { type_declaration, .. } => {
            validate(tree, *type_declaration, trace);
            Some(Attachment::Variable(VariableBinding {
                declaration: node,
                kind: None,
                ty: trace.type_of(*type_declaration).clone(),
            }))
        }
        DeclKind::Variable {
            declaration,
            name,
            type_declaration,
            expression,
        } => {
            let binding = variable(tree, node, *declaration, *name, *type_declaration, *expression, trace);
            Some(Attachment::Variable(binding))
        }
        DeclKind::Struct { name, properties } => {
            Some(Attachment::Type(structure(tree, node, *name, properties, trace)))
        }
        DeclKind::StructProperty { type_declaration, .. } => {
            validate(tree, *type_declaration, trace);
            Some(Attachment::Type(trace.type_of(*type_declaration).clone()))
        }
        DeclKind::Type { name, templates } => {
            Some(Attachment::Type(validate_type(tree, node, *name, templates, trace)))
        }
    }
}

/// Binds `name` in the innermost scope, reporting a redeclaration.
fn declare(tree: &SyntaxTree, trace: &mut ValidationTrace, node: NodeId, name: Symbol, value: ScopedValue) {
    if !trace.declare(name, value) {
        let name = tree.name(name).to_string();
        report(tree, trace, node, ErrorKind::AlreadyDeclared { name });
    }
}

#[allow(clippy::too_many_arguments)]
fn function(
    tree: &SyntaxTree,
    node: NodeId,
    name: Symbol,
    constant: bool,
    parameters: &[NodeId],
    return_type: NodeId,
    block: NodeId,
    trace: &mut ValidationTrace,
) -> FunctionSignature {
    validate(tree, return_type, trace);
    validate_all(tree, parameters, trace);

    let signature = FunctionSignature {
        declaration: node,
        constant,
        parameters: parameters
            .iter()
            .map(|&parameter| trace.type_of(parameter).clone())
            .collect(),
        return_type: trace.type_of(return_type).clone(),
    };
    declare(tree, trace, node, name, ScopedValue::Function(signature.clone()));

    let owner = ScopeOwner::Function {
        node,
        return_type: signature.return_type.clone(),
    };
    trace.new_scope(owner, |trace| {
        for &parameter in parameters {
            let NodeKind::Declaration(DeclKind::Parameter { name, .. }) = tree.kind(parameter) else {
                continue;
            };
            let Attachment::Variable(binding) = trace.attachment(parameter).clone() else {
                continue;
            };
            declare(tree, trace, parameter, *name, ScopedValue::Variable(binding));
        }
        validate(tree, block, trace);
    });

    signature
}

/// Whether a variable of `kind` may hold values of `ty`.
fn fits_declaration_kind(kind: DeclarationKind, ty: &TypeDefinition, trace: &ValidationTrace) -> bool {
    match kind {
        DeclarationKind::Const | DeclarationKind::Let | DeclarationKind::Private => {
            ty.is_storable(trace) && ty.is_constructible(trace)
        }
        DeclarationKind::Workgroup => ty.is_plain() && ty.is_fixed_footprint(trace),
        DeclarationKind::Uniform => ty.is_host_shareable(trace) && ty.is_constructible(trace),
        DeclarationKind::Storage => ty.is_host_shareable(trace),
        DeclarationKind::Handle => ty.is_handle(),
    }
}

fn variable(
    tree: &SyntaxTree,
    node: NodeId,
    kind: DeclarationKind,
    name: Symbol,
    type_declaration: Option<NodeId>,
    expression: Option<NodeId>,
    trace: &mut ValidationTrace,
) -> VariableBinding {
    let in_function = trace.has_scope(ScopeTag::Function);
    let misplaced = match kind {
        DeclarationKind::Const => false,
        DeclarationKind::Let => !in_function,
        _ => in_function,
    };
    if misplaced {
        report(tree, trace, node, ErrorKind::DeclarationScope { kind });
    }

    if let Some(type_declaration) = type_declaration {
        validate(tree, type_declaration, trace);
    }
    if let Some(expression) = expression {
        validate(tree, expression, trace);
    }

    let annotated = type_declaration.map(|node| trace.type_of(node).clone());
    let initial = expression.map(|node| (node, trace.expression(node).clone()));

    let ty = match (annotated, &initial) {
        (Some(ty), Some((expression, value))) => {
            let unresolved = ty.is_unresolved() || value.resolve_type.is_unresolved();
            if !unresolved && !value.resolve_type.is_implicit_castable_into(trace, &ty) {
                let kind = ErrorKind::TypeMismatch {
                    expected: type_name(tree, &ty),
                    found: type_name(tree, &value.resolve_type),
                };
                report(tree, trace, *expression, kind);
            }
            ty
        }
        (Some(ty), None) => ty,
        (None, Some((_, value))) => value.resolve_type.loaded().clone(),
        (None, None) => {
            let name = tree.name(name).to_string();
            report(tree, trace, node, ErrorKind::MissingDeclarationType { name });
            TypeDefinition::Unresolved
        }
    };

    if kind.is_constant() && type_declaration.or(expression).is_some() {
        let constant = initial
            .as_ref()
            .is_some_and(|(_, value)| value.fixed_state == FixedState::Constant);
        let unresolved = initial
            .as_ref()
            .is_some_and(|(_, value)| value.resolve_type.is_unresolved());
        if !constant && !unresolved {
            let name = tree.name(name).to_string();
            report(tree, trace, node, ErrorKind::NonConstantInitializer { name });
        }
    }

    let resource = matches!(
        kind,
        DeclarationKind::Workgroup | DeclarationKind::Uniform | DeclarationKind::Storage | DeclarationKind::Handle
    );
    if resource && expression.is_some() {
        report(tree, trace, node, ErrorKind::UnexpectedInitializer { kind });
    }

    if !ty.is_unresolved() && !fits_declaration_kind(kind, &ty, trace) {
        let ty = type_name(tree, &ty);
        report(tree, trace, node, ErrorKind::InvalidDeclarationType { kind, ty });
    }

    let binding = VariableBinding {
        declaration: node,
        kind: Some(kind),
        ty,
    };
    declare(tree, trace, node, name, ScopedValue::Variable(binding.clone()));
    binding
}

fn structure(
    tree: &SyntaxTree,
    node: NodeId,
    name: Symbol,
    properties: &[NodeId],
    trace: &mut ValidationTrace,
) -> TypeDefinition {
    validate_all(tree, properties, trace);

    let mut members: Vec<StructMember> = Vec::with_capacity(properties.len());
    for (position, &property) in properties.iter().enumerate() {
        let NodeKind::Declaration(DeclKind::StructProperty { name: member, .. }) = tree.kind(property) else {
            continue;
        };
        let ty = trace.type_of(property).clone();

        if members.iter().any(|existing| existing.name == *member) {
            let kind = ErrorKind::DuplicateProperty {
                structure: tree.name(name).to_string(),
                property: tree.name(*member).to_string(),
            };
            report(tree, trace, property, kind);
            continue;
        }

        let last = position + 1 == properties.len();
        let runtime_array = matches!(
            ty,
            TypeDefinition::Array {
                length: ArrayLength::Variable,
                ..
            }
        );
        let fits = ty.is_fixed_footprint(trace) || (last && runtime_array);
        if !ty.is_unresolved() && !fits {
            let kind = ErrorKind::InvalidPropertyType {
                property: tree.name(*member).to_string(),
                ty: type_name(tree, &ty),
            };
            report(tree, trace, property, kind);
        }

        members.push(StructMember { name: *member, ty });
    }

    let ty = StructType {
        name,
        declaration: node,
    };
    trace.register_struct(StructDefinition { ty, members });
    declare(tree, trace, node, name, ScopedValue::Struct(ty));
    TypeDefinition::Struct(ty)
}
