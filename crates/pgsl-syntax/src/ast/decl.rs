//! Declaration nodes.
//!
//! Declarations introduce names into a scope: functions, variables, structs
//! and their properties. Type annotations are declarations too, since they
//! resolve a name (and template arguments) into a type.

use crate::tree::NodeId;
use pgsl_mem::Symbol;
use std::fmt;
use std::str::FromStr;

/// Binding kind of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `const`: immutable, requires a constant initialiser
    Const,
    /// `let`: mutable function-scope variable
    Let,
    /// `private`: module-scope per-invocation variable
    Private,
    /// `workgroup`: module-scope variable shared in a workgroup
    Workgroup,
    /// `uniform`: read-only host-provided buffer
    Uniform,
    /// `storage`: read-write host-shared buffer
    Storage,
    /// `handle`: texture or sampler binding
    Handle,
}

impl DeclarationKind {
    /// Keyword spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Private => "private",
            DeclarationKind::Workgroup => "workgroup",
            DeclarationKind::Uniform => "uniform",
            DeclarationKind::Storage => "storage",
            DeclarationKind::Handle => "handle",
        }
    }

    /// Whether declarations of this kind only live at module scope.
    #[must_use]
    pub const fn is_module_scope(self) -> bool {
        !matches!(self, DeclarationKind::Const | DeclarationKind::Let)
    }

    /// Whether the binding can never be written.
    #[must_use]
    pub const fn is_constant(self) -> bool {
        matches!(self, DeclarationKind::Const)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclarationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "const" => Ok(DeclarationKind::Const),
            "let" => Ok(DeclarationKind::Let),
            "private" => Ok(DeclarationKind::Private),
            "workgroup" => Ok(DeclarationKind::Workgroup),
            "uniform" => Ok(DeclarationKind::Uniform),
            "storage" => Ok(DeclarationKind::Storage),
            "handle" => Ok(DeclarationKind::Handle),
            _ => Err(format!("unknown declaration kind: {s}")),
        }
    }
}

/// A declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Root of a tree: the whole shader module.
    Document {
        /// Module-scope declarations in source order
        declarations: Vec<NodeId>,
    },

    /// Function declaration: `function name(a: T) -> R { ... }`
    Function {
        /// Function name
        name: Symbol,
        /// Whether calls with constant arguments are compile-time constant
        constant: bool,
        /// Parameter declarations
        parameters: Vec<NodeId>,
        /// Return type annotation
        return_type: NodeId,
        /// Body block
        block: NodeId,
    },

    /// Function parameter: `name: Type`
    Parameter {
        /// Parameter name
        name: Symbol,
        /// Type annotation
        type_declaration: NodeId,
    },

    /// Variable declaration: `let name: Type = expr;`
    Variable {
        /// Binding kind
        declaration: DeclarationKind,
        /// Variable name
        name: Symbol,
        /// Optional type annotation
        type_declaration: Option<NodeId>,
        /// Optional initialiser
        expression: Option<NodeId>,
    },

    /// Struct declaration: `struct Name { a: T, b: U }`
    Struct {
        /// Struct name
        name: Symbol,
        /// Property declarations in layout order
        properties: Vec<NodeId>,
    },

    /// Struct property: `name: Type`
    StructProperty {
        /// Property name
        name: Symbol,
        /// Type annotation
        type_declaration: NodeId,
    },

    /// Type annotation: `Vector3<Float>`, `Array<Float, 4>`, `Light`
    Type {
        /// Type name
        name: Symbol,
        /// Template arguments: type declarations or constant expressions
        templates: Vec<NodeId>,
    },
}

impl DeclKind {
    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            DeclKind::Document { declarations } => declarations.clone(),
            DeclKind::Function {
                parameters,
                return_type,
                block,
                ..
            } => {
                let mut children = parameters.clone();
                children.push(*return_type);
                children.push(*block);
                children
            }
            DeclKind::Parameter {
                type_declaration, ..
            }
            | DeclKind::StructProperty {
                type_declaration, ..
            } => vec![*type_declaration],
            DeclKind::Variable {
                type_declaration,
                expression,
                ..
            } => type_declaration.iter().chain(expression).copied().collect(),
            DeclKind::Struct { properties, .. } => properties.clone(),
            DeclKind::Type { templates, .. } => templates.clone(),
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DeclKind::Document { .. } => "document",
            DeclKind::Function { .. } => "function declaration",
            DeclKind::Parameter { .. } => "parameter",
            DeclKind::Variable { .. } => "variable declaration",
            DeclKind::Struct { .. } => "struct declaration",
            DeclKind::StructProperty { .. } => "struct property",
            DeclKind::Type { .. } => "type declaration",
        }
    }
}
