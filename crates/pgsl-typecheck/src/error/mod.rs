//! Validation diagnostics.
//!
//! Every user error found during validation becomes one [`ValidationError`]
//! pushed onto the trace. Validation never stops at the first error, so a
//! single pass reports every independent problem of a tree.
//!
//! Types inside messages are already spelled out with their PGSL names; the
//! interner is not needed to print an error.

use pgsl_syntax::ast::DeclarationKind;
use pgsl_syntax::{Diagnostic, DiagnosticBuilder, DiagnosticLevel, NodeId, Span};
use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A name resolved to nothing.
    UndefinedName {
        /// The name
        name: String,
    },

    /// A called name is not a function.
    NotAFunction {
        /// The name
        name: String,
        /// What it is instead
        found: &'static str,
    },

    /// A name used as a value is not a variable.
    NotAVariable {
        /// The name
        name: String,
        /// What it is instead
        found: &'static str,
    },

    /// A type name resolved to nothing.
    UnknownType {
        /// The name
        name: String,
    },

    /// Wrong template arguments for a builtin type.
    InvalidTemplate {
        /// Type name
        name: String,
        /// What was expected
        expected: &'static str,
    },

    /// `Float16` without the f16 extension.
    Float16Disabled,

    /// A name is bound twice in one scope.
    AlreadyDeclared {
        /// The name
        name: String,
    },

    /// A struct declares the same property twice.
    DuplicateProperty {
        /// Struct name
        structure: String,
        /// Property name
        property: String,
    },

    /// A struct property type that cannot be stored in a struct.
    InvalidPropertyType {
        /// Property name
        property: String,
        /// Offending type
        ty: String,
    },

    /// Condition of `if`, `while`, `do`-`while` or `for` is not Boolean.
    NonBooleanCondition {
        /// Type found
        found: String,
    },

    /// A value of one type used where another is required.
    TypeMismatch {
        /// Required type
        expected: String,
        /// Type found
        found: String,
    },

    /// Binary operator applied to unsupported operand types.
    InvalidOperands {
        /// Operator token
        operator: &'static str,
        /// Left operand type
        left: String,
        /// Right operand type
        right: String,
    },

    /// Unary operator applied to an unsupported operand type.
    InvalidOperand {
        /// Operator token
        operator: &'static str,
        /// Operand type
        operand: String,
    },

    /// `value.name` on a struct without that property.
    UnknownProperty {
        /// Struct type
        ty: String,
        /// Property name
        property: String,
    },

    /// `value.xyz` with an invalid swizzle.
    InvalidSwizzle {
        /// Vector type
        ty: String,
        /// Swizzle
        swizzle: String,
    },

    /// `value.name` on a type without properties.
    NotDecomposable {
        /// Value type
        ty: String,
    },

    /// `value[index]` on a type without elements.
    NotIndexable {
        /// Value type
        ty: String,
    },

    /// `value[index]` with a non-integer index.
    InvalidIndex {
        /// Index type
        found: String,
    },

    /// `Type(value)` between incompatible types.
    InvalidConversion {
        /// Source type
        from: String,
        /// Target type
        to: String,
    },

    /// An integer literal outside the range of its type.
    LiteralOutOfRange {
        /// Literal text
        literal: String,
        /// Literal type
        ty: &'static str,
    },

    /// A declaration with neither type annotation nor initialiser.
    MissingDeclarationType {
        /// Declared name
        name: String,
    },

    /// A `const` declaration without a constant initialiser.
    NonConstantInitializer {
        /// Declared name
        name: String,
    },

    /// A declaration kind used in the wrong scope.
    DeclarationScope {
        /// Kind used
        kind: DeclarationKind,
    },

    /// A declared type not allowed for the declaration kind.
    InvalidDeclarationType {
        /// Kind used
        kind: DeclarationKind,
        /// Declared type
        ty: String,
    },

    /// A resource binding with an initialiser.
    UnexpectedInitializer {
        /// Kind used
        kind: DeclarationKind,
    },

    /// For loop initialiser is not a `let` declaration.
    ForInitNotLet,

    /// For loop update is not an assignment, increment/decrement or call.
    InvalidForUpdate,

    /// `return` outside of a function.
    ReturnOutsideFunction,

    /// Returned value does not fit the declared return type.
    ReturnTypeMismatch {
        /// Declared return type
        expected: String,
        /// Returned type
        found: String,
    },

    /// `break` outside of a loop.
    BreakOutsideLoop,

    /// `continue` outside of a loop.
    ContinueOutsideLoop,

    /// Assignment or increment target is not a storage expression.
    NotStorage,

    /// Assignment or increment target is a constant.
    AssignmentToConstant,

    /// Unknown assignment operator token.
    UnknownAssignmentOperator {
        /// The token
        operator: String,
    },

    /// Unknown increment/decrement operator token.
    UnknownIncrementOperator {
        /// The token
        operator: String,
    },

    /// `++`/`--` on a non-integer value.
    InvalidIncrementTarget {
        /// Target type
        found: String,
    },

    /// Call with the wrong number of arguments.
    ArgumentCount {
        /// Callee name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Passed argument count
        found: usize,
    },

    /// Call argument that does not fit its parameter.
    ArgumentType {
        /// Callee name
        name: String,
        /// Zero based argument position
        index: usize,
        /// Parameter type
        expected: String,
        /// Argument type
        found: String,
    },
}

impl ErrorKind {
    /// Stable diagnostic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::UndefinedName { .. } => "V0001",
            ErrorKind::NotAFunction { .. } => "V0002",
            ErrorKind::NotAVariable { .. } => "V0003",
            ErrorKind::UnknownType { .. } => "V0004",
            ErrorKind::InvalidTemplate { .. } => "V0005",
            ErrorKind::Float16Disabled => "V0006",
            ErrorKind::AlreadyDeclared { .. } => "V0007",
            ErrorKind::DuplicateProperty { .. } => "V0008",
            ErrorKind::InvalidPropertyType { .. } => "V0009",
            ErrorKind::NonBooleanCondition { .. } => "V0010",
            ErrorKind::TypeMismatch { .. } => "V0011",
            ErrorKind::InvalidOperands { .. } => "V0012",
            ErrorKind::InvalidOperand { .. } => "V0013",
            ErrorKind::UnknownProperty { .. } => "V0014",
            ErrorKind::InvalidSwizzle { .. } => "V0015",
            ErrorKind::NotDecomposable { .. } => "V0016",
            ErrorKind::NotIndexable { .. } => "V0017",
            ErrorKind::InvalidIndex { .. } => "V0018",
            ErrorKind::InvalidConversion { .. } => "V0019",
            ErrorKind::LiteralOutOfRange { .. } => "V0020",
            ErrorKind::MissingDeclarationType { .. } => "V0021",
            ErrorKind::NonConstantInitializer { .. } => "V0022",
            ErrorKind::DeclarationScope { .. } => "V0023",
            ErrorKind::InvalidDeclarationType { .. } => "V0024",
            ErrorKind::ForInitNotLet => "V0025",
            ErrorKind::InvalidForUpdate => "V0026",
            ErrorKind::ReturnOutsideFunction => "V0027",
            ErrorKind::ReturnTypeMismatch { .. } => "V0028",
            ErrorKind::BreakOutsideLoop => "V0029",
            ErrorKind::ContinueOutsideLoop => "V0030",
            ErrorKind::NotStorage => "V0031",
            ErrorKind::AssignmentToConstant => "V0032",
            ErrorKind::UnknownAssignmentOperator { .. } => "V0033",
            ErrorKind::UnknownIncrementOperator { .. } => "V0034",
            ErrorKind::InvalidIncrementTarget { .. } => "V0035",
            ErrorKind::ArgumentCount { .. } => "V0036",
            ErrorKind::ArgumentType { .. } => "V0037",
            ErrorKind::UnexpectedInitializer { .. } => "V0038",
        }
    }

    /// Fix hint shown below the rendered diagnostic, if there is one.
    #[must_use]
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ErrorKind::Float16Disabled => Some("enable the f16 extension in the compile options".into()),
            ErrorKind::ForInitNotLet => Some("declare the loop variable with `let`".into()),
            ErrorKind::AssignmentToConstant => Some("declare the target with `let` instead of `const`".into()),
            ErrorKind::InvalidConversion { to, .. } => {
                Some(format!("only scalars and equally sized vectors or matrices convert into {to}"))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UndefinedName { name } => write!(f, "Name '{name}' is not defined."),
            ErrorKind::NotAFunction { name, found } => {
                write!(f, "'{name}' is a {found}, not a function.")
            }
            ErrorKind::NotAVariable { name, found } => {
                write!(f, "'{name}' is a {found}, not a variable.")
            }
            ErrorKind::UnknownType { name } => write!(f, "Type '{name}' is not defined."),
            ErrorKind::InvalidTemplate { name, expected } => {
                write!(f, "Type '{name}' expects {expected}.")
            }
            ErrorKind::Float16Disabled => {
                write!(f, "Float16 can only be used with the f16 extension enabled.")
            }
            ErrorKind::AlreadyDeclared { name } => {
                write!(f, "'{name}' is already declared in this scope.")
            }
            ErrorKind::DuplicateProperty { structure, property } => {
                write!(f, "Struct '{structure}' declares property '{property}' more than once.")
            }
            ErrorKind::InvalidPropertyType { property, ty } => {
                write!(f, "Property '{property}' cannot have type {ty}.")
            }
            ErrorKind::NonBooleanCondition { found } => {
                write!(f, "Expression must resolve into a boolean, found {found}.")
            }
            ErrorKind::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {expected}, found {found}.")
            }
            ErrorKind::InvalidOperands { operator, left, right } => {
                write!(f, "Operator '{operator}' cannot be applied to {left} and {right}.")
            }
            ErrorKind::InvalidOperand { operator, operand } => {
                write!(f, "Operator '{operator}' cannot be applied to {operand}.")
            }
            ErrorKind::UnknownProperty { ty, property } => {
                write!(f, "Type {ty} has no property '{property}'.")
            }
            ErrorKind::InvalidSwizzle { ty, swizzle } => {
                write!(f, "'{swizzle}' is not a valid swizzle of {ty}.")
            }
            ErrorKind::NotDecomposable { ty } => write!(f, "Type {ty} has no properties."),
            ErrorKind::NotIndexable { ty } => write!(f, "Type {ty} cannot be indexed."),
            ErrorKind::InvalidIndex { found } => {
                write!(f, "Index must be an Integer or UnsignedInteger, found {found}.")
            }
            ErrorKind::InvalidConversion { from, to } => {
                write!(f, "Cannot convert {from} into {to}.")
            }
            ErrorKind::LiteralOutOfRange { literal, ty } => {
                write!(f, "Literal {literal} does not fit into {ty}.")
            }
            ErrorKind::MissingDeclarationType { name } => {
                write!(f, "Declaration of '{name}' needs a type or an initial value.")
            }
            ErrorKind::NonConstantInitializer { name } => {
                write!(f, "Constant '{name}' must be initialized with a constant expression.")
            }
            ErrorKind::DeclarationScope { kind } => {
                if kind.is_module_scope() {
                    write!(f, "'{kind}' declarations are only allowed at module scope.")
                } else {
                    write!(f, "'{kind}' declarations are only allowed inside functions.")
                }
            }
            ErrorKind::InvalidDeclarationType { kind, ty } => {
                write!(f, "'{kind}' declarations cannot have type {ty}.")
            }
            ErrorKind::UnexpectedInitializer { kind } => {
                write!(f, "'{kind}' declarations cannot have an initial value.")
            }
            ErrorKind::ForInitNotLet => {
                write!(f, "For loop initializer must be a let declaration.")
            }
            ErrorKind::InvalidForUpdate => write!(
                f,
                "For loop update must be an assignment, increment, decrement or function call."
            ),
            ErrorKind::ReturnOutsideFunction => {
                write!(f, "Return statement must be inside a function.")
            }
            ErrorKind::ReturnTypeMismatch { expected, found } => {
                write!(f, "Return type {found} does not match the function return type {expected}.")
            }
            ErrorKind::BreakOutsideLoop => write!(f, "Break statement must be inside a loop."),
            ErrorKind::ContinueOutsideLoop => {
                write!(f, "Continue statement must be inside a loop.")
            }
            ErrorKind::NotStorage => write!(f, "Assignment target must be a storage expression."),
            ErrorKind::AssignmentToConstant => {
                write!(f, "Assignment target must be a variable, not a constant.")
            }
            ErrorKind::UnknownAssignmentOperator { operator } => {
                write!(f, "Unknown assignment operator '{operator}'.")
            }
            ErrorKind::UnknownIncrementOperator { operator } => {
                write!(f, "Unknown increment operator '{operator}'.")
            }
            ErrorKind::InvalidIncrementTarget { found } => write!(
                f,
                "Increment and decrement need an Integer or UnsignedInteger, found {found}."
            ),
            ErrorKind::ArgumentCount { name, expected, found } => write!(
                f,
                "Function '{name}' takes {expected} argument(s) but {found} were given."
            ),
            ErrorKind::ArgumentType { name, index, expected, found } => write!(
                f,
                "Argument {} of '{name}' must be {expected}, found {found}.",
                index + 1
            ),
        }
    }
}

/// One diagnostic pushed during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where in the source
    pub span: Span,
    /// Node that reported it
    pub node: NodeId,
}

impl ValidationError {
    /// Creates an error.
    #[must_use]
    pub fn new(kind: ErrorKind, span: Span, node: NodeId) -> Self {
        Self { kind, span, node }
    }

    /// Converts into a renderable diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let builder = DiagnosticBuilder::new(DiagnosticLevel::Error, self.kind.to_string(), self.span)
            .code(self.kind.code());
        match self.kind.suggestion() {
            Some(suggestion) => builder.suggest(suggestion).build(),
            None => builder.build(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.kind)
    }
}

impl std::error::Error for ValidationError {}
