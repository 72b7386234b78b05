//! Expression nodes in the PGSL syntax tree.

use crate::tree::NodeId;
use pgsl_mem::Symbol;
use std::fmt;

/// Literal value as matched by the grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    /// `true` / `false`
    Boolean(bool),
    /// Signed integer literal, `42` or `42i`
    Integer(i64),
    /// Unsigned integer literal, `42u`
    UnsignedInteger(u64),
    /// Float literal, `1.5` or `1.5f`
    Float(f64),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOperator {
    /// Source and WGSL spelling, which coincide.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }

    /// Parses an operator token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            "&" => BinaryOperator::BitAnd,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "<<" => BinaryOperator::ShiftLeft,
            ">>" => BinaryOperator::ShiftRight,
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            "<" => BinaryOperator::Less,
            "<=" => BinaryOperator::LessEqual,
            ">" => BinaryOperator::Greater,
            ">=" => BinaryOperator::GreaterEqual,
            "&&" => BinaryOperator::And,
            "||" => BinaryOperator::Or,
            _ => return None,
        })
    }

    /// `+ - * / %`
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
                | BinaryOperator::Modulo
        )
    }

    /// `& | ^`
    #[must_use]
    pub const fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinaryOperator::BitAnd | BinaryOperator::BitOr | BinaryOperator::BitXor
        )
    }

    /// `<< >>`
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight)
    }

    /// `== != < <= > >=`
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
        )
    }

    /// `&& ||`
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation: `-x`
    Minus,
    /// Logical negation: `!x`
    Not,
    /// Bitwise complement: `~x`
    BitNot,
}

impl UnaryOperator {
    /// Source and WGSL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Not => "!",
            UnaryOperator::BitNot => "~",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal: `true`, `1`, `1u`, `1.0`
    Literal(LiteralValue),

    /// Variable reference: `position`
    VariableName {
        /// Referenced name
        name: Symbol,
    },

    /// Function call: `name(a, b)`
    FunctionCall {
        /// Callee name
        name: Symbol,
        /// Argument expressions
        arguments: Vec<NodeId>,
    },

    /// Parenthesized expression: `(expr)`
    Parenthesized {
        /// Inner expression
        expression: NodeId,
    },

    /// Binary operation: `left op right`
    Binary {
        /// Operator
        operator: BinaryOperator,
        /// Left operand
        left: NodeId,
        /// Right operand
        right: NodeId,
    },

    /// Unary operation: `op expr`
    Unary {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        expression: NodeId,
    },

    /// Property or swizzle access: `light.color`, `v.xyz`
    ValueDecomposition {
        /// Decomposed value
        value: NodeId,
        /// Property name
        property: Symbol,
    },

    /// Element access: `values[index]`
    IndexedValue {
        /// Indexed value
        value: NodeId,
        /// Index expression
        index: NodeId,
    },

    /// Conversion into another type: `Float(count)`
    TypeConversion {
        /// Target type annotation
        type_declaration: NodeId,
        /// Converted expression
        expression: NodeId,
    },
}

impl ExprKind {
    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            ExprKind::Literal(_) | ExprKind::VariableName { .. } => Vec::new(),
            ExprKind::FunctionCall { arguments, .. } => arguments.clone(),
            ExprKind::Parenthesized { expression } | ExprKind::Unary { expression, .. } => {
                vec![*expression]
            }
            ExprKind::Binary { left, right, .. } => vec![*left, *right],
            ExprKind::ValueDecomposition { value, .. } => vec![*value],
            ExprKind::IndexedValue { value, index } => vec![*value, *index],
            ExprKind::TypeConversion {
                type_declaration,
                expression,
            } => vec![*type_declaration, *expression],
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Literal(_) => "literal",
            ExprKind::VariableName { .. } => "variable name",
            ExprKind::FunctionCall { .. } => "function call",
            ExprKind::Parenthesized { .. } => "parenthesized expression",
            ExprKind::Binary { .. } => "binary expression",
            ExprKind::Unary { .. } => "unary expression",
            ExprKind::ValueDecomposition { .. } => "value decomposition",
            ExprKind::IndexedValue { .. } => "indexed value",
            ExprKind::TypeConversion { .. } => "type conversion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operator_tokens() {
        for op in [
            BinaryOperator::Add,
            BinaryOperator::ShiftRight,
            BinaryOperator::LessEqual,
            BinaryOperator::Or,
        ] {
            assert_eq!(BinaryOperator::from_token(op.as_str()), Some(op));
        }
        assert_eq!(BinaryOperator::from_token("**"), None);
    }

    #[test]
    fn test_operator_classes_disjoint() {
        let op = BinaryOperator::Less;
        assert!(op.is_comparison());
        assert!(!op.is_arithmetic());
        assert!(!op.is_logical());
        assert!(BinaryOperator::BitXor.is_bitwise());
        assert!(BinaryOperator::ShiftLeft.is_shift());
    }

    #[test]
    fn test_call_children() {
        let call = ExprKind::FunctionCall {
            name: Symbol::new(50),
            arguments: vec![NodeId::from_raw(3), NodeId::from_raw(1)],
        };
        assert_eq!(call.children(), vec![NodeId::from_raw(3), NodeId::from_raw(1)]);
        assert!(ExprKind::Literal(LiteralValue::Float(1.0)).children().is_empty());
    }
}
