//! Error type of a compile session.

use pgsl_syntax::{Diagnostic, NodeId};
use pgsl_typecheck::ValidationError;
use std::fmt;

/// Why a session produced no WGSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Validation reported user errors.
    Validation {
        /// Every error, in the order it was found
        errors: Vec<ValidationError>,
    },

    /// The compiled node is not a document.
    NotADocument {
        /// The node
        node: NodeId,
        /// Its kind name
        kind: &'static str,
    },
}

impl CompileError {
    /// Validation errors, empty for other variants.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation { errors } => errors,
            Self::NotADocument { .. } => &[],
        }
    }

    /// Validation errors as diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors().iter().map(ValidationError::to_diagnostic).collect()
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { errors } if errors.len() == 1 => {
                write!(f, "validation failed: {}", errors[0])
            }
            Self::Validation { errors } => write!(f, "validation failed with {} errors", errors.len()),
            Self::NotADocument { node, kind } => write!(f, "{kind} {node} is not a document"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<Vec<ValidationError>> for CompileError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation { errors }
    }
}
