//! PGSL Code Generation: validated syntax trees to WGSL text
//!
//! - [`transpile`] - the [`Transpiler`] and its configuration
//!
//! Code generation reads the attachments validation left in the
//! [`ValidationTrace`](pgsl_typecheck::ValidationTrace): declared and converted
//! types are emitted by their resolved WGSL names. Transpiling a tree whose
//! trace holds errors is possible but produces meaningless text.

#![warn(missing_docs)]

pub mod transpile;

pub use transpile::{TranspileConfig, Transpiler};
