//! PGSL: a shader language that compiles to WGSL
//!
//! This crate ties the front end together. It takes a syntax tree built by
//! the upstream grammar matcher, validates it and emits WGSL:
//!
//! - [`pgsl_syntax`] - spans, the syntax tree and diagnostics
//! - [`pgsl_typecheck`] - scope-aware validation and the type model
//! - [`pgsl_codegen`] - WGSL emission
//!
//! # Example
//!
//! ```
//! use pgsl::{CompileOptions, Session};
//! use pgsl::syntax::TreeBuilder;
//! use pgsl::syntax::ast::DeclarationKind;
//!
//! let mut b = TreeBuilder::new();
//! let value = b.float(0.5).unwrap();
//! let ty = b.ty("Float", vec![]).unwrap();
//! let scale = b.declare(DeclarationKind::Const, "scale", Some(ty), Some(value)).unwrap();
//! let document = b.document(vec![scale]).unwrap();
//! let tree = b.finish();
//!
//! let session = Session::new(CompileOptions::new());
//! let wgsl = session.compile(&tree, document).unwrap();
//! assert_eq!(wgsl, "const scale: f32 = 0.5f;");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod options;
pub mod session;

pub use error::CompileError;
pub use options::CompileOptions;
pub use session::{Session, compile};

pub use pgsl_codegen as codegen;
pub use pgsl_log as log;
pub use pgsl_syntax as syntax;
pub use pgsl_typecheck as typecheck;
