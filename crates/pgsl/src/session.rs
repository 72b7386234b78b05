//! Validate-then-transpile sessions.
//!
//! A [`Session`] holds the options of one compile. Every call to
//! [`Session::validate`] or [`Session::compile`] runs on a fresh
//! [`ValidationTrace`], so a session can be reused for any number of trees.

use crate::error::CompileError;
use crate::options::CompileOptions;
use pgsl_codegen::Transpiler;
use pgsl_log::{debug, info, warn};
use pgsl_syntax::{Emitter, NodeId, SyntaxTree};
use pgsl_typecheck::{ValidationError, ValidationTrace, validate};

/// Compiles validated PGSL documents to WGSL.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: CompileOptions,
}

impl Session {
    /// Creates a session. Applies the log level override of `options`.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        if let Some(level) = options.level() {
            pgsl_log::set_level(level);
        }
        Self { options }
    }

    /// Options of this session.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Validates the document `document` of `tree`.
    ///
    /// Returns the trace on success; it holds every attachment the
    /// transpiler needs.
    ///
    /// # Errors
    ///
    /// [`CompileError::NotADocument`] when `document` is not a document node,
    /// [`CompileError::Validation`] with every error otherwise found.
    pub fn validate(&self, tree: &SyntaxTree, document: NodeId) -> Result<ValidationTrace, CompileError> {
        let kind = tree.kind(document);
        if !kind.is_document() {
            return Err(CompileError::NotADocument {
                node: document,
                kind: kind.name(),
            });
        }

        let mut trace = ValidationTrace::new(self.options.trace_options());
        validate(tree, document, &mut trace);

        if trace.has_errors() {
            let errors = trace.take_errors();
            warn!("validation of document {} found {} errors", document, errors.len());
            return Err(CompileError::Validation { errors });
        }

        debug!("document {} validated", document);
        Ok(trace)
    }

    /// Validates `document` and transpiles it to WGSL.
    ///
    /// # Errors
    ///
    /// See [`Session::validate`]. Nothing is emitted when validation fails.
    pub fn compile(&self, tree: &SyntaxTree, document: NodeId) -> Result<String, CompileError> {
        let trace = self.validate(tree, document)?;
        let output = Transpiler::new(tree, &trace)
            .with_config(self.options.transpile_config())
            .transpile(document);
        info!("compiled document {} into {} bytes of WGSL", document, output.len());
        Ok(output)
    }

    /// Renders `errors` with this session's colour setting. With `source`,
    /// the offending lines are shown and underlined.
    #[must_use]
    pub fn render(&self, errors: &[ValidationError], source: Option<&str>) -> String {
        let diagnostics: Vec<_> = errors.iter().map(ValidationError::to_diagnostic).collect();
        Emitter::new(self.options.uses_colors()).render_all(&diagnostics, source)
    }
}

/// Compiles `document` with default options.
///
/// # Errors
///
/// See [`Session::validate`].
pub fn compile(tree: &SyntaxTree, document: NodeId) -> Result<String, CompileError> {
    Session::default().compile(tree, document)
}
