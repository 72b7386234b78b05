// Common test utilities for validation tests
//
// Trees are built with `TreeBuilder`; most tests wrap their statements in
// `function main() -> Void { ... }` inside a document.

#![allow(dead_code)]

use pgsl_syntax::ast::DeclarationKind;
use pgsl_syntax::{NodeId, SyntaxTree, TreeBuilder, TreeResult};
use pgsl_typecheck::{ErrorKind, TraceOptions, ValidationTrace, validate};

/// A validated tree together with its trace.
pub struct Validated {
    pub tree: SyntaxTree,
    pub trace: ValidationTrace,
    pub document: NodeId,
}

impl Validated {
    /// Error kinds in the order they were pushed.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.trace.errors().iter().map(|error| error.kind.clone()).collect()
    }

    /// Number of errors matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&ErrorKind) -> bool) -> usize {
        self.trace.errors().iter().filter(|error| predicate(&error.kind)).count()
    }

    /// Panics with the pushed errors unless there are none.
    pub fn assert_clean(&self) {
        assert!(
            !self.trace.has_errors(),
            "unexpected errors: {:?}",
            self.trace.errors().iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}

/// Validates the document built from the declarations `build` returns.
pub fn validate_document_with(
    options: TraceOptions,
    build: impl FnOnce(&mut TreeBuilder) -> TreeResult<Vec<NodeId>>,
) -> Validated {
    let mut b = TreeBuilder::new();
    let declarations = build(&mut b).expect("tree construction failed");
    let document = b.document(declarations).expect("document construction failed");
    let tree = b.finish();

    let mut trace = ValidationTrace::new(options);
    validate(&tree, document, &mut trace);
    assert_eq!(trace.depth(), 0, "scopes left open");

    Validated { tree, trace, document }
}

/// Validates the document built from the declarations `build` returns, with
/// default options.
pub fn validate_document(build: impl FnOnce(&mut TreeBuilder) -> TreeResult<Vec<NodeId>>) -> Validated {
    validate_document_with(TraceOptions::default(), build)
}

/// Validates `function main() -> Void { statements }` where `build` returns
/// the statements.
pub fn validate_main(build: impl FnOnce(&mut TreeBuilder) -> TreeResult<Vec<NodeId>>) -> Validated {
    validate_document(|b| {
        let statements = build(b)?;
        Ok(vec![main(b, statements)?])
    })
}

/// `function main() -> Void { statements }`
pub fn main(b: &mut TreeBuilder, statements: Vec<NodeId>) -> TreeResult<NodeId> {
    function(b, "main", "Void", statements)
}

/// `function name() -> returns { statements }`
pub fn function(b: &mut TreeBuilder, name: &str, returns: &str, statements: Vec<NodeId>) -> TreeResult<NodeId> {
    let block = b.block(statements)?;
    let returns = b.ty(returns, vec![])?;
    b.function(name, false, vec![], returns, block)
}

/// `function name(value: Integer) -> Integer { return value; }`, optionally
/// declared constant.
pub fn identity(b: &mut TreeBuilder, name: &str, constant: bool) -> TreeResult<NodeId> {
    let ty = b.ty("Integer", vec![])?;
    let parameter = b.parameter("value", ty)?;
    let value = b.variable("value")?;
    let ret = b.return_statement(Some(value))?;
    let block = b.block(vec![ret])?;
    let returns = b.ty("Integer", vec![])?;
    b.function(name, constant, vec![parameter], returns, block)
}

/// `kind name: ty = value;` with a plain type name.
pub fn typed(
    b: &mut TreeBuilder,
    kind: DeclarationKind,
    name: &str,
    ty: &str,
    value: Option<NodeId>,
) -> TreeResult<NodeId> {
    let ty = b.ty(ty, vec![])?;
    b.declare(kind, name, Some(ty), value)
}

/// `let name = value;` with an integer literal.
pub fn let_integer(b: &mut TreeBuilder, name: &str, value: i64) -> TreeResult<NodeId> {
    let value = b.integer(value)?;
    b.declare(DeclarationKind::Let, name, None, Some(value))
}
