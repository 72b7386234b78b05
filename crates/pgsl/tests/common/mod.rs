// Common test utilities for compile tests
//
// Programs are assembled with `TreeBuilder`. The helpers build the pieces
// most shader programs share: a `main` entry point and a few intrinsics
// flagged as build-in.

#![allow(dead_code)]

use pgsl::syntax::ast::DeclarationKind;
use pgsl::syntax::{NodeId, SyntaxTree, TreeBuilder, TreeResult};

/// A finished tree and its document node.
pub struct Program {
    pub tree: SyntaxTree,
    pub document: NodeId,
}

/// Builds a document from the declarations `build` returns.
pub fn program(build: impl FnOnce(&mut TreeBuilder) -> TreeResult<Vec<NodeId>>) -> Program {
    let mut b = TreeBuilder::new();
    let declarations = build(&mut b).expect("declarations build");
    let document = b.document(declarations).expect("document builds");
    Program {
        tree: b.finish(),
        document,
    }
}

/// Builds a document holding only `function main() -> Void` with the
/// statements `build` returns.
pub fn main_program(build: impl FnOnce(&mut TreeBuilder) -> TreeResult<Vec<NodeId>>) -> Program {
    program(|b| {
        let statements = build(b)?;
        Ok(vec![function(b, "main", "Void", vec![], statements)?])
    })
}

/// `function name(parameters) -> returns { statements }`.
pub fn function(
    b: &mut TreeBuilder,
    name: &str,
    returns: &str,
    parameters: Vec<NodeId>,
    statements: Vec<NodeId>,
) -> TreeResult<NodeId> {
    let block = b.block(statements)?;
    let returns = b.ty(returns, vec![])?;
    b.function(name, false, parameters, returns, block)
}

/// Build-in `function clamp01(x: Float) -> Float`, declared as constant.
pub fn clamp01_intrinsic(b: &mut TreeBuilder) -> TreeResult<NodeId> {
    b.build_in(|b| {
        let float = b.ty("Float", vec![])?;
        let x = b.parameter("x", float)?;
        let value = b.variable("x")?;
        let ret = b.return_statement(Some(value))?;
        let block = b.block(vec![ret])?;
        let returns = b.ty("Float", vec![])?;
        b.function("clamp01", true, vec![x], returns, block)
    })
}

/// `let name = value;`
pub fn let_float(b: &mut TreeBuilder, name: &str, value: f64) -> TreeResult<NodeId> {
    let value = b.float(value)?;
    b.declare(DeclarationKind::Let, name, None, Some(value))
}

/// Module-level `kind name: ty;` with a template-less type.
pub fn resource(b: &mut TreeBuilder, kind: DeclarationKind, name: &str, ty: &str) -> TreeResult<NodeId> {
    let ty = b.ty(ty, vec![])?;
    b.declare(kind, name, Some(ty), None)
}
