//! WGSL emission.
//!
//! [`Transpiler::transpile`] turns any validated node into WGSL text. The
//! output is compact: a whole block is printed on one line, with statements
//! separated by single spaces. Loops are lowered onto `loop`:
//!
//! ```text
//! while (E) B            loop { if !(E) { break; } B }
//! do B while (E);        loop { B if !(E) { break; } }
//! ```
//!
//! Build-in nodes describe intrinsics the target already provides and
//! always transpile to the empty string.

use pgsl_log::{debug, trace};
use pgsl_syntax::ast::{DeclKind, DeclarationKind, ExprKind, LiteralValue, StmtKind};
use pgsl_syntax::{NodeId, NodeKind, SyntaxTree};
use pgsl_typecheck::{Attachment, TypeDefinition, ValidationTrace};

/// Emission settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranspileConfig {
    /// Bind group of the module's uniform, storage and handle variables
    pub binding_group: u32,
}

/// Emits WGSL for the nodes of one validated tree.
pub struct Transpiler<'a> {
    tree: &'a SyntaxTree,
    trace: &'a ValidationTrace,
    config: TranspileConfig,
}

impl<'a> Transpiler<'a> {
    /// Creates a transpiler over `tree`, which must have been validated into
    /// `trace`.
    #[must_use]
    pub fn new(tree: &'a SyntaxTree, trace: &'a ValidationTrace) -> Self {
        Self {
            tree,
            trace,
            config: TranspileConfig::default(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TranspileConfig) -> Self {
        self.config = config;
        self
    }

    /// WGSL text of `node` and its subtree.
    ///
    /// # Panics
    ///
    /// Panics when a type or declaration in the subtree was not validated.
    #[must_use]
    pub fn transpile(&self, node: NodeId) -> String {
        if self.tree.is_build_in(node) {
            return String::new();
        }

        match self.tree.kind(node) {
            NodeKind::Declaration(kind) => self.declaration(node, kind),
            NodeKind::Expression(kind) => self.expression(kind),
            NodeKind::Statement(kind) => self.statement(kind),
        }
    }

    fn join(&self, nodes: &[NodeId], separator: &str) -> String {
        nodes
            .iter()
            .map(|&node| self.transpile(node))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn name(&self, node: NodeId) -> &str {
        match self.tree.kind(node) {
            NodeKind::Declaration(
                DeclKind::Function { name, .. }
                | DeclKind::Parameter { name, .. }
                | DeclKind::Variable { name, .. }
                | DeclKind::Struct { name, .. }
                | DeclKind::StructProperty { name, .. },
            ) => self.tree.name(*name),
            _ => "",
        }
    }

    fn wgsl_type(&self, ty: &TypeDefinition) -> String {
        ty.wgsl(self.tree.interner()).to_string()
    }

    /// `: T`, or nothing for Void.
    fn annotation(&self, ty: &TypeDefinition) -> String {
        if ty.is_void() {
            String::new()
        } else {
            format!(": {}", self.wgsl_type(ty))
        }
    }

    /// Statement text without its trailing `;`, as used in `for` clauses.
    fn clause(&self, node: Option<NodeId>) -> String {
        node.map(|node| self.transpile(node).trim_end_matches(';').to_string())
            .unwrap_or_default()
    }

    // Declarations

    fn declaration(&self, node: NodeId, kind: &DeclKind) -> String {
        match kind {
            DeclKind::Document { declarations } => self.document(declarations),
            DeclKind::Function {
                parameters,
                return_type,
                block,
                ..
            } => {
                let returns = self.trace.type_of(*return_type);
                let arrow = if returns.is_void() {
                    String::new()
                } else {
                    format!(" -> {}", self.wgsl_type(returns))
                };
                format!(
                    "fn {}({}){arrow} {}",
                    self.name(node),
                    self.join(parameters, ", "),
                    self.transpile(*block)
                )
            }
            DeclKind::Parameter { type_declaration, .. } | DeclKind::StructProperty { type_declaration, .. } => {
                format!("{}: {}", self.name(node), self.transpile(*type_declaration))
            }
            DeclKind::Variable {
                declaration,
                expression,
                ..
            } => self.variable(node, *declaration, *expression),
            DeclKind::Struct { properties, .. } => {
                let members: String = properties
                    .iter()
                    .map(|&property| format!("{}, ", self.transpile(property)))
                    .collect();
                format!("struct {} {{ {members}}}", self.name(node))
            }
            DeclKind::Type { .. } => self.wgsl_type(self.trace.type_of(node)),
        }
    }

    fn document(&self, declarations: &[NodeId]) -> String {
        debug!("transpile document with {} declarations", declarations.len());
        let body = self.join(declarations, "\n");
        if self.trace.options().enable_f16 {
            format!("enable f16;\n{body}")
        } else {
            body
        }
    }

    fn variable(&self, node: NodeId, kind: DeclarationKind, expression: Option<NodeId>) -> String {
        let ty = match self.trace.attachment(node) {
            Attachment::Variable(binding) => binding.ty.clone(),
            _ => TypeDefinition::Void,
        };
        let initializer = expression
            .map(|expression| format!(" = {}", self.transpile(expression)))
            .unwrap_or_default();

        let keyword = match kind {
            DeclarationKind::Const => "const".to_string(),
            DeclarationKind::Let => "var".to_string(),
            DeclarationKind::Private => "var<private>".to_string(),
            DeclarationKind::Workgroup => "var<workgroup>".to_string(),
            DeclarationKind::Uniform | DeclarationKind::Storage | DeclarationKind::Handle => {
                let space = match kind {
                    DeclarationKind::Uniform => "var<uniform>",
                    DeclarationKind::Storage => "var<storage, read_write>",
                    _ => "var",
                };
                format!(
                    "@group({}) @binding({}) {space}",
                    self.config.binding_group,
                    self.binding_index(node)
                )
            }
        };

        format!("{keyword} {}{}{initializer};", self.name(node), self.annotation(&ty))
    }

    /// Position of a resource variable among the resource variables of its
    /// parent, in declaration order.
    fn binding_index(&self, node: NodeId) -> usize {
        let Some(parent) = self.tree.parent(node) else {
            return 0;
        };
        self.tree
            .children(parent)
            .iter()
            .filter(|&&sibling| !self.tree.is_build_in(sibling))
            .filter(|&&sibling| {
                matches!(
                    self.tree.kind(sibling),
                    NodeKind::Declaration(DeclKind::Variable {
                        declaration: DeclarationKind::Uniform | DeclarationKind::Storage | DeclarationKind::Handle,
                        ..
                    })
                )
            })
            .position(|&sibling| sibling == node)
            .unwrap_or(0)
    }

    // Expressions

    fn expression(&self, kind: &ExprKind) -> String {
        match kind {
            ExprKind::Literal(value) => literal(*value),
            ExprKind::VariableName { name } => self.tree.name(*name).to_string(),
            ExprKind::FunctionCall { name, arguments } => {
                format!("{}({})", self.tree.name(*name), self.join(arguments, ", "))
            }
            ExprKind::Parenthesized { expression } => format!("({})", self.transpile(*expression)),
            ExprKind::Binary { operator, left, right } => {
                format!("{} {operator} {}", self.operand(*left), self.operand(*right))
            }
            ExprKind::Unary { operator, expression } => format!("{operator}{}", self.operand(*expression)),
            ExprKind::ValueDecomposition { value, property } => {
                format!("{}.{}", self.operand(*value), self.tree.name(*property))
            }
            ExprKind::IndexedValue { value, index } => {
                format!("{}[{}]", self.operand(*value), self.transpile(*index))
            }
            ExprKind::TypeConversion {
                type_declaration,
                expression,
            } => format!("{}({})", self.transpile(*type_declaration), self.transpile(*expression)),
        }
    }

    /// Operand text, parenthesized when it is itself an operation.
    fn operand(&self, node: NodeId) -> String {
        let text = self.transpile(node);
        match self.tree.kind(node) {
            NodeKind::Expression(ExprKind::Binary { .. } | ExprKind::Unary { .. }) => format!("({text})"),
            _ => text,
        }
    }

    // Statements

    fn statement(&self, kind: &StmtKind) -> String {
        trace!("transpile {}", kind.name());
        match kind {
            StmtKind::Block { statements } => {
                let body = self.join(statements, " ");
                if body.is_empty() {
                    "{ }".to_string()
                } else {
                    format!("{{ {body} }}")
                }
            }
            StmtKind::If {
                condition,
                block,
                else_branch,
            } => {
                let otherwise = else_branch
                    .map(|branch| format!(" else {}", self.transpile(branch)))
                    .unwrap_or_default();
                format!(
                    "if ({}) {}{otherwise}",
                    self.transpile(*condition),
                    self.transpile(*block)
                )
            }
            StmtKind::While { condition, block } => format!(
                "loop {{ if !({}) {{ break; }} {} }}",
                self.transpile(*condition),
                self.transpile(*block)
            ),
            StmtKind::DoWhile { condition, block } => format!(
                "loop {{ {} if !({}) {{ break; }} }}",
                self.transpile(*block),
                self.transpile(*condition)
            ),
            StmtKind::For {
                init,
                condition,
                update,
                block,
            } => format!(
                "for ({}; {}; {}) {}",
                self.clause(*init),
                condition.map(|condition| self.transpile(condition)).unwrap_or_default(),
                self.clause(*update),
                self.transpile(*block)
            ),
            StmtKind::Return { expression } => match expression {
                Some(expression) => format!("return {};", self.transpile(*expression)),
                None => "return;".to_string(),
            },
            StmtKind::Break => "break;".to_string(),
            StmtKind::Continue => "continue;".to_string(),
            StmtKind::Discard => "discard;".to_string(),
            StmtKind::Assignment { operator, left, right } => {
                format!("{} {operator} {};", self.transpile(*left), self.transpile(*right))
            }
            StmtKind::IncrementDecrement { operator, expression } => {
                format!("{}{operator};", self.transpile(*expression))
            }
            StmtKind::FunctionCall { call } => format!("{};", self.transpile(*call)),
        }
    }
}

fn literal(value: LiteralValue) -> String {
    match value {
        LiteralValue::Boolean(value) => value.to_string(),
        LiteralValue::Integer(value) => format!("{value}i"),
        LiteralValue::UnsignedInteger(value) => format!("{value}u"),
        LiteralValue::Float(value) => format!("{value:?}f"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgsl_syntax::TreeBuilder;
    use pgsl_syntax::ast::{BinaryOperator, UnaryOperator};
    use pgsl_typecheck::{TraceOptions, validate};

    /// Validates `document` and transpiles `node`.
    fn emit(tree: &SyntaxTree, document: NodeId, node: NodeId) -> String {
        let mut trace = ValidationTrace::default();
        validate(tree, document, &mut trace);
        assert!(!trace.has_errors(), "{:?}", trace.errors());
        Transpiler::new(tree, &trace).transpile(node)
    }

    /// Wraps `statements` into `function main() -> Void` and returns the
    /// document.
    fn in_main(b: &mut TreeBuilder, statements: Vec<NodeId>) -> NodeId {
        let block = b.block(statements).unwrap();
        let void = b.ty("Void", vec![]).unwrap();
        let main = b.function("main", false, vec![], void, block).unwrap();
        b.document(vec![main]).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal(LiteralValue::Boolean(false)), "false");
        assert_eq!(literal(LiteralValue::Integer(-3)), "-3i");
        assert_eq!(literal(LiteralValue::UnsignedInteger(3)), "3u");
        assert_eq!(literal(LiteralValue::Float(1.0)), "1.0f");
        assert_eq!(literal(LiteralValue::Float(0.25)), "0.25f");
    }

    #[test]
    fn test_while_and_do_while_lowering() {
        let mut b = TreeBuilder::new();
        let condition = b.boolean(true).unwrap();
        let stop = b.break_statement().unwrap();
        let body = b.block(vec![stop]).unwrap();
        let looped = b.while_loop(condition, body).unwrap();
        let condition = b.boolean(false).unwrap();
        let body = b.block(vec![]).unwrap();
        let repeated = b.do_while(condition, body).unwrap();
        let document = in_main(&mut b, vec![looped, repeated]);
        let tree = b.finish();

        let mut trace = ValidationTrace::default();
        validate(&tree, document, &mut trace);
        let transpiler = Transpiler::new(&tree, &trace);
        assert_eq!(
            transpiler.transpile(looped),
            "loop { if !(true) { break; } { break; } }"
        );
        assert_eq!(transpiler.transpile(repeated), "loop { { } if !(false) { break; } }");
    }

    #[test]
    fn test_if_else_and_jumps() {
        let mut b = TreeBuilder::new();
        let condition = b.boolean(true).unwrap();
        let discard = b.discard().unwrap();
        let then = b.block(vec![discard]).unwrap();
        let ret = b.return_statement(None).unwrap();
        let otherwise = b.block(vec![ret]).unwrap();
        let branch = b.if_statement(condition, then, Some(otherwise)).unwrap();
        let document = in_main(&mut b, vec![branch]);
        let tree = b.finish();

        assert_eq!(
            emit(&tree, document, branch),
            "if (true) { discard; } else { return; }"
        );
    }

    #[test]
    fn test_for_loop_and_updates() {
        let mut b = TreeBuilder::new();
        let zero = b.integer(0).unwrap();
        let init = b.declare(DeclarationKind::Let, "i", None, Some(zero)).unwrap();
        let counter = b.variable("i").unwrap();
        let limit = b.integer(4).unwrap();
        let condition = b.binary(BinaryOperator::Less, counter, limit).unwrap();
        let counter = b.variable("i").unwrap();
        let update = b.increment("++", counter).unwrap();
        let target = b.variable("i").unwrap();
        let two = b.integer(2).unwrap();
        let assign = b.assign("*=", target, two).unwrap();
        let body = b.block(vec![assign]).unwrap();
        let looped = b.for_loop(Some(init), Some(condition), Some(update), body).unwrap();
        let document = in_main(&mut b, vec![looped]);
        let tree = b.finish();

        assert_eq!(
            emit(&tree, document, looped),
            "for (var i: i32 = 0i; i < 4i; i++) { i *= 2i; }"
        );
    }

    #[test]
    fn test_nested_operations_are_parenthesized() {
        let mut b = TreeBuilder::new();
        let one = b.integer(1).unwrap();
        let two = b.integer(2).unwrap();
        let sum = b.binary(BinaryOperator::Add, one, two).unwrap();
        let three = b.integer(3).unwrap();
        let product = b.binary(BinaryOperator::Multiply, sum, three).unwrap();
        let negated = b.unary(UnaryOperator::Minus, product).unwrap();
        let value = b.declare(DeclarationKind::Let, "value", None, Some(negated)).unwrap();
        let document = in_main(&mut b, vec![value]);
        let tree = b.finish();

        assert_eq!(emit(&tree, document, negated), "-((1i + 2i) * 3i)");
    }

    #[test]
    fn test_function_and_struct_declarations() {
        let mut b = TreeBuilder::new();
        let float = b.ty("Float", vec![]).unwrap();
        let vec3 = b.ty("Vector3", vec![float]).unwrap();
        let color = b.struct_property("color", vec3).unwrap();
        let float = b.ty("Float", vec![]).unwrap();
        let intensity = b.struct_property("intensity", float).unwrap();
        let light = b.structure("Light", vec![color, intensity]).unwrap();

        let ty = b.ty("Light", vec![]).unwrap();
        let parameter = b.parameter("light", ty).unwrap();
        let value = b.variable("light").unwrap();
        let access = b.decompose(value, "intensity").unwrap();
        let ret = b.return_statement(Some(access)).unwrap();
        let block = b.block(vec![ret]).unwrap();
        let returns = b.ty("Float", vec![]).unwrap();
        let function = b.function("brightness", false, vec![parameter], returns, block).unwrap();
        let document = b.document(vec![light, function]).unwrap();
        let tree = b.finish();

        let mut trace = ValidationTrace::default();
        validate(&tree, document, &mut trace);
        assert!(!trace.has_errors(), "{:?}", trace.errors());
        let transpiler = Transpiler::new(&tree, &trace);
        assert_eq!(
            transpiler.transpile(light),
            "struct Light { color: vec3<f32>, intensity: f32, }"
        );
        assert_eq!(
            transpiler.transpile(function),
            "fn brightness(light: Light) -> f32 { return light.intensity; }"
        );
    }

    #[test]
    fn test_resource_bindings() {
        let mut b = TreeBuilder::new();
        let float = b.ty("Float", vec![]).unwrap();
        let time = b.declare(DeclarationKind::Uniform, "time", Some(float), None).unwrap();
        let float = b.ty("Float", vec![]).unwrap();
        let scratch = b.declare(DeclarationKind::Private, "scratch", Some(float), None).unwrap();
        let float = b.ty("Float", vec![]).unwrap();
        let runtime = b.ty("Array", vec![float]).unwrap();
        let values = b.declare(DeclarationKind::Storage, "values", Some(runtime), None).unwrap();
        let document = b.document(vec![time, scratch, values]).unwrap();
        let tree = b.finish();

        let mut trace = ValidationTrace::default();
        validate(&tree, document, &mut trace);
        assert!(!trace.has_errors(), "{:?}", trace.errors());
        let config = TranspileConfig { binding_group: 1 };
        let transpiler = Transpiler::new(&tree, &trace).with_config(config);
        assert_eq!(
            transpiler.transpile(document),
            "@group(1) @binding(0) var<uniform> time: f32;\n\
             var<private> scratch: f32;\n\
             @group(1) @binding(1) var<storage, read_write> values: array<f32>;"
        );
    }

    #[test]
    fn test_build_in_nodes_emit_nothing() {
        let mut b = TreeBuilder::new();
        let intrinsic = b
            .build_in(|b| {
                let float = b.ty("Float", vec![])?;
                let x = b.parameter("x", float)?;
                let value = b.variable("x")?;
                let ret = b.return_statement(Some(value))?;
                let block = b.block(vec![ret])?;
                let returns = b.ty("Float", vec![])?;
                b.function("sqrt", true, vec![x], returns, block)
            })
            .unwrap();
        let argument = b.float(4.0).unwrap();
        let call = b.call("sqrt", vec![argument]).unwrap();
        let root = b.declare(DeclarationKind::Let, "root", None, Some(call)).unwrap();
        let block = b.block(vec![root]).unwrap();
        let void = b.ty("Void", vec![]).unwrap();
        let main = b.function("main", false, vec![], void, block).unwrap();
        let document = b.document(vec![intrinsic, main]).unwrap();
        let tree = b.finish();

        let mut trace = ValidationTrace::default();
        validate(&tree, document, &mut trace);
        assert!(!trace.has_errors(), "{:?}", trace.errors());
        let transpiler = Transpiler::new(&tree, &trace);

        for _ in 0..2 {
            assert_eq!(transpiler.transpile(intrinsic), "");
            assert!(tree.children(intrinsic).iter().all(|&child| transpiler.transpile(child).is_empty()));
        }
        assert_eq!(
            transpiler.transpile(document),
            "fn main() { var root: f32 = sqrt(4.0f); }"
        );
    }

    #[test]
    fn test_f16_enable_directive() {
        let mut b = TreeBuilder::new();
        let half = b.ty("Float16", vec![]).unwrap();
        let value = b.declare(DeclarationKind::Private, "half", Some(half), None).unwrap();
        let document = b.document(vec![value]).unwrap();
        let tree = b.finish();

        let options = TraceOptions {
            enable_f16: true,
            ..TraceOptions::default()
        };
        let mut trace = ValidationTrace::new(options);
        validate(&tree, document, &mut trace);
        assert!(!trace.has_errors(), "{:?}", trace.errors());
        assert_eq!(
            Transpiler::new(&tree, &trace).transpile(document),
            "enable f16;\nvar<private> half: f16;"
        );
    }
}
