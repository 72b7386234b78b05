// Statement validation tests
//
// Conditions, loops, returns, jumps, assignments and increments.

mod common;

use common::{function, identity, let_integer, main, typed, validate_document, validate_main};
use pgsl_syntax::ast::{BinaryOperator, DeclarationKind};
use pgsl_typecheck::ErrorKind;

fn non_boolean(kind: &ErrorKind) -> bool {
    matches!(kind, ErrorKind::NonBooleanCondition { .. })
}

#[test]
fn test_boolean_conditions_are_accepted() {
    let validated = validate_main(|b| {
        let condition = b.boolean(true)?;
        let then = b.block(vec![])?;
        let branch = b.if_statement(condition, then, None)?;

        let condition = b.boolean(false)?;
        let body = b.block(vec![])?;
        let looped = b.while_loop(condition, body)?;

        let one = b.integer(1)?;
        let two = b.integer(2)?;
        let condition = b.binary(BinaryOperator::Less, one, two)?;
        let body = b.block(vec![])?;
        let repeated = b.do_while(condition, body)?;

        Ok(vec![branch, looped, repeated])
    });

    validated.assert_clean();
}

#[test]
fn test_non_boolean_condition_reports_once_per_statement() {
    let validated = validate_main(|b| {
        let condition = b.integer(1)?;
        let then = b.block(vec![])?;
        let branch = b.if_statement(condition, then, None)?;

        let condition = b.float(1.0)?;
        let body = b.block(vec![])?;
        let looped = b.while_loop(condition, body)?;

        let condition = b.unsigned(3)?;
        let body = b.block(vec![])?;
        let repeated = b.do_while(condition, body)?;

        Ok(vec![branch, looped, repeated])
    });

    assert_eq!(validated.count(non_boolean), 3);
    assert_eq!(validated.trace.errors().len(), 3);
    assert_eq!(
        validated.trace.errors()[0].to_string(),
        "1:1: Expression must resolve into a boolean, found Integer."
    );
}

#[test]
fn test_else_branch_is_validated() {
    let validated = validate_main(|b| {
        let condition = b.boolean(true)?;
        let then = b.block(vec![])?;
        let inner = b.integer(0)?;
        let nested_block = b.block(vec![])?;
        let nested = b.if_statement(inner, nested_block, None)?;
        b.if_statement(condition, then, Some(nested)).map(|node| vec![node])
    });

    assert_eq!(validated.kinds().len(), 1);
    assert!(non_boolean(&validated.kinds()[0]));
}

#[test]
fn test_for_loop_with_let_init() {
    let validated = validate_main(|b| {
        let init = let_integer(b, "i", 0)?;
        let counter = b.variable("i")?;
        let limit = b.integer(10)?;
        let condition = b.binary(BinaryOperator::Less, counter, limit)?;
        let counter = b.variable("i")?;
        let update = b.increment("++", counter)?;
        let body = b.block(vec![])?;
        Ok(vec![b.for_loop(Some(init), Some(condition), Some(update), body)?])
    });

    validated.assert_clean();
}

#[test]
fn test_for_loop_with_const_init() {
    let validated = validate_main(|b| {
        let outer = let_integer(b, "j", 0)?;
        let zero = b.integer(0)?;
        let init = b.declare(DeclarationKind::Const, "i", None, Some(zero))?;
        let counter = b.variable("j")?;
        let limit = b.integer(10)?;
        let condition = b.binary(BinaryOperator::Less, counter, limit)?;
        let counter = b.variable("j")?;
        let update = b.increment("++", counter)?;
        let body = b.block(vec![])?;
        Ok(vec![outer, b.for_loop(Some(init), Some(condition), Some(update), body)?])
    });

    assert_eq!(validated.kinds(), vec![ErrorKind::ForInitNotLet]);
    assert_eq!(
        validated.trace.errors()[0].kind.to_string(),
        "For loop initializer must be a let declaration."
    );
}

#[test]
fn test_for_loop_without_clauses() {
    let validated = validate_main(|b| {
        let stop = b.break_statement()?;
        let body = b.block(vec![stop])?;
        Ok(vec![b.for_loop(None, None, None, body)?])
    });

    validated.assert_clean();
}

#[test]
fn test_for_loop_update_must_be_a_simple_statement() {
    let validated = validate_main(|b| {
        let init = let_integer(b, "i", 0)?;
        let update = b.block(vec![])?;
        let body = b.block(vec![])?;
        Ok(vec![b.for_loop(Some(init), None, Some(update), body)?])
    });

    assert_eq!(validated.kinds(), vec![ErrorKind::InvalidForUpdate]);
}

#[test]
fn test_for_loop_condition_and_binding_scope() {
    let validated = validate_main(|b| {
        let init = let_integer(b, "i", 0)?;
        let condition = b.variable("i")?;
        let body = b.block(vec![])?;
        let looped = b.for_loop(Some(init), Some(condition), None, body)?;

        // `i` is gone once the loop ends
        let counter = b.variable("i")?;
        let after = b.increment("++", counter)?;
        Ok(vec![looped, after])
    });

    let kinds = validated.kinds();
    assert_eq!(kinds.len(), 2);
    assert!(non_boolean(&kinds[0]));
    assert_eq!(kinds[1], ErrorKind::UndefinedName { name: "i".into() });
}

#[test]
fn test_return_rules() {
    let validated = validate_document(|b| {
        let one = b.integer(1)?;
        let ret = b.return_statement(Some(one))?;
        let mismatched = function(b, "value_in_void", "Void", vec![ret])?;

        let ret = b.return_statement(None)?;
        let empty = function(b, "empty_in_void", "Void", vec![ret])?;

        let one = b.integer(1)?;
        let ret = b.return_statement(Some(one))?;
        let matching = function(b, "integer", "Integer", vec![ret])?;

        Ok(vec![mismatched, empty, matching])
    });

    assert_eq!(
        validated.kinds(),
        vec![ErrorKind::ReturnTypeMismatch {
            expected: "Void".into(),
            found: "Integer".into()
        }]
    );
}

#[test]
fn test_bare_return_in_valued_function() {
    let validated = validate_document(|b| {
        let ret = b.return_statement(None)?;
        Ok(vec![function(b, "value", "Float", vec![ret])?])
    });

    assert_eq!(
        validated.kinds(),
        vec![ErrorKind::ReturnTypeMismatch {
            expected: "Float".into(),
            found: "Void".into()
        }]
    );
}

#[test]
fn test_return_outside_function() {
    let validated = validate_document(|b| {
        let one = b.integer(1)?;
        Ok(vec![b.return_statement(Some(one))?])
    });

    assert_eq!(validated.kinds(), vec![ErrorKind::ReturnOutsideFunction]);
    assert_eq!(
        validated.trace.errors()[0].kind.to_string(),
        "Return statement must be inside a function."
    );
}

#[test]
fn test_break_and_continue_need_a_loop() {
    let validated = validate_main(|b| {
        let stop = b.break_statement()?;
        let next = b.continue_statement()?;
        Ok(vec![stop, next])
    });

    assert_eq!(
        validated.kinds(),
        vec![ErrorKind::BreakOutsideLoop, ErrorKind::ContinueOutsideLoop]
    );
}

#[test]
fn test_jumps_inside_nested_blocks_of_a_loop() {
    let validated = validate_main(|b| {
        let stop = b.break_statement()?;
        let next = b.continue_statement()?;
        let condition = b.boolean(true)?;
        let inner = b.block(vec![stop])?;
        let branch = b.if_statement(condition, inner, None)?;
        let body = b.block(vec![branch, next])?;
        let condition = b.boolean(true)?;
        Ok(vec![b.while_loop(condition, body)?])
    });

    validated.assert_clean();
}

#[test]
fn test_discard_is_always_valid() {
    let validated = validate_main(|b| Ok(vec![b.discard()?]));
    validated.assert_clean();
}

#[test]
fn test_assignment_to_let_binding() {
    let validated = validate_main(|b| {
        let declared = let_integer(b, "count", 0)?;
        let target = b.variable("count")?;
        let value = b.integer(4)?;
        let assign = b.assign("=", target, value)?;
        let target = b.variable("count")?;
        let value = b.integer(2)?;
        let compound = b.assign("*=", target, value)?;
        Ok(vec![declared, assign, compound])
    });

    validated.assert_clean();
}

#[test]
fn test_assignment_to_constant_binding() {
    let validated = validate_main(|b| {
        let zero = b.integer(0)?;
        let declared = b.declare(DeclarationKind::Const, "limit", None, Some(zero))?;
        let target = b.variable("limit")?;
        let value = b.integer(4)?;
        Ok(vec![declared, b.assign("=", target, value)?])
    });

    assert_eq!(validated.kinds(), vec![ErrorKind::AssignmentToConstant]);
}

#[test]
fn test_assignment_to_call_result() {
    for constant in [false, true] {
        let validated = validate_document(|b| {
            let callee = identity(b, "pick", constant)?;
            let argument = b.integer(1)?;
            let target = b.call("pick", vec![argument])?;
            let value = b.integer(4)?;
            let assign = b.assign("=", target, value)?;
            Ok(vec![callee, main(b, vec![assign])?])
        });

        assert_eq!(validated.kinds(), vec![ErrorKind::NotStorage], "constant callee: {constant}");
    }
}

#[test]
fn test_void_call_as_condition() {
    let validated = validate_document(|b| {
        let nothing = function(b, "nothing", "Void", vec![])?;

        let condition = b.call("nothing", vec![])?;
        let then = b.block(vec![])?;
        let branch = b.if_statement(condition, then, None)?;

        let condition = b.call("nothing", vec![])?;
        let body = b.block(vec![])?;
        let looped = b.while_loop(condition, body)?;

        Ok(vec![nothing, main(b, vec![branch, looped])?])
    });

    let void = ErrorKind::NonBooleanCondition { found: "Void".into() };
    assert_eq!(validated.kinds(), vec![void.clone(), void]);
}

#[test]
fn test_void_call_in_assignments() {
    let validated = validate_document(|b| {
        let nothing = function(b, "nothing", "Void", vec![])?;
        let one = b.float(1.0)?;
        let declared = typed(b, DeclarationKind::Let, "a", "Float", Some(one))?;

        let target = b.variable("a")?;
        let value = b.call("nothing", vec![])?;
        let from_void = b.assign("=", target, value)?;

        let target = b.call("nothing", vec![])?;
        let four = b.integer(4)?;
        let into_void = b.assign("=", target, four)?;

        let target = b.call("nothing", vec![])?;
        let bumped = b.increment("++", target)?;

        Ok(vec![nothing, main(b, vec![declared, from_void, into_void, bumped])?])
    });

    assert_eq!(
        validated.kinds(),
        vec![
            ErrorKind::TypeMismatch {
                expected: "Float".into(),
                found: "Void".into()
            },
            ErrorKind::NotStorage,
            ErrorKind::NotStorage,
        ]
    );
}

#[test]
fn test_unresolved_values_report_once() {
    let validated = validate_document(|b| {
        let condition = b.variable("missing")?;
        let then = b.block(vec![])?;
        let branch = b.if_statement(condition, then, None)?;

        let one = b.float(1.0)?;
        let declared = typed(b, DeclarationKind::Let, "a", "Float", Some(one))?;
        let target = b.variable("a")?;
        let value = b.variable("missing")?;
        let assign = b.assign("=", target, value)?;

        let target = b.variable("missing")?;
        let bumped = b.increment("++", target)?;

        let value = b.variable("missing")?;
        let ret = b.return_statement(Some(value))?;
        let valued = function(b, "valued", "Float", vec![ret])?;

        Ok(vec![main(b, vec![branch, declared, assign, bumped])?, valued])
    });

    let missing = ErrorKind::UndefinedName { name: "missing".into() };
    assert_eq!(validated.kinds(), vec![missing.clone(), missing.clone(), missing.clone(), missing]);
}

#[test]
fn test_assignment_to_parameter() {
    let validated = validate_document(|b| {
        let ty = b.ty("Integer", vec![])?;
        let parameter = b.parameter("value", ty)?;
        let target = b.variable("value")?;
        let one = b.integer(1)?;
        let assign = b.assign("=", target, one)?;
        let block = b.block(vec![assign])?;
        let returns = b.ty("Void", vec![])?;
        Ok(vec![b.function("update", false, vec![parameter], returns, block)?])
    });

    assert_eq!(validated.kinds(), vec![ErrorKind::NotStorage]);
}

#[test]
fn test_assignment_type_mismatch() {
    let validated = validate_main(|b| {
        let declared = let_integer(b, "count", 0)?;
        let target = b.variable("count")?;
        let value = b.float(1.5)?;
        let assign = b.assign("=", target, value)?;
        let target = b.variable("count")?;
        let value = b.float(1.5)?;
        let compound = b.assign("+=", target, value)?;
        Ok(vec![declared, assign, compound])
    });

    let mismatch = ErrorKind::TypeMismatch {
        expected: "Integer".into(),
        found: "Float".into(),
    };
    assert_eq!(validated.kinds(), vec![mismatch.clone(), mismatch]);
}

#[test]
fn test_unknown_assignment_operator() {
    let validated = validate_main(|b| {
        let declared = let_integer(b, "count", 0)?;
        let target = b.variable("count")?;
        let value = b.integer(1)?;
        Ok(vec![declared, b.assign("=>", target, value)?])
    });

    assert_eq!(
        validated.kinds(),
        vec![ErrorKind::UnknownAssignmentOperator { operator: "=>".into() }]
    );
}

#[test]
fn test_increment_rules() {
    let validated = validate_main(|b| {
        let count = let_integer(b, "count", 0)?;
        let ratio = typed(b, DeclarationKind::Let, "ratio", "Float", None)?;

        let target = b.variable("count")?;
        let valid = b.increment("--", target)?;
        let target = b.variable("ratio")?;
        let float = b.increment("++", target)?;
        let target = b.variable("count")?;
        let unknown = b.increment("**", target)?;
        Ok(vec![count, ratio, valid, float, unknown])
    });

    assert_eq!(
        validated.kinds(),
        vec![
            ErrorKind::InvalidIncrementTarget { found: "Float".into() },
            ErrorKind::UnknownIncrementOperator { operator: "**".into() },
        ]
    );
}

#[test]
fn test_call_statement_delegates_to_expression() {
    let validated = validate_document(|b| {
        let helper = function(b, "helper", "Void", vec![])?;
        let known = b.call("helper", vec![])?;
        let known = b.call_statement(known)?;
        let unknown = b.call("missing", vec![])?;
        let unknown = b.call_statement(unknown)?;
        Ok(vec![helper, main(b, vec![known, unknown])?])
    });

    assert_eq!(
        validated.kinds(),
        vec![ErrorKind::UndefinedName { name: "missing".into() }]
    );
}

#[test]
fn test_errors_are_collected_in_one_pass() {
    let validated = validate_main(|b| {
        let condition = b.integer(1)?;
        let then = b.block(vec![])?;
        let branch = b.if_statement(condition, then, None)?;
        let next = b.continue_statement()?;
        let value = b.variable("nowhere")?;
        let ret = b.return_statement(Some(value))?;
        Ok(vec![branch, next, ret])
    });

    let kinds = validated.kinds();
    assert_eq!(kinds.len(), 3);
    assert!(non_boolean(&kinds[0]));
    assert_eq!(kinds[1], ErrorKind::ContinueOutsideLoop);
    assert_eq!(kinds[2], ErrorKind::UndefinedName { name: "nowhere".into() });
}
