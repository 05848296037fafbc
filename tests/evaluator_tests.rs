// tests/evaluator_tests.rs
//
// End-to-end expression evaluation through the engine facade and the
// blocking driver.

use saffron_lang::{Context, Engine, Error, EvalError, Value};
use std::collections::HashMap;

fn obj(pairs: Vec<(&str, Value)>) -> Value {
    let mut map = HashMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v);
    }
    Value::Object(map)
}

fn ctx_with(pairs: Vec<(&str, Value)>) -> Context {
    Context::new(obj(pairs))
}

fn eval(expr: &str, ctx: &Context) -> Result<Value, Error> {
    Engine::new().eval_expression(expr, Some(ctx))
}

fn eval_ok(expr: &str, ctx: &Context) -> Value {
    eval(expr, ctx).unwrap_or_else(|e| panic!("eval of {:?} failed: {}", expr, e))
}

// ============================================================================
// Literal Passthrough
// ============================================================================

#[test]
fn test_single_literal_is_returned_unmodified() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("42", &ctx), Value::Integer(42));
    assert_eq!(eval_ok("2.4", &ctx), Value::Float(2.4));
    assert_eq!(eval_ok("\"hi\"", &ctx), Value::String("hi".to_string()));
    assert_eq!(eval_ok("true", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("nil", &ctx), Value::Missing);
}

#[test]
fn test_single_path_is_returned_unmodified() {
    // no boolean cast on single-slot chains
    let ctx = ctx_with(vec![("n", Value::Integer(0))]);
    assert_eq!(eval_ok("n", &ctx), Value::Integer(0));
}

#[test]
fn test_multi_slot_chain_casts_to_boolean() {
    let ctx = ctx_with(vec![("n", Value::Integer(7))]);
    assert_eq!(eval_ok("n and n", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("n or n", &ctx), Value::Boolean(true));
}

// ============================================================================
// Logical Folding (right-to-left, value precedence)
// ============================================================================

#[test]
fn test_fold_is_right_to_left_not_standard_precedence() {
    let ctx = ctx_with(vec![]);
    assert_eq!(
        eval_ok("true and false and false or true", &ctx),
        Value::Boolean(false)
    );
    assert_eq!(
        eval_ok("true or false and false", &ctx),
        Value::Boolean(true)
    );
}

#[test]
fn test_fold_basics() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("true and true", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("true and false", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("false or true", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("false or false", &ctx), Value::Boolean(false));
}

// ============================================================================
// Truthiness
// ============================================================================

#[test]
fn test_empty_string_is_truthy() {
    let ctx = ctx_with(vec![("empty", Value::String(String::new()))]);
    // empty is truthy, so `and` takes the right side: "" != "" is false
    assert_eq!(
        eval_ok("empty and empty != \"\"", &ctx),
        Value::Boolean(false)
    );
}

#[test]
fn test_zero_and_empty_array_are_truthy() {
    let ctx = ctx_with(vec![
        ("zero", Value::Integer(0)),
        ("items", Value::Array(vec![])),
    ]);
    assert_eq!(eval_ok("zero and true", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("items and true", &ctx), Value::Boolean(true));
}

#[test]
fn test_missing_and_false_are_falsy() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("ghost or true", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("ghost and true", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("false or false", &ctx), Value::Boolean(false));
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_numeric_comparisons() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("1==2", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("1<2", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("2<=2", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("3 > 2", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("2 >= 3", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("1 != 2", &ctx), Value::Boolean(true));
}

#[test]
fn test_comparisons_are_whitespace_insensitive() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("1   <   2", &ctx), Value::Boolean(true));
}

#[test]
fn test_numeric_equality_across_representations() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("1 == 1.0", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("2.5 > 2", &ctx), Value::Boolean(true));
}

#[test]
fn test_string_comparison_is_lexicographic() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("\"abc\" < \"abd\"", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("\"b\" > \"a\"", &ctx), Value::Boolean(true));
}

#[test]
fn test_cross_type_equality_is_false_not_an_error() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("1 == \"1\"", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("true == 1", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("1 != \"1\"", &ctx), Value::Boolean(true));
}

#[test]
fn test_missing_equals_only_missing() {
    let ctx = ctx_with(vec![("empty", Value::String(String::new()))]);
    assert_eq!(eval_ok("ghost == nil", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("ghost == false", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("ghost == empty", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("ghost == other_ghost", &ctx), Value::Boolean(true));
}

#[test]
fn test_non_coercible_ordering_is_an_error() {
    let ctx = ctx_with(vec![]);
    assert!(matches!(
        eval("true < 1", &ctx),
        Err(Error::Eval(EvalError::TypeError(_)))
    ));
    assert!(matches!(
        eval("\"a\" < 1", &ctx),
        Err(Error::Eval(EvalError::TypeError(_)))
    ));
}

// ============================================================================
// Contains
// ============================================================================

#[test]
fn test_string_contains_is_case_sensitive() {
    let ctx = ctx_with(vec![("x", Value::String("XXX".to_string()))]);
    assert_eq!(eval_ok("x contains \"x\"", &ctx), Value::Boolean(false));
    assert_eq!(eval_ok("x contains \"X\"", &ctx), Value::Boolean(true));
}

#[test]
fn test_contains_never_errors() {
    let ctx = ctx_with(vec![]);
    // non-string, non-sequence left operand
    assert_eq!(eval_ok("1 contains \"x\"", &ctx), Value::Boolean(false));
    // undefined variable on the left
    assert_eq!(eval_ok("y contains \"x\"", &ctx), Value::Boolean(false));
    // missing on the right
    assert_eq!(eval_ok("\"abc\" contains y", &ctx), Value::Boolean(false));
}

#[test]
fn test_array_contains_is_membership() {
    let ctx = ctx_with(vec![(
        "tags",
        Value::Array(vec![
            Value::String("a".to_string()),
            Value::String("b".to_string()),
        ]),
    )]);
    assert_eq!(eval_ok("tags contains \"a\"", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("tags contains \"c\"", &ctx), Value::Boolean(false));
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_range_materializes_inclusive_ascending() {
    let ctx = ctx_with(vec![]);
    assert_eq!(
        eval_ok("(2..4)", &ctx),
        Value::Array(vec![
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(4)
        ])
    );
}

#[test]
fn test_range_with_variable_bounds() {
    let ctx = ctx_with(vec![("two", Value::Integer(2))]);
    assert_eq!(
        eval_ok("(two..4)", &ctx),
        Value::Array(vec![
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(4)
        ])
    );
}

#[test]
fn test_range_membership() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("(1..5) contains 3", &ctx), Value::Boolean(true));
    assert_eq!(eval_ok("(1..5) contains 6", &ctx), Value::Boolean(false));
}

#[test]
fn test_descending_range_is_empty() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("(3..1)", &ctx), Value::Array(vec![]));
}

#[test]
fn test_malformed_range_bound_is_an_error() {
    let ctx = ctx_with(vec![]);
    assert!(matches!(
        eval("(\"a\"..2)", &ctx),
        Err(Error::Eval(EvalError::TypeError(_)))
    ));
    assert!(matches!(
        eval("(ghost..2)", &ctx),
        Err(Error::Eval(EvalError::TypeError(_)))
    ));
}

// ============================================================================
// Property Access
// ============================================================================

fn shop_ctx() -> Context {
    ctx_with(vec![
        ("coo", Value::String("moo".to_string())),
        (
            "doo",
            obj(vec![(
                "moo",
                obj(vec![("foo", Value::String("bar".to_string()))]),
            )]),
        ),
        (
            "items",
            Value::Array(vec![
                Value::String("first".to_string()),
                Value::String("second".to_string()),
            ]),
        ),
    ])
}

#[test]
fn test_dot_access() {
    let ctx = shop_ctx();
    assert_eq!(
        eval_ok("doo.moo.foo", &ctx),
        Value::String("bar".to_string())
    );
}

#[test]
fn test_bracket_access_with_literal_key() {
    let ctx = shop_ctx();
    assert_eq!(
        eval_ok("doo[\"moo\"].foo", &ctx),
        Value::String("bar".to_string())
    );
}

#[test]
fn test_bracket_access_with_variable_key() {
    let ctx = shop_ctx();
    assert_eq!(
        eval_ok("doo[coo].foo", &ctx),
        Value::String("bar".to_string())
    );
}

#[test]
fn test_mixed_chain_matches_direct_path() {
    let ctx = shop_ctx();
    assert_eq!(eval_ok("doo[coo].foo", &ctx), eval_ok("doo.moo.foo", &ctx));
}

#[test]
fn test_array_index_access() {
    let ctx = shop_ctx();
    assert_eq!(
        eval_ok("items[0]", &ctx),
        Value::String("first".to_string())
    );
    assert_eq!(
        eval_ok("items[-1]", &ctx),
        Value::String("second".to_string())
    );
    assert_eq!(eval_ok("items[9]", &ctx), Value::Missing);
    // a from-the-end offset past i64 negation range is just out of bounds
    assert_eq!(
        eval_ok("items[-9223372036854775808]", &ctx),
        Value::Missing
    );
}

#[test]
fn test_size_first_last() {
    let ctx = shop_ctx();
    assert_eq!(eval_ok("items.size", &ctx), Value::Integer(2));
    assert_eq!(
        eval_ok("items.first", &ctx),
        Value::String("first".to_string())
    );
    assert_eq!(
        eval_ok("items.last", &ctx),
        Value::String("second".to_string())
    );
    assert_eq!(eval_ok("coo.size", &ctx), Value::Integer(3));
}

#[test]
fn test_lookup_on_non_container_is_missing() {
    let ctx = shop_ctx();
    assert_eq!(eval_ok("coo.foo.bar", &ctx), Value::Missing);
}

#[test]
fn test_bracket_key_equal_to_closing_bracket() {
    let ctx = ctx_with(vec![(
        "obj",
        obj(vec![("]", Value::String("bracket".to_string()))]),
    )]);
    assert_eq!(
        eval_ok("obj[\"]\"]", &ctx),
        Value::String("bracket".to_string())
    );
    assert_eq!(
        eval_ok("obj[\"]\"] == \"bracket\"", &ctx),
        Value::Boolean(true)
    );
}

#[test]
fn test_escaped_quote_evaluates_to_quote_character() {
    let ctx = ctx_with(vec![]);
    assert_eq!(
        eval_ok(r#""\"""#, &ctx),
        Value::String("\"".to_string())
    );
}

// ============================================================================
// Strict Mode
// ============================================================================

#[test]
fn test_strict_context_fails_on_missing() {
    let ctx = ctx_with(vec![]).strict(true);
    assert!(matches!(
        eval("ghost", &ctx),
        Err(Error::Eval(EvalError::UndefinedVariable(_)))
    ));
}

#[test]
fn test_lenient_context_yields_missing() {
    let ctx = ctx_with(vec![]);
    assert_eq!(eval_ok("ghost", &ctx), Value::Missing);
}

#[test]
fn test_discarded_slots_are_still_evaluated() {
    // the fold discards the right side of `true or ...`, but every slot
    // evaluates regardless; a strict lookup failure must surface
    let ctx = ctx_with(vec![]).strict(true);
    assert!(matches!(
        eval("true or ghost", &ctx),
        Err(Error::Eval(EvalError::UndefinedVariable(_)))
    ));
    assert!(matches!(
        eval("false and ghost", &ctx),
        Err(Error::Eval(EvalError::UndefinedVariable(_)))
    ));
}

// ============================================================================
// Context Presence
// ============================================================================

#[test]
fn test_absent_context_fails_before_parsing() {
    let engine = Engine::new();
    // the expression is garbage on purpose: the context check must come
    // before any token is examined
    let result = engine.eval_expression("%% not even an expression %%", None);
    match result {
        Err(Error::Eval(e)) => {
            assert_eq!(e, EvalError::ContextNotDefined);
            assert!(e.to_string().contains("context not defined"));
        }
        other => panic!("expected ContextNotDefined, got {:?}", other),
    }
}
