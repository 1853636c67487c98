// Evaluation semantics
//
// Missing fields, type mismatches, equality and ordering rules, error
// reporting. Each section documents the rule it checks.

use serde_json::{Value as Json, json};
use sift_lang::{FilterError, compile_filter};

fn eval(expr_str: &str, doc: Json) -> bool {
    compile_filter(expr_str)
        .unwrap_or_else(|e| panic!("{expr_str}: {e}"))
        .matches(&doc)
}

// ============================================================================
// Section: Missing fields
// ============================================================================

#[test]
fn missing_field_comparison_is_false() {
    assert!(!eval("x==1", json!({})));
    assert!(!eval("x!=1", json!({})));
    assert!(!eval("x<1", json!({})));
}

#[test]
fn missing_field_negated_is_true() {
    assert!(eval("~(x==1)", json!({})));
    assert!(eval("~x!=1", json!({})));
}

#[test]
fn missing_field_membership_is_false() {
    assert!(!eval("x in [1, 2]", json!({})));
    assert!(eval("~x in [1, 2]", json!({})));
}

#[test]
fn path_through_scalar_is_absent() {
    assert!(!eval("a.b == 1", json!({"a": 5})));
    assert!(!eval("a.b != 1", json!({"a": 5})));
    assert!(!eval("a.b.c == 1", json!({"a": {"b": [1]}})));
}

#[test]
fn path_through_list_is_absent() {
    assert!(!eval("a.0 == 1", json!({"a": [1, 2]})));
}

#[test]
fn numeric_keys_address_mappings() {
    assert!(eval("a.0 == 1", json!({"a": {"0": 1}})));
}

// ============================================================================
// Section: Type mismatches are false, never errors
// ============================================================================

#[test]
fn string_ordered_against_number_is_false() {
    assert!(!eval("n<5", json!({"n": "abc"})));
    assert!(!eval("n>5", json!({"n": "abc"})));
    assert!(!eval("n>=5", json!({"n": "abc"})));
}

#[test]
fn number_ordered_against_string_is_false() {
    assert!(!eval("n < 'z'", json!({"n": 1})));
}

#[test]
fn booleans_have_no_ordering() {
    assert!(!eval("b < true", json!({"b": false})));
    assert!(!eval("b >= false", json!({"b": false})));
}

#[test]
fn containers_and_null_have_no_ordering() {
    assert!(!eval("v > 0", json!({"v": [1]})));
    assert!(!eval("v > 0", json!({"v": {"w": 1}})));
    assert!(!eval("v > 0", json!({"v": null})));
}

#[test]
fn cross_kind_equality_is_unequal() {
    assert!(!eval("n == 1", json!({"n": "1"})));
    assert!(eval("n != 1", json!({"n": "1"})));
    assert!(!eval("n == 1", json!({"n": true})));
    assert!(!eval("n == true", json!({"n": 1})));
    assert!(eval("n != 'x'", json!({"n": null})));
    assert!(eval("n != 1", json!({"n": [1]})));
}

// ============================================================================
// Section: Equality
// ============================================================================

#[test]
fn integer_and_float_are_one_numeric_kind() {
    assert!(eval("n == 1.0", json!({"n": 1})));
    assert!(eval("n == 1", json!({"n": 1.0})));
    assert!(!eval("n != 1", json!({"n": 1.0})));
}

#[test]
fn mixed_numeric_comparison_is_exact() {
    // 2^53 + 1 is not representable as f64.
    assert!(!eval("n == 9007199254740992.0", json!({"n": 9007199254740993_i64})));
    assert!(eval("n > 9007199254740992.0", json!({"n": 9007199254740993_i64})));
}

#[test]
fn tiny_floats_are_not_zero() {
    let doc = json!({"a": 0});
    assert!(!eval("a == 0.0000000000000000000000000000001", doc.clone()));
    assert!(eval("a < 0.0000000000000000000000000000001", doc.clone()));
    assert!(eval("a > -0.0000000000000000000000000000001", doc.clone()));
    assert!(eval("a != 0.0000000000000000000000000000001", doc));
}

#[test]
fn strings_compare_exactly() {
    assert!(eval("s == 'Adam'", json!({"s": "Adam"})));
    assert!(!eval("s == 'adam'", json!({"s": "Adam"})));
}

#[test]
fn boolean_literals_match_json_booleans() {
    assert!(eval("flag == TRUE", json!({"flag": true})));
    assert!(eval("flag != true", json!({"flag": false})));
}

// ============================================================================
// Section: Ordering
// ============================================================================

#[test]
fn numeric_ordering() {
    let doc = json!({"n": 3});
    assert!(eval("n < 4", doc.clone()));
    assert!(eval("n <= 3", doc.clone()));
    assert!(eval("n >= 3", doc.clone()));
    assert!(eval("n > 2.5", doc.clone()));
    assert!(!eval("n > 3", doc.clone()));
    assert!(eval("n > -1", doc));
}

#[test]
fn string_ordering_is_lexicographic() {
    assert!(eval("s < 'b'", json!({"s": "abc"})));
    assert!(eval("s >= 'B'", json!({"s": "a"})));
}

// ============================================================================
// Section: Membership
// ============================================================================

#[test]
fn membership_of_strings() {
    assert!(eval("tag in ['a','b','c']", json!({"tag": "b"})));
}

#[test]
fn membership_has_no_type_coercion() {
    assert!(!eval("tag in [1,2,3]", json!({"tag": "b"})));
    assert!(!eval("n in ['1', '2']", json!({"n": 1})));
}

#[test]
fn membership_uses_numeric_equality() {
    assert!(eval("n in [1.0, 2.0]", json!({"n": 2})));
}

#[test]
fn membership_in_empty_list_is_false() {
    assert!(!eval("n in []", json!({"n": 1})));
}

#[test]
fn list_field_is_not_member() {
    assert!(!eval("n in [1]", json!({"n": [1]})));
}

// ============================================================================
// Section: Logical combinators
// ============================================================================

#[test]
fn logical_truth_table() {
    let doc = json!({"t": 1, "f": 0});
    assert!(eval("t==1 & t==1", doc.clone()));
    assert!(!eval("t==1 & f==1", doc.clone()));
    assert!(eval("t==1 | f==1", doc.clone()));
    assert!(!eval("f==1 | f==1", doc.clone()));
    assert!(eval("~f==1", doc));
}

#[test]
fn not_scope_follows_precedence() {
    // (~(a==1)) & (b==2), not ~((a==1) & (b==2))
    let doc = json!({"a": 1, "b": 3});
    assert!(!eval("~a==1 & b==2", doc.clone()));
    assert!(eval("~(a==1 & b==2)", doc));
}

// ============================================================================
// Section: Errors
// ============================================================================

#[test]
fn lex_error_reports_character() {
    match compile_filter("a@1") {
        Err(FilterError::Lex(e)) => {
            assert_eq!(e.character, '@');
            assert_eq!(e.position, 1);
        }
        other => panic!("Expected lex error, got {:?}", other.map(|p| p.to_string())),
    }
}

#[test]
fn parse_error_for_double_operator() {
    assert!(matches!(compile_filter("a== =="), Err(FilterError::Parse(_))));
}

#[test]
fn error_messages_are_readable() {
    let lex = compile_filter("a@1").unwrap_err().to_string();
    assert!(lex.contains("'@'") && lex.contains("position 1"), "{lex}");

    let parse = compile_filter("(a==1").unwrap_err().to_string();
    assert!(parse.starts_with("Parse error at position 5"), "{parse}");
}
