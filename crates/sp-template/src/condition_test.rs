use super::*;

fn params(pairs: &[(&str, Value)]) -> ParameterSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_bare_name_truthiness() {
    let p = params(&[
        ("vip", Value::Bool(true)),
        ("blank", Value::from("  ")),
        ("zero", Value::Integer(0)),
        ("name", Value::from("bob")),
    ]);
    assert!(evaluate("vip", &p));
    assert!(evaluate("  name  ", &p));
    assert!(!evaluate("blank", &p));
    assert!(!evaluate("zero", &p));
    assert!(!evaluate("missing", &p));
}

#[test]
fn test_string_equality() {
    let active = params(&[("status", Value::from("active"))]);
    let closed = params(&[("status", Value::from("closed"))]);
    assert!(evaluate("status == 'active'", &active));
    assert!(!evaluate("status == 'active'", &closed));
    assert!(evaluate("status != 'active'", &closed));
    assert!(evaluate(r#"status == "active""#, &active));
}

#[test]
fn test_null_comparisons() {
    let empty = ParameterSet::new();
    assert!(evaluate("status == null", &empty));
    assert!(evaluate("status == NULL", &empty));
    assert!(!evaluate("status != null", &empty));

    let set = params(&[("status", Value::from("x"))]);
    assert!(!evaluate("status == null", &set));
    assert!(evaluate("status != null", &set));
}

#[test]
fn test_numeric_comparisons() {
    let p = params(&[("id", Value::Integer(3)), ("ratio", Value::Float(3.0))]);
    assert!(evaluate("id == 3", &p));
    assert!(evaluate("id == 3.0", &p));
    assert!(evaluate("ratio == 3", &p));
    assert!(evaluate("id != 4", &p));
    assert!(!evaluate("id == 3.5", &p));
}

#[test]
fn test_numeric_against_string_literal_uses_text_form() {
    let p = params(&[("id", Value::Integer(5)), ("code", Value::from("5"))]);
    assert!(evaluate("id == '5'", &p));
    assert!(evaluate("code == 5", &p));
}

#[test]
fn test_bool_only_equals_bool() {
    let p = params(&[("flag", Value::Bool(true)), ("text", Value::from("true"))]);
    assert!(evaluate("flag == true", &p));
    assert!(evaluate("flag == TRUE", &p));
    assert!(!evaluate("flag == 'true'", &p));
    assert!(!evaluate("text == true", &p));
}

#[test]
fn test_doubled_quotes_are_unescaped() {
    let p = params(&[("name", Value::from("O'Brien"))]);
    assert!(evaluate("name == 'O''Brien'", &p));
}

#[test]
fn test_unrecognized_predicates_are_false() {
    let p = params(&[("a", Value::Integer(5))]);
    assert!(!evaluate("a > 1", &p));
    assert!(!evaluate("a == nonsense", &p));
    assert!(!evaluate("a and b", &p));
    assert!(!evaluate("a == '", &p));
}

#[test]
fn test_eq_operator_checked_first() {
    let cmp = Comparison::parse("a != b == 1").unwrap();
    assert_eq!(cmp.op, Operator::Eq);
    assert_eq!(cmp.lhs, "a != b");
}

#[test]
fn test_parse_literal_priority() {
    assert_eq!(parse_literal("Null"), Some(Value::Null));
    assert_eq!(parse_literal("False"), Some(Value::Bool(false)));
    assert_eq!(parse_literal("'12'"), Some(Value::from("12")));
    assert_eq!(parse_literal("12"), Some(Value::Integer(12)));
    assert_eq!(parse_literal("-1.5"), Some(Value::Float(-1.5)));
    assert_eq!(parse_literal("abc"), None);
    assert_eq!(parse_literal("inf"), None);
}

#[test]
fn test_values_equal_matrix() {
    assert!(values_equal(&Value::Null, &Value::Null));
    assert!(!values_equal(&Value::Null, &Value::from("")));
    assert!(!values_equal(&Value::Integer(0), &Value::Bool(false)));
    assert!(values_equal(&Value::Float(2.5), &Value::from("2.5")));
    assert!(values_equal(&Value::Float(2.0), &Value::from("2")));
}
