use super::*;
use serde_json::json;

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(!Value::Integer(0).is_truthy());
    assert!(Value::Integer(-3).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(Value::Float(0.5).is_truthy());
    assert!(!Value::from("   ").is_truthy());
    assert!(Value::from(" a ").is_truthy());
}

#[test]
fn test_integral_float_has_no_decimal_point() {
    assert_eq!(Value::Float(3.0).to_text(), "3");
    assert_eq!(Value::Float(-0.0).to_text(), "0");
    assert_eq!(Value::Float(3.5).to_text(), "3.5");
    assert_eq!(Value::Float(0.1).to_text(), "0.1");
}

#[test]
fn test_large_float_has_no_exponent() {
    assert_eq!(format_float(1e21), "1000000000000000000000");
}

#[test]
fn test_from_json_numbers() {
    assert_eq!(Value::from(json!(42)), Value::Integer(42));
    assert_eq!(Value::from(json!(3.0)), Value::Float(3.0));
    assert_eq!(Value::from(json!(-1.25)), Value::Float(-1.25));
    assert_eq!(
        Value::from(json!(u64::MAX)),
        Value::Float(u64::MAX as f64)
    );
}

#[test]
fn test_from_json_composites_become_json_text() {
    assert_eq!(Value::from(json!([1, 2])), Value::from("[1,2]"));
    assert_eq!(Value::from(json!({"a": true})), Value::from(r#"{"a":true}"#));
}

#[test]
fn test_json_literal() {
    assert_eq!(Value::Null.to_json_literal(), "null");
    assert_eq!(Value::Bool(false).to_json_literal(), "false");
    assert_eq!(Value::Integer(7).to_json_literal(), "7");
    assert_eq!(Value::Float(2.0).to_json_literal(), "2");
    assert_eq!(Value::from("say \"hi\"").to_json_literal(), r#""say \"hi\"""#);
}

#[test]
fn test_params_json_conversion() {
    let obj = json!({"name": "bob", "age": 3, "vip": null});
    let params = params_from_json(obj.as_object().unwrap().clone());
    assert_eq!(params.get("name"), Some(&Value::from("bob")));
    assert_eq!(params.get("age"), Some(&Value::Integer(3)));
    assert_eq!(params.get("vip"), Some(&Value::Null));

    let back = params_to_json(&params);
    assert_eq!(serde_json::Value::Object(back), obj);
}
