use super::*;
use sp_core::value::Value;

fn params(pairs: &[(&str, Value)]) -> ParameterSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_optional_block_dropped_when_key_missing() {
    let out = resolve_optional_blocks("WHERE 1=1 /*? flag ?*/ AND x=1 /*?*/", &ParameterSet::new());
    assert_eq!(out, "WHERE 1=1 ");
}

#[test]
fn test_optional_block_kept_when_truthy() {
    let p = params(&[("flag", Value::Bool(true))]);
    assert_eq!(resolve_optional_blocks("/*? flag ?*/ AND x=1 /*?*/", &p), " AND x=1 ");
    assert_eq!(resolve_optional_blocks("/*?flag?*/x/*? */", &p), "x");
}

#[test]
fn test_if_block_equality() {
    let tpl = "/*IF status == 'active'*/ AND status='active' /*END*/";
    let active = params(&[("status", Value::from("active"))]);
    let closed = params(&[("status", Value::from("closed"))]);
    assert_eq!(resolve_if_blocks(tpl, &active), " AND status='active' ");
    assert_eq!(resolve_if_blocks(tpl, &closed), "");

    let null_tpl = "/*IF status == null*/ AND status IS NULL /*END*/";
    assert_eq!(resolve_if_blocks(null_tpl, &ParameterSet::new()), " AND status IS NULL ");
}

#[test]
fn test_if_block_terminators_and_case() {
    let p = params(&[("a", Value::Integer(1))]);
    assert_eq!(resolve_if_blocks("/*if a*/x/*fi*/", &p), "x");
    assert_eq!(resolve_if_blocks("/*IF a*/x/*EndIf*/", &p), "x");
    assert_eq!(resolve_if_blocks("/*If a*/x/*END*/", &p), "x");
}

#[test]
fn test_if_block_spans_lines() {
    let p = params(&[("a", Value::Bool(true))]);
    assert_eq!(resolve_if_blocks("/*IF a*/\n  x\n/*END*/", &p), "\n  x\n");
}

#[test]
fn test_unclosed_directive_passes_through() {
    let tpl = "SELECT 1 /*IF a*/ AND x";
    assert_eq!(resolve(tpl, &ParameterSet::new()), tpl);
}

#[test]
fn test_same_kind_nesting_is_not_supported() {
    let tpl = "/*IF a*/ x /*IF b*/ y /*END*/ z /*END*/";
    let p = params(&[("a", Value::Bool(true))]);
    assert_eq!(resolve_if_blocks(tpl, &p), " x /*IF b*/ y  z /*END*/");
}

#[test]
fn test_prune_block_with_where_inside() {
    let tpl = "SELECT * FROM t /*BEGIN*/ WHERE /*IF a*/ a = 1 /*END*/ /*END*/";
    assert_eq!(resolve(tpl, &ParameterSet::new()), "SELECT * FROM t ");

    let p = params(&[("a", Value::Bool(true))]);
    assert_eq!(resolve(tpl, &p), "SELECT * FROM t  WHERE  a = 1  ");
}

#[test]
fn test_prune_block_absorbs_preceding_where() {
    let tpl = "SELECT * FROM t WHERE /*BEGIN*/ /*IF a*/AND a=1/*END*/ /*END*/";
    assert_eq!(resolve(tpl, &ParameterSet::new()), "SELECT * FROM t ");
}

#[test]
fn test_prune_block_absorbs_preceding_and() {
    let tpl = "WHERE x = 1 AND /*BEGIN*/ /*IF b*/ b = 2 /*END*/ /*END*/";
    assert_eq!(resolve(tpl, &ParameterSet::new()), "WHERE x = 1 ");
}

#[test]
fn test_prune_block_absorbs_keyword_before_comments() {
    let tpl = "SELECT * FROM t\nWHERE -- filters\n/*BEGIN*/ /*IF a*/AND a=1/*END*/ /*END*/";
    assert_eq!(resolve(tpl, &ParameterSet::new()), "SELECT * FROM t\n");

    let tpl = "SELECT * FROM t WHERE /* optional */ /*BEGIN*/ /*END*/";
    assert_eq!(resolve_prune_blocks(tpl), "SELECT * FROM t ");
}

#[test]
fn test_prune_block_ignores_dashes_inside_strings() {
    let tpl = "WHERE x = 'a -- AND' /*BEGIN*/ /*END*/";
    assert_eq!(resolve_prune_blocks(tpl), "WHERE x = 'a -- AND' ");
}

#[test]
fn test_prune_block_keyword_must_be_whole_word() {
    assert_eq!(resolve_prune_blocks("SELECT FLOOR /*BEGIN*/ /*END*/"), "SELECT FLOOR ");
    assert_eq!(resolve_prune_blocks("col_or /*BEGIN*/ /*END*/"), "col_or ");
}

#[test]
fn test_prune_block_keeps_real_conditions() {
    let tpl = "/*BEGIN*/ WHERE a = 1 -- note\n/*END*/";
    assert_eq!(resolve_prune_blocks(tpl), " WHERE a = 1 -- note\n");
}

#[test]
fn test_is_dangling() {
    assert!(is_dangling(""));
    assert!(is_dangling("  \n "));
    assert!(is_dangling(" where "));
    assert!(is_dangling("AND"));
    assert!(is_dangling("/* c */ OR"));
    assert!(is_dangling(" WHERE ( ) "));
    assert!(!is_dangling("WHERE a"));
    assert!(!is_dangling("AND b = 1"));
}

#[test]
fn test_pass_order_optional_before_if() {
    let tpl = "/*IF a*/ x /*? k ?*/ y /*?*/ /*END*/";
    let p = params(&[("a", Value::Bool(true)), ("k", Value::from("v"))]);
    assert_eq!(resolve(tpl, &p), " x  y  ");
}
