//! Parameter inference
//!
//! Purely lexical scans over raw template text. Nothing here evaluates a
//! directive; the results feed fixture generation and variant synthesis.

use crate::condition;
use crate::directive;
use sp_core::value::{ParameterSet, Value};
use std::collections::BTreeSet;

/// Words in an if-predicate that are never parameter names
const RESERVED_WORDS: &[&str] = &["null", "true", "false", "and", "or", "not"];

/// A parameter set that makes one directive key truthy
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// The key this variant switches on
    pub key: String,
    /// Base parameters with `key` set to its sample value
    pub params: ParameterSet,
}

/// Decode a placeholder default into a typed value.
///
/// A quoted default only unescapes its own doubled quote, so `'a""b'`
/// stays `a""b`. Anything that is not a recognizable literal is kept as raw
/// text.
pub fn decode_default_literal(literal: &str) -> Value {
    for quote in ['\'', '"'] {
        let inner = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote));
        if let Some(inner) = inner {
            let doubled = format!("{quote}{quote}");
            return Value::String(inner.replace(&doubled, &quote.to_string()));
        }
    }
    condition::parse_literal(literal).unwrap_or_else(|| Value::String(literal.to_string()))
}

/// Placeholder names mapped to their decoded defaults.
///
/// When a name appears more than once, the last occurrence wins.
pub fn infer_skeleton(template: &str) -> ParameterSet {
    directive::placeholder()
        .captures_iter(template)
        .map(|caps| (caps[1].to_string(), decode_default_literal(&caps[2])))
        .collect()
}

/// Names of placeholders whose default is a quoted string
pub fn quoted_placeholder_keys(template: &str) -> BTreeSet<String> {
    directive::quoted_placeholder()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Keys of every `/*? key ?*/` opener
pub fn infer_optional_keys(template: &str) -> BTreeSet<String> {
    directive::optional_key()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Candidate truthy keys: identifiers in if-predicates plus optional-block
/// keys. Quoted literals inside predicates are skipped.
pub fn infer_predicate_names(template: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    for caps in directive::if_head().captures_iter(template) {
        let predicate = directive::quoted_literal().replace_all(&caps[1], " ");
        for word in directive::word().find_iter(&predicate) {
            let word = word.as_str();
            if RESERVED_WORDS.contains(&word.to_ascii_lowercase().as_str()) {
                continue;
            }
            names.insert(word.to_string());
        }
    }

    names.extend(infer_optional_keys(template));
    names
}

/// Base parameter set for a template: the skeleton, plus an empty string
/// for every optional-block key without a placeholder default.
pub fn guess_params(template: &str) -> ParameterSet {
    let mut params = infer_skeleton(template);
    for key in infer_optional_keys(template) {
        params
            .entry(key)
            .or_insert_with(|| Value::String(String::new()));
    }
    params
}

/// Best-effort sample value chosen from the shape of a key's name.
///
/// # Examples
/// ```
/// use sp_core::Value;
/// use sp_template::inference::sample_value_for_key;
///
/// assert_eq!(sample_value_for_key("user_email"), Value::from("dummy@example.com"));
/// assert_eq!(sample_value_for_key("orderId"), Value::Integer(1));
/// assert_eq!(sample_value_for_key("flag"), Value::from("x"));
/// ```
pub fn sample_value_for_key(key: &str) -> Value {
    let key = key.to_ascii_lowercase();
    if key.contains("email") {
        Value::from("dummy@example.com")
    } else if key.contains("name") || key.contains("user") {
        Value::from("dummyname")
    } else if key.ends_with("id") || key.contains("count") || key.contains("num") {
        Value::Integer(1)
    } else if key.contains("date") || key.ends_with("_at") {
        Value::from("2025-01-01 00:00:00")
    } else {
        Value::from("x")
    }
}

/// One variant per candidate key that the base set leaves falsy, in key
/// order.
pub fn truthy_variants(template: &str) -> Vec<Variant> {
    let base = guess_params(template);

    infer_predicate_names(template)
        .into_iter()
        .filter(|key| !base.get(key).is_some_and(Value::is_truthy))
        .map(|key| {
            let mut params = base.clone();
            params.insert(key.clone(), sample_value_for_key(&key));
            log::trace!("variant '{}' from base of {} keys", key, base.len());
            Variant { key, params }
        })
        .collect()
}

#[cfg(test)]
#[path = "inference_test.rs"]
mod tests;
