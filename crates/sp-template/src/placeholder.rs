//! Placeholder substitution
//!
//! `/*name*/'default'` is replaced by the value of `name` when it is set,
//! otherwise by its own default. This is the only place parameter values
//! are written into SQL text.

use crate::directive;
use regex::Captures;
use sp_core::value::{format_float, ParameterSet, Value};

/// Replace every placeholder in `text`
pub fn substitute(text: &str, params: &ParameterSet) -> String {
    directive::placeholder()
        .replace_all(text, |caps: &Captures| {
            let default = &caps[2];
            match params.get(&caps[1]) {
                Some(value) => sql_literal(value, default),
                None => default.to_string(),
            }
        })
        .into_owned()
}

/// SQL literal for `value`, styled after the placeholder's default.
///
/// Null falls back to the default. Strings reuse the default's quote
/// character.
pub fn sql_literal(value: &Value, default: &str) -> String {
    match value {
        Value::Null => default.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => format_float(*f),
        Value::String(s) => quote_like_default(default, s),
    }
}

/// Quote `text` with the default's quote character, doubling embedded
/// instances of it. Unquoted defaults get single quotes.
///
/// # Examples
/// ```
/// use sp_template::placeholder::quote_like_default;
/// assert_eq!(quote_like_default("'d'", "a'b"), "'a''b'");
/// assert_eq!(quote_like_default("\"d\"", "a'b"), "\"a'b\"");
/// assert_eq!(quote_like_default("0", "abc"), "'abc'");
/// ```
pub fn quote_like_default(default: &str, text: &str) -> String {
    let quote = if default.starts_with('"') { '"' } else { '\'' };
    let doubled = format!("{quote}{quote}");
    format!("{quote}{}{quote}", text.replace(quote, &doubled))
}

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod tests;
