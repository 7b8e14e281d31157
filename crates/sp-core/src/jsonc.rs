//! JSONC decoding
//!
//! Parameter files, test definitions and suite files are JSON with two
//! relaxations: `//` and `/* */` comments, and trailing commas before a
//! closing bracket. Both are removed here before handing the text to
//! `serde_json`.

use crate::error::{CoreError, CoreResult};
use crate::value::{params_from_json, ParameterSet};
use serde::de::DeserializeOwned;

/// Remove comments (and a leading BOM) outside of JSON strings.
///
/// Line comments keep their terminating newline so error positions reported
/// by `serde_json` still point at the right line.
pub fn strip_comments(text: &str) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' || next == '\r' {
                        out.push(next);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Drop commas that are followed only by whitespace and a closing bracket.
pub fn strip_trailing_commas(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = bytes[i + 1..]
                .iter()
                .copied()
                .find(|b| !b.is_ascii_whitespace());
            if matches!(next, Some(b']' | b'}')) {
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Comment and trailing-comma cleanup in one call
pub fn clean(text: &str) -> String {
    strip_trailing_commas(&strip_comments(text))
}

/// Decode a JSONC document into a typed value
pub fn from_jsonc<T: DeserializeOwned>(text: &str) -> CoreResult<T> {
    Ok(serde_json::from_str(&clean(text))?)
}

/// Decode a JSONC parameter document.
///
/// A top-level `null` yields an empty set; any other non-object document
/// is rejected.
pub fn decode_params(bytes: &[u8]) -> CoreResult<ParameterSet> {
    let text = String::from_utf8_lossy(bytes);
    let value: serde_json::Value =
        serde_json::from_str(&clean(&text)).map_err(|e| CoreError::ParamsDecode {
            message: e.to_string(),
        })?;

    match value {
        serde_json::Value::Null => Ok(ParameterSet::new()),
        serde_json::Value::Object(map) => Ok(params_from_json(map)),
        other => Err(CoreError::ParamsDecode {
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "jsonc_test.rs"]
mod tests;
