//! Parameter values and parameter sets
//!
//! A [`Value`] is the closed set of types a decoded parameter can take.
//! Every component of the template engine matches on it exhaustively, so
//! adding a kind is a compile error everywhere it matters.

use std::collections::BTreeMap;
use std::fmt;

/// Parameters keyed by case-sensitive name.
///
/// A `BTreeMap` keeps serialization alphabetical, which the fixture writer
/// relies on for deterministic output.
pub type ParameterSet = BTreeMap<String, Value>;

/// A decoded parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON `null`, or a parameter that is absent
    Null,
    /// Boolean literal
    Bool(bool),
    /// Integer that fits in 64 bits
    Integer(i64),
    /// Any other number
    Float(f64),
    /// Text. Arrays and objects from the decoder land here as compact JSON.
    String(String),
}

impl Value {
    /// Truthiness used by bare-name conditions and optional blocks.
    ///
    /// Strings are trimmed before the emptiness check.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.trim().is_empty(),
        }
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Plain text form: numbers without a trailing `.0`, strings unquoted.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
        }
    }

    /// JSON literal used when writing parameter fixtures
    pub fn to_json_literal(&self) -> String {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
            other => other.to_text(),
        }
    }

    /// Convert into a `serde_json::Value`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// Format a float with the shortest round-trip decimal form.
///
/// Integral values render without a decimal point (`3.0` -> `3`).
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.2e18 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::String(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::String(other.to_string())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Convert a decoded JSON object into a parameter set
pub fn params_from_json(map: serde_json::Map<String, serde_json::Value>) -> ParameterSet {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

/// Convert a parameter set back into a JSON object
pub fn params_to_json(params: &ParameterSet) -> serde_json::Map<String, serde_json::Value> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
