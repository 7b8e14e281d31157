//! Predicate evaluation for `/*IF ...*/` blocks
//!
//! Two forms are understood:
//!
//! - a bare name (`/*IF vip*/`), true when the parameter is truthy
//! - a comparison (`/*IF status == 'active'*/`, `/*IF id != null*/`)
//!
//! Anything else evaluates to false. Evaluation never fails.

use sp_core::value::{ParameterSet, Value};

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
}

/// A parsed `lhs OP literal` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison<'a> {
    /// Parameter name on the left-hand side
    pub lhs: &'a str,
    pub op: Operator,
    /// Literal on the right-hand side
    pub rhs: Value,
}

impl<'a> Comparison<'a> {
    /// Parse a comparison predicate.
    ///
    /// `==` is looked for before `!=`, and the predicate is split on the
    /// first occurrence of the chosen operator.
    pub fn parse(predicate: &'a str) -> Option<Self> {
        let (op, token) = if predicate.contains("==") {
            (Operator::Eq, "==")
        } else if predicate.contains("!=") {
            (Operator::Ne, "!=")
        } else {
            return None;
        };

        let (lhs, rhs) = predicate.split_once(token)?;
        Some(Self {
            lhs: lhs.trim(),
            op,
            rhs: parse_literal(rhs)?,
        })
    }

    /// Evaluate against a parameter set; a missing lhs is Null
    pub fn evaluate(&self, params: &ParameterSet) -> bool {
        let lhs = params.get(self.lhs).unwrap_or(&Value::Null);
        let equal = values_equal(lhs, &self.rhs);
        match self.op {
            Operator::Eq => equal,
            Operator::Ne => !equal,
        }
    }
}

/// Evaluate a directive predicate against a parameter set
pub fn evaluate(predicate: &str, params: &ParameterSet) -> bool {
    let predicate = predicate.trim();

    if !predicate.contains(|c: char| matches!(c, ' ' | '=' | '!' | '<' | '>')) {
        return params.get(predicate).is_some_and(Value::is_truthy);
    }

    match Comparison::parse(predicate) {
        Some(cmp) => cmp.evaluate(params),
        None => {
            log::debug!("Unrecognized predicate '{}' evaluates to false", predicate);
            false
        }
    }
}

/// Parse the right-hand literal of a comparison.
///
/// Priority: `null`, `true`/`false` (any case), a quoted string with doubled
/// quotes unescaped, an integer, a finite float. Returns `None` for anything
/// else.
pub fn parse_literal(text: &str) -> Option<Value> {
    let text = text.trim();

    if text.eq_ignore_ascii_case("null") {
        return Some(Value::Null);
    }
    if text.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }
    if let Some(inner) = unquote(text) {
        return Some(Value::String(
            inner.replace("''", "'").replace("\"\"", "\""),
        ));
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn unquote(text: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        text.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

/// Equality between a parameter value and a literal.
///
/// Null and booleans only equal their own kind. Two numbers compare by
/// value; every other pairing compares text forms, so `'5'` equals `5`.
pub fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Bool(_), _) | (_, Value::Bool(_)) => false,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            lhs.as_f64() == rhs.as_f64()
        }
        _ => lhs.to_text() == rhs.to_text(),
    }
}

#[cfg(test)]
#[path = "condition_test.rs"]
mod tests;
