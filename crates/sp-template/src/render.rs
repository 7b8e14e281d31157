//! Template rendering
//!
//! Block resolution, placeholder substitution and whitespace normalization
//! composed into a single pure function.

use crate::blocks;
use crate::placeholder;
use sp_core::sql_utils::normalize_whitespace;
use sp_core::value::ParameterSet;

/// Render `template` against `params`.
///
/// Malformed directives do not fail the render; they pass through as
/// literal text.
///
/// # Examples
/// ```
/// use sp_core::{ParameterSet, Value};
/// use sp_template::render;
///
/// let mut params = ParameterSet::new();
/// params.insert("id".to_string(), Value::Integer(7));
///
/// let sql = render("SELECT *\n  FROM t\n  WHERE id = /*id*/0", &params);
/// assert_eq!(sql, "SELECT *\nFROM t\nWHERE id = 7");
/// ```
pub fn render(template: &str, params: &ParameterSet) -> String {
    let resolved = blocks::resolve(template, params);
    let substituted = placeholder::substitute(&resolved, params);
    normalize_whitespace(&substituted)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
