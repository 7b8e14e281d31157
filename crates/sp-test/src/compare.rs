//! Canonical SQL comparison
//!
//! Two texts are equal when they match after comments are removed,
//! whitespace runs are collapsed and the spacing around `(`, `)`, `,` and
//! `;` is tightened. Spacing around operators is kept, so `x=1` and
//! `x = 1` differ.

use sp_core::sql_utils::{has_comment_marker, strip_sql_comments};

/// Outcome of comparing expected and actual SQL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch { diff: String },
}

/// Canonical form used for comparison.
///
/// Comment stripping repeats until no marker is left, since removing one
/// comment can join the halves of another (`-/**/-`).
///
/// # Examples
/// ```
/// use sp_test::compare::normalize;
/// assert_eq!(normalize("SELECT  f( a ,b ) -- note\n;"), "SELECT f(a,b);");
/// ```
pub fn normalize(sql: &str) -> String {
    let mut text = strip_sql_comments(sql);
    while has_comment_marker(&text) {
        text = strip_sql_comments(&text);
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("( ", "(")
        .replace(" )", ")")
        .replace(" ,", ",")
        .replace(" ;", ";")
}

/// True when both texts share a canonical form
pub fn equal(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Two-line diff of the canonical forms, or an empty string when equal
pub fn diff(expected: &str, actual: &str) -> String {
    let expected = normalize(expected);
    let actual = normalize(actual);
    if expected == actual {
        return String::new();
    }
    format!("- {expected}\n+ {actual}")
}

/// Compare `actual` against `expected`
pub fn compare(expected: &str, actual: &str) -> Comparison {
    let diff = diff(expected, actual);
    if diff.is_empty() {
        Comparison::Match
    } else {
        Comparison::Mismatch { diff }
    }
}

#[cfg(test)]
#[path = "compare_test.rs"]
mod tests;
