//! SQL text utilities
//!
//! Lexical helpers shared by the renderer, the prune-block check and the
//! canonical comparator. None of them understand SQL beyond comment
//! markers and whitespace.

/// Remove `/* ... */` and `-- ...` comments.
///
/// A line comment swallows its terminating newline. An unterminated block
/// comment, or a line comment on the last line, drops the rest of the text.
/// Quotes are not tracked, so comment markers inside string literals are
/// stripped as well.
///
/// # Examples
/// ```
/// use sp_core::sql_utils::strip_sql_comments;
/// assert_eq!(strip_sql_comments("a /* b */c -- d\ne"), "a c e");
/// ```
pub fn strip_sql_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut rest = sql;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("/*") {
            match after.find("*/") {
                Some(end) => rest = &after[end + 2..],
                None => break,
            }
            continue;
        }
        if rest.starts_with("--") {
            match rest.find('\n') {
                Some(newline) => rest = &rest[newline + 1..],
                None => break,
            }
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// Returns true if the text still contains a comment opener
pub fn has_comment_marker(sql: &str) -> bool {
    sql.contains("/*") || sql.contains("--")
}

/// Collapse whitespace inside each line and squeeze blank-line runs.
///
/// Every run of whitespace within a line becomes a single space, at most one
/// blank line is kept between non-blank lines, and the result is trimmed.
///
/// # Examples
/// ```
/// use sp_core::sql_utils::normalize_whitespace;
/// assert_eq!(normalize_whitespace("  SELECT   *\n\n\n FROM  t \n"), "SELECT *\n\nFROM t");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() && lines.last().is_some_and(|last| last.is_empty()) {
            continue;
        }
        lines.push(collapsed);
    }

    lines.join("\n").trim().to_string()
}

/// Append a newline unless the text already ends with one
pub fn ensure_trailing_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
