//! Statement splitting

/// Split a batch on `;` into trimmed, non-empty statements.
///
/// The split is purely lexical; a `;` inside a string literal also splits.
///
/// # Examples
/// ```
/// use sp_db::split_statements;
/// assert_eq!(split_statements("SELECT 1; ;\nSELECT 2;"), vec!["SELECT 1", "SELECT 2"]);
/// ```
pub fn split_statements(batch: &str) -> Vec<&str> {
    batch
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
