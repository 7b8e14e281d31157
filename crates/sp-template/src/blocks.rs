//! Block directive resolution
//!
//! Three passes run in a fixed order over the whole text: optional blocks,
//! then if blocks, then prune blocks. Prune blocks usually wrap if blocks,
//! so by the time a prune body is inspected its inner conditions have
//! already been reduced to their bodies or to nothing.

use crate::condition;
use crate::directive;
use regex::Captures;
use sp_core::sql_utils::{normalize_whitespace, strip_sql_comments};
use sp_core::value::ParameterSet;

/// Resolve every block directive in `template`
pub fn resolve(template: &str, params: &ParameterSet) -> String {
    let text = resolve_optional_blocks(template, params);
    let text = resolve_if_blocks(&text, params);
    resolve_prune_blocks(&text)
}

/// Keep `/*? key ?*/ BODY /*?*/` bodies whose key is truthy
pub fn resolve_optional_blocks(text: &str, params: &ParameterSet) -> String {
    directive::optional_block()
        .replace_all(text, |caps: &Captures| {
            let key = &caps[1];
            let keep = params.get(key).is_some_and(|v| v.is_truthy());
            log::trace!("optional block '{}' kept: {}", key, keep);
            if keep {
                caps[2].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Keep `/*IF pred*/ BODY /*END*/` bodies whose predicate holds
pub fn resolve_if_blocks(text: &str, params: &ParameterSet) -> String {
    directive::if_block()
        .replace_all(text, |caps: &Captures| {
            let predicate = caps[1].trim();
            let keep = condition::evaluate(predicate, params);
            log::trace!("if block '{}' kept: {}", predicate, keep);
            if keep {
                caps[2].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Collapse `/*BEGIN*/ BODY /*END*/` blocks that hold only a dangling clause.
///
/// A collapsed block also takes a `WHERE`, `AND` or `OR` keyword that sits
/// directly before it, so `WHERE /*BEGIN*/ ... /*END*/` disappears entirely
/// when nothing inside survives.
pub fn resolve_prune_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in directive::prune_block().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        let body = &caps[1];
        if is_dangling(body) {
            log::trace!("prune block collapsed");
            absorb_dangling_keyword(&mut out);
        } else {
            out.push_str(body);
        }
    }

    out.push_str(&text[last..]);
    out
}

/// True when the body, without comments, is empty or only a stray
/// `WHERE`/`AND`/`OR` and optional empty parentheses
pub fn is_dangling(body: &str) -> bool {
    let only = normalize_whitespace(&strip_sql_comments(body)).to_uppercase();
    let only = only.trim();
    only.is_empty() || directive::dangling_clause().is_match(only)
}

/// Length of `text` once trailing whitespace and comments are dropped
fn code_end(text: &str) -> usize {
    let mut end = text.len();
    loop {
        let head = text[..end].trim_end();
        end = head.len();

        if let Some(open) = head.strip_suffix("*/").and_then(|h| h.rfind("/*")) {
            end = open;
            continue;
        }

        let line_start = head.rfind('\n').map_or(0, |i| i + 1);
        let line = &head[line_start..];
        let comment = line
            .match_indices("--")
            .map(|(pos, _)| pos)
            .find(|pos| line[..*pos].matches('\'').count() % 2 == 0);
        match comment {
            Some(pos) => end = line_start + pos,
            None => return end,
        }
    }
}

fn absorb_dangling_keyword(out: &mut String) {
    let cut = {
        let head = &out[..code_end(out)];
        ["WHERE", "AND", "OR"].into_iter().find_map(|keyword| {
            let start = head.len().checked_sub(keyword.len())?;
            if !head.is_char_boundary(start) || !head[start..].eq_ignore_ascii_case(keyword) {
                return None;
            }
            let at_word_start = head[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
            at_word_start.then_some(start)
        })
    };

    if let Some(start) = cut {
        out.truncate(start);
    }
}

#[cfg(test)]
#[path = "blocks_test.rs"]
mod tests;
