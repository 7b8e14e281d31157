//! Directive grammar
//!
//! Every directive is a SQL block comment, so an unrendered template is still
//! runnable SQL. Keywords are case-insensitive.
//!
//! | Form | Meaning |
//! |---|---|
//! | `/*? key ?*/ BODY /*?*/` | optional block, kept when `key` is truthy |
//! | `/*IF pred*/ BODY /*END*/` | if block, `ENDIF` and `FI` also close it |
//! | `/*BEGIN*/ BODY /*END*/` | prune block, dropped when only a dangling clause is left |
//! | `/*name*/'default'` | placeholder, default may also be `"..."`, a number, `true`, `false` or `null` |
//!
//! Matching is lexical: each pattern finds the leftmost opener and the
//! nearest closer after it. Blocks of the same kind therefore do not nest;
//! an inner opener becomes part of the outer body and the outer closer is
//! left behind as literal text.

use regex::Regex;
use std::sync::OnceLock;

/// `/*? key ?*/ BODY /*?*/`; captures key and body
pub(crate) fn optional_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)/\*\?\s*([A-Za-z0-9_]+)\s*\?\*/(.*?)/\*\?\s*\*/")
            .expect("valid regex literal")
    })
}

/// `/*? key ?*/` opener alone; captures key
pub(crate) fn optional_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)/\*\?\s*([A-Za-z0-9_]+)\s*\?\*/").expect("valid regex literal")
    })
}

/// `/*IF pred*/ BODY /*END|ENDIF|FI*/`; captures predicate and body
pub(crate) fn if_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)/\*IF\s+([^*]+?)\*/(.*?)/\*(?:END|ENDIF|FI)\*/")
            .expect("valid regex literal")
    })
}

/// `/*IF pred*/` opener alone; captures predicate
pub(crate) fn if_head() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)/\*IF\s+([^*]+?)\*/").expect("valid regex literal"))
}

/// `/*BEGIN*/ BODY /*END*/`; captures body
pub(crate) fn prune_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)/\*BEGIN\*/(.*?)/\*(?:END|ENDIF|FI)\*/").expect("valid regex literal")
    })
}

/// Upper-cased prune body that is nothing but a dangling clause fragment
pub(crate) fn dangling_clause() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:WHERE)?\s*(?:AND|OR)?\s*\(?\s*\)?$").expect("valid regex literal")
    })
}

/// `/*name*/DEFAULT`; captures name and the whole default literal
pub(crate) fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)/\*([a-zA-Z0-9_]+)\*/("[^"]*"|'[^']*'|[0-9.+-]+|true|false|null)"#)
            .expect("valid regex literal")
    })
}

/// Placeholder with a quoted default only; captures name
pub(crate) fn quoted_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"/\*([A-Za-z0-9_]+)\*/('[^']*'|"[^"]*")"#).expect("valid regex literal")
    })
}

/// Quoted literal inside a predicate
pub(crate) fn quoted_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"'[^']*'|"[^"]*""#).expect("valid regex literal"))
}

/// Identifier-like word
pub(crate) fn word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid regex literal"))
}
