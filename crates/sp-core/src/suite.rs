//! Test suite loading (test.json)
//!
//! A suite file maps test names to definitions:
//!
//! ```json
//! {
//!   "users_by_status": {
//!     "sql": "sql/users.sql",
//!     "params": { "status": "active" },
//!     "expected": "expected/users.expected.sql",
//!     "seed": "seed/users.sql"
//!   }
//! }
//! ```
//!
//! `params` is either a path to a JSONC file (an optional `config:` prefix
//! is ignored) or an inline object. Relative paths resolve against the
//! directory containing the suite file.

use crate::error::{CoreError, CoreResult};
use crate::jsonc;
use crate::value::{params_from_json, ParameterSet};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a test case gets its parameters from
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSource {
    /// JSONC file on disk (may not exist yet when auto-generation is on)
    File(PathBuf),
    /// Object written directly in the suite file
    Inline(ParameterSet),
}

/// A single template test
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Test name (the key in the suite file)
    pub name: String,

    /// Template SQL file
    pub sql_path: PathBuf,

    /// Expected rendered SQL file
    pub expected_path: PathBuf,

    /// Parameter source
    pub params: ParamSource,

    /// Optional seed SQL executed before the rendered SQL
    pub seed_path: Option<PathBuf>,

    /// Optional path the rendered SQL is written to
    pub actual_path: Option<PathBuf>,
}

/// Load and validate every test definition in a suite file.
///
/// Cases are returned sorted by name.
pub fn load_suite(path: &Path) -> CoreResult<Vec<TestCase>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::SuiteNotFound {
                path: path.display().to_string(),
            }
        } else {
            CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    parse_suite(&text, base_dir, &path.display().to_string())
}

/// Parse suite text whose relative paths resolve against `base_dir`
pub fn parse_suite(text: &str, base_dir: &Path, origin: &str) -> CoreResult<Vec<TestCase>> {
    let raw: BTreeMap<String, serde_json::Value> =
        jsonc::from_jsonc(text).map_err(|e| CoreError::SuiteParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    raw.into_iter()
        .map(|(name, def)| match def {
            serde_json::Value::Object(map) => parse_case(name, &map, base_dir),
            _ => Err(CoreError::InvalidTest {
                name,
                reason: "definition must be an object".to_string(),
            }),
        })
        .collect()
}

fn parse_case(
    name: String,
    def: &serde_json::Map<String, serde_json::Value>,
    base_dir: &Path,
) -> CoreResult<TestCase> {
    let sql = pick_string(def, &["sql", "SQL"]);
    let expected = pick_string(def, &["expected"]);
    let (Some(sql), Some(expected)) = (sql, expected) else {
        return Err(CoreError::InvalidTest {
            name,
            reason: "missing sql/expected".to_string(),
        });
    };

    let params = match def.get("params") {
        Some(serde_json::Value::String(p)) => {
            let p = p.trim();
            let p = p.strip_prefix("config:").unwrap_or(p);
            if p.is_empty() {
                return Err(missing_params(name));
            }
            ParamSource::File(resolve_path(base_dir, p))
        }
        Some(serde_json::Value::Object(map)) => ParamSource::Inline(params_from_json(map.clone())),
        Some(_) => {
            return Err(CoreError::InvalidTest {
                name,
                reason: "'params' must be a string path or an object".to_string(),
            })
        }
        None => return Err(missing_params(name)),
    };

    Ok(TestCase {
        sql_path: resolve_path(base_dir, &sql),
        expected_path: resolve_path(base_dir, &expected),
        params,
        seed_path: pick_string(def, &["seed"]).map(|p| resolve_path(base_dir, &p)),
        actual_path: pick_string(def, &["actual", "out"]).map(|p| resolve_path(base_dir, &p)),
        name,
    })
}

fn missing_params(name: String) -> CoreError {
    CoreError::InvalidTest {
        name,
        reason: "missing params (set a file path or an inline object)".to_string(),
    }
}

/// First non-empty string value among `keys`
fn pick_string(def: &serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| def.get(*k).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(String::from)
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// Select tests by a comma-separated name list and/or a name regex.
///
/// Both filters must accept a test when both are given. The result is
/// sorted by name either way.
pub fn filter_tests(
    cases: Vec<TestCase>,
    only: Option<&str>,
    run: Option<&str>,
) -> CoreResult<Vec<TestCase>> {
    let allow: HashSet<&str> = only
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    let pattern = match run.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => Some(Regex::new(r).map_err(|e| CoreError::InvalidSelector {
            pattern: r.to_string(),
            reason: e.to_string(),
        })?),
        None => None,
    };

    let mut selected: Vec<TestCase> = cases
        .into_iter()
        .filter(|t| allow.is_empty() || allow.contains(t.name.as_str()))
        .filter(|t| pattern.as_ref().map_or(true, |re| re.is_match(&t.name)))
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));

    log::debug!("{} test(s) selected", selected.len());
    Ok(selected)
}

#[cfg(test)]
#[path = "suite_test.rs"]
mod tests;
