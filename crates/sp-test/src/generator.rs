//! Fixture generation
//!
//! `gen-sql` scans a directory of templates and writes, per template, a test
//! definition, a params file and an expected-SQL file, plus one variant per
//! directive key that the defaults leave switched off. `combine` merges
//! individual definitions into a single suite file.

use crate::error::{TestGenError, TestGenResult};
use glob::MatchOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sp_core::jsonc;
use sp_core::sql_utils::ensure_trailing_newline;
use sp_core::value::{params_from_json, ParameterSet};
use sp_template::{guess_params, render, truthy_variants};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

/// Placeholder written to expected files that were not rendered
pub const EXPECTED_STUB: &str = "-- filled by snapshot update\n";

/// Directory under the output directory that holds params files
pub const PARAMS_DIR: &str = "_params";

/// A single test definition file (`*.test.jsonc`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestDef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sql: String,

    /// Path to a params file, or an inline object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,

    #[serde(default)]
    pub expected: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub normalize: BTreeMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub seed: String,
}

/// Options for [`generate_fixtures`]
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory scanned recursively for `*.sql` templates
    pub src_dir: PathBuf,
    /// Directory for `*.test.jsonc` files (params go under `_params/`)
    pub out_dir: PathBuf,
    /// Directory for `*.expected.sql` files
    pub expected_dir: PathBuf,
    /// Rewrite existing definitions and params files
    pub overwrite: bool,
    /// Render expected files instead of writing a stub
    pub auto_expected: bool,
}

/// Files touched by [`generate_fixtures`]
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    /// Number of templates found
    pub templates: usize,
    /// Test definitions written
    pub generated: Vec<PathBuf>,
    /// Test definitions left alone because they already exist
    pub skipped: Vec<PathBuf>,
}

/// One fixture to write for a template
struct Fixture<'a> {
    name: String,
    params: ParameterSet,
    params_note: String,
    tags: &'a [&'a str],
    description: &'a str,
}

/// Generate test fixtures for every template under `options.src_dir`
pub fn generate_fixtures(options: &GenerateOptions) -> TestGenResult<GenerateReport> {
    if !options.src_dir.is_dir() {
        return Err(TestGenError::DirectoryNotFound {
            path: options.src_dir.display().to_string(),
        });
    }

    let params_dir = options.out_dir.join(PARAMS_DIR);
    create_dir(&params_dir)?;
    create_dir(&options.expected_dir)?;

    let templates = find_files(&options.src_dir, &[".sql"])?;
    let mut report = GenerateReport {
        templates: templates.len(),
        ..Default::default()
    };

    for sql_path in &templates {
        let base = file_base(sql_path, ".sql");
        let template = read_file(sql_path)?;

        let mut fixtures = vec![Fixture {
            name: base.clone(),
            params: guess_params(&template),
            params_note: "Auto-generated from SQL placeholders".to_string(),
            tags: &["auto", "sql"],
            description: "Auto-generated by sqlproof gen-sql",
        }];
        fixtures.extend(truthy_variants(&template).into_iter().map(|v| Fixture {
            name: format!("{}__{}", base, v.key),
            params_note: format!("Auto-generated variant (truthy) for {}", v.key),
            params: v.params,
            tags: &["auto", "sql", "variant"],
            description: "Auto-generated truthy variant by sqlproof gen-sql",
        }));

        for fixture in fixtures {
            write_fixture(options, sql_path, &template, fixture, &mut report)?;
        }
    }

    Ok(report)
}

fn write_fixture(
    options: &GenerateOptions,
    sql_path: &Path,
    template: &str,
    fixture: Fixture<'_>,
    report: &mut GenerateReport,
) -> TestGenResult<()> {
    let out_dir = &options.out_dir;
    let def_path = out_dir.join(format!("{}.test.jsonc", fixture.name));
    let params_path = out_dir
        .join(PARAMS_DIR)
        .join(format!("{}.params.jsonc", fixture.name));
    let expected_path = options
        .expected_dir
        .join(format!("{}.expected.sql", fixture.name));

    if def_path.exists() && !options.overwrite {
        log::debug!("skip (exists): {}", def_path.display());
        report.skipped.push(def_path);
        return Ok(());
    }

    if options.overwrite || !params_path.exists() {
        write_params_jsonc(&params_path, &fixture.params, &fixture.params_note)?;
    }

    if options.auto_expected {
        // Render from the file on disk so a kept, hand-edited params file wins
        let params = jsonc::decode_params(read_file(&params_path)?.as_bytes())?;
        write_file(
            &expected_path,
            &ensure_trailing_newline(&render(template, &params)),
        )?;
    } else if !expected_path.exists() {
        write_file(&expected_path, EXPECTED_STUB)?;
    }

    let def = TestDef {
        name: fixture.name,
        tags: fixture.tags.iter().map(|t| t.to_string()).collect(),
        sql: relative_from(out_dir, sql_path),
        params: Some(serde_json::Value::String(relative_from(
            out_dir,
            &params_path,
        ))),
        expected: relative_from(out_dir, &expected_path),
        normalize: BTreeMap::from([("sqlFmt".to_string(), serde_json::Value::Bool(true))]),
        description: fixture.description.to_string(),
        seed: String::new(),
    };
    write_file(&def_path, &serde_json::to_string_pretty(&def)?)?;
    log::debug!("generated: {}", def_path.display());
    report.generated.push(def_path);
    Ok(())
}

/// Merge every `*.test.jsonc` / `*.test.json` under `in_dir` into one suite
/// file at `out_file`.
///
/// Returns the number of tests written. Paths are rebased onto the output
/// file's directory and inline params are moved into `_params/`.
pub fn combine_tests(in_dir: &Path, out_file: &Path) -> TestGenResult<usize> {
    if !in_dir.is_dir() {
        return Err(TestGenError::DirectoryNotFound {
            path: in_dir.display().to_string(),
        });
    }

    let files = find_files(in_dir, &[".test.jsonc", ".test.json"])?;
    if files.is_empty() {
        return Err(TestGenError::NoTestDefinitions {
            path: in_dir.display().to_string(),
        });
    }

    let out_dir = match out_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let params_dir = out_dir.join(PARAMS_DIR);

    let mut combined: BTreeMap<String, TestDef> = BTreeMap::new();
    let mut used: HashSet<String> = HashSet::new();

    for file in &files {
        let mut def: TestDef =
            jsonc::from_jsonc(&read_file(file)?).map_err(|e| TestGenError::InvalidDefinition {
                path: file.display().to_string(),
                message: e.to_string(),
            })?;
        let def_dir = file.parent().unwrap_or(Path::new("."));

        let base = match def.name.trim() {
            "" => file_base(file, ".test"),
            name => name.to_string(),
        };
        let key = unique_name(&base, &used);
        used.insert(key.clone());

        let rebase = |p: &str| relative_from(&out_dir, &def_dir.join(p));
        def.expected = rebase(&def.expected);
        if !def.sql.is_empty() {
            def.sql = rebase(&def.sql);
        }
        if !def.seed.is_empty() {
            def.seed = rebase(&def.seed);
        }
        def.params = match def.params.take() {
            Some(serde_json::Value::String(p)) => {
                let p = p.trim();
                let p = p.strip_prefix("config:").unwrap_or(p);
                Some(serde_json::Value::String(rebase(p)))
            }
            Some(serde_json::Value::Object(map)) => {
                let path = params_dir.join(format!("{}.params.jsonc", safe_name(&key)));
                write_params_jsonc(
                    &path,
                    &params_from_json(map),
                    "Converted from inline params by combine",
                )?;
                Some(serde_json::Value::String(relative_from(&out_dir, &path)))
            }
            other => other,
        };

        combined.insert(key, def);
    }

    write_file(out_file, &serde_json::to_string_pretty(&combined)?)?;
    Ok(combined.len())
}

fn unique_name(base: &str, used: &HashSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|i| format!("{base}__{i}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Write a params file that keeps value types and documents every key.
///
/// ```text
/// // Auto-generated from SQL placeholders
/// {
///   // age
///   "age": 18,
///   // name
///   "name": "bob"
/// }
/// ```
pub fn write_params_jsonc(path: &Path, params: &ParameterSet, note: &str) -> TestGenResult<()> {
    let mut lines = vec![format!("// {note}"), "{".to_string()];
    for (i, (key, value)) in params.iter().enumerate() {
        let comma = if i + 1 == params.len() { "" } else { "," };
        lines.push(format!("  // {key}"));
        lines.push(format!(
            "  {}: {}{}",
            serde_json::Value::String(key.clone()),
            value.to_json_literal(),
            comma
        ));
    }
    lines.push("}".to_string());
    write_file(path, &format!("{}\n", lines.join("\n")))
}

fn safe_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_-]+").expect("valid regex literal"))
}

/// File-name-safe form of a test name: lowercase, runs of other characters
/// replaced by `_`, never empty.
pub fn safe_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let replaced = safe_name_pattern().replace_all(&lower, "_");
    let trimmed = replaced.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        "test".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Path of `to` relative to the directory `from`, with `/` separators
pub fn relative_from(from: &Path, to: &Path) -> String {
    let from = absolute(from);
    let to = absolute(to);

    let common = from
        .components()
        .zip(to.components())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return to.display().to_string();
    }

    let ups = from.components().count() - common;
    let parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(ups)
        .chain(
            to.components()
                .skip(common)
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Absolute, lexically normalized form of `path`
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Files under `dir` whose lowercase name ends with one of `suffixes`,
/// sorted by path
fn find_files(dir: &Path, suffixes: &[&str]) -> TestGenResult<Vec<PathBuf>> {
    let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let mut files: Vec<PathBuf> = glob::glob_with(&pattern, options)?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .filter(|p| {
            let name = p.to_string_lossy().to_lowercase();
            suffixes.iter().any(|s| name.ends_with(s))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// File name without `suffix` (ASCII case-insensitive) or its final
/// extension
fn file_base(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    [file_name, stem.clone()]
        .into_iter()
        .find(|name| name.to_ascii_lowercase().ends_with(suffix))
        .map(|name| name[..name.len() - suffix.len()].to_string())
        .unwrap_or(stem)
}

fn read_file(path: &Path) -> TestGenResult<String> {
    fs::read_to_string(path).map_err(|e| TestGenError::Read {
        path: path.display().to_string(),
        source: e,
    })
}

fn create_dir(path: &Path) -> TestGenResult<()> {
    fs::create_dir_all(path).map_err(|e| TestGenError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write `content`, creating parent directories as needed
pub(crate) fn write_file(path: &Path, content: &str) -> TestGenResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| TestGenError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
