//! Test execution
//!
//! Each case is rendered, checked against its expected file and, unless
//! execution is disabled, run inside a transaction that is rolled back by
//! default.

use crate::compare::{compare, Comparison};
use crate::error::{RunError, TestGenResult};
use crate::generator::write_params_jsonc;
use sp_core::jsonc::decode_params;
use sp_core::sql_utils::ensure_trailing_newline;
use sp_core::value::{ParameterSet, Value};
use sp_core::{ParamSource, TestCase};
use sp_db::{Database, TransactionMode};
use sp_template::inference::{infer_optional_keys, infer_skeleton, quoted_placeholder_keys};
use sp_template::render;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default per-test database timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Options for a test run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Render and compare only
    pub no_exec: bool,
    /// Commit instead of rolling back
    pub commit: bool,
    /// Request read-only transactions where the backend supports it
    pub read_only: bool,
    /// Generate missing params files from the template
    pub auto_params: bool,
    /// Write missing expected files from the rendered SQL
    pub auto_expected: bool,
    /// Overwrite expected files with the rendered SQL
    pub snapshot_update: bool,
    /// Seed file executed before every test's own seed
    pub global_seed: Option<PathBuf>,
    /// Database execution timeout per test
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            no_exec: false,
            commit: false,
            read_only: false,
            auto_params: false,
            auto_expected: false,
            snapshot_update: false,
            global_seed: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// How a test ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Pass,
    /// Rendered SQL did not match the expected file
    Failure(String),
    /// Anything else went wrong
    Error(String),
}

/// Result of a single test execution
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test name
    pub name: String,

    pub outcome: TestOutcome,

    /// Rendered SQL, when rendering got that far
    pub rendered_sql: Option<String>,

    /// Execution time
    pub duration: Duration,
}

impl TestResult {
    /// Whether the test passed
    pub fn passed(&self) -> bool {
        self.outcome == TestOutcome::Pass
    }

    /// Failure or error message, if any
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            TestOutcome::Pass => None,
            TestOutcome::Failure(m) | TestOutcome::Error(m) => Some(m),
        }
    }
}

/// Summary of test run
#[derive(Debug, Clone)]
pub struct TestSummary {
    /// Total tests run
    pub total: usize,

    /// Tests passed
    pub passed: usize,

    /// Tests failed
    pub failed: usize,

    /// Tests with errors
    pub errors: usize,

    /// Total execution time
    pub duration: Duration,
}

impl TestSummary {
    /// Create a summary from test results
    pub fn from_results(results: &[TestResult], duration: Duration) -> Self {
        let count = |pred: fn(&TestOutcome) -> bool| {
            results.iter().filter(|r| pred(&r.outcome)).count()
        };

        Self {
            total: results.len(),
            passed: count(|o| matches!(o, TestOutcome::Pass)),
            failed: count(|o| matches!(o, TestOutcome::Failure(_))),
            errors: count(|o| matches!(o, TestOutcome::Error(_))),
            duration,
        }
    }

    /// Check if all tests passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// Test runner for executing template tests
pub struct TestRunner<'a> {
    options: &'a RunOptions,
    db: Option<&'a dyn Database>,
}

impl<'a> TestRunner<'a> {
    /// Create a new test runner. `db` may be `None` when `no_exec` is set.
    pub fn new(options: &'a RunOptions, db: Option<&'a dyn Database>) -> Self {
        Self { options, db }
    }

    /// Run a single test case
    pub async fn run_case(&self, case: &TestCase) -> TestResult {
        let start = Instant::now();
        let mut rendered_sql = None;

        let outcome = match self.check(case, &mut rendered_sql).await {
            Ok(()) => TestOutcome::Pass,
            Err(e) if e.is_failure() => TestOutcome::Failure(e.to_string()),
            Err(e) => TestOutcome::Error(e.to_string()),
        };
        log::debug!("{}: {:?}", case.name, outcome);

        TestResult {
            name: case.name.clone(),
            outcome,
            rendered_sql,
            duration: start.elapsed(),
        }
    }

    /// Run test cases one after another
    pub async fn run_cases(&self, cases: &[TestCase]) -> Vec<TestResult> {
        let mut results = Vec::with_capacity(cases.len());

        for case in cases {
            let result = self.run_case(case).await;
            results.push(result);
        }

        results
    }

    async fn check(
        &self,
        case: &TestCase,
        rendered_sql: &mut Option<String>,
    ) -> Result<(), RunError> {
        let template = fs::read_to_string(&case.sql_path).map_err(|e| RunError::ReadTemplate {
            path: case.sql_path.display().to_string(),
            source: e,
        })?;

        let params = self.load_params(&case.params, &template)?;
        let sql = render(&template, &params);
        *rendered_sql = Some(sql.clone());

        if let Some(actual_path) = &case.actual_path {
            if let Err(e) = fs::write(actual_path, &sql) {
                log::warn!("could not write {}: {}", actual_path.display(), e);
            }
        }

        self.check_expected(&case.expected_path, &sql)?;

        if self.options.no_exec {
            return Ok(());
        }

        let db = self.db.ok_or(RunError::NoDatabase)?;
        let seeds = self.read_seeds(case)?;
        let mode = TransactionMode {
            commit: self.options.commit,
            read_only: self.options.read_only,
        };

        match tokio::time::timeout(
            self.options.timeout,
            db.execute_in_transaction(&seeds, &sql, mode),
        )
        .await
        {
            Ok(result) => Ok(result?),
            Err(_) => {
                // Free the connection for the next test
                db.interrupt();
                Err(RunError::Timeout {
                    seconds: self.options.timeout.as_secs(),
                })
            }
        }
    }

    fn load_params(&self, source: &ParamSource, template: &str) -> Result<ParameterSet, RunError> {
        let path = match source {
            ParamSource::Inline(params) => return Ok(params.clone()),
            ParamSource::File(path) => path,
        };

        if self.options.auto_params && !path.exists() {
            auto_generate_params(path, template).map_err(|e| RunError::AutoParams {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let bytes = fs::read(path).map_err(|e| RunError::ReadParams {
            path: path.display().to_string(),
            source: e,
        })?;
        decode_params(&bytes).map_err(RunError::DecodeParams)
    }

    fn check_expected(&self, path: &Path, sql: &str) -> Result<(), RunError> {
        let write_expected = |action| {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| RunError::Expected {
                    action,
                    path: path.display().to_string(),
                    source: e,
                })?;
            }
            fs::write(path, ensure_trailing_newline(sql)).map_err(|e| RunError::Expected {
                action,
                path: path.display().to_string(),
                source: e,
            })
        };

        match fs::read_to_string(path) {
            Ok(_) if self.options.snapshot_update => write_expected("update"),
            Ok(expected) => match compare(&expected, sql) {
                Comparison::Match => Ok(()),
                Comparison::Mismatch { diff } => Err(RunError::Mismatch { diff }),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if self.options.auto_expected || self.options.snapshot_update {
                    write_expected("create")
                } else {
                    Err(RunError::MissingExpected {
                        path: path.display().to_string(),
                    })
                }
            }
            Err(e) => Err(RunError::Expected {
                action: "read",
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Global seed first, then the test's own
    fn read_seeds(&self, case: &TestCase) -> Result<Vec<String>, RunError> {
        self.options
            .global_seed
            .iter()
            .chain(case.seed_path.iter())
            .map(|path| {
                fs::read_to_string(path).map_err(|e| RunError::ReadSeed {
                    path: path.display().to_string(),
                    source: e,
                })
            })
            .collect()
    }
}

/// Write a params file for `template`: every placeholder with a quoted
/// default plus every optional-block key, valued with the placeholder's
/// default or an empty string.
pub fn auto_generate_params(path: &Path, template: &str) -> TestGenResult<()> {
    let skeleton = infer_skeleton(template);
    let mut keys = quoted_placeholder_keys(template);
    keys.extend(infer_optional_keys(template));

    let params: ParameterSet = keys
        .into_iter()
        .map(|key| {
            let value = skeleton
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            (key, value)
        })
        .collect();

    write_params_jsonc(
        path,
        &params,
        "Auto-generated from SQL defaults by --auto-params",
    )
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
