//! Error types for sp-test

use sp_core::CoreError;
use sp_db::DbError;
use thiserror::Error;

/// Errors from fixture generation, combining and report writing
#[derive(Error, Debug)]
pub enum TestGenError {
    /// Input directory missing or not a directory (T001)
    #[error("[T001] Directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Nothing to combine (T002)
    #[error("[T002] No *.test.jsonc files found under {path}")]
    NoTestDefinitions { path: String },

    /// A test definition file could not be decoded (T003)
    #[error("[T003] Invalid test definition {path}: {message}")]
    InvalidDefinition { path: String, message: String },

    /// Reading a file failed (T004)
    #[error("[T004] Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed (T005)
    #[error("[T005] Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk pattern could not be built (T006)
    #[error("[T006] Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for generation
pub type TestGenResult<T> = Result<T, TestGenError>;

/// Why a single test case did not pass
#[derive(Error, Debug)]
pub enum RunError {
    /// Rendered SQL differs from the expected file
    #[error("SQL mismatch:\n{diff}")]
    Mismatch { diff: String },

    /// Template unreadable (T011)
    #[error("[T011] read sql {path}: {source}")]
    ReadTemplate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Params file unreadable (T012)
    #[error("[T012] read params {path}: {source}")]
    ReadParams {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Params file could not be generated (T013)
    #[error("[T013] auto-gen params {path}: {message}")]
    AutoParams { path: String, message: String },

    /// Params did not decode to an object (T014)
    #[error("[T014] decode params: {0}")]
    DecodeParams(CoreError),

    /// Expected file missing and not generated (T015)
    #[error("[T015] expected file not found: {path} (use --auto-expected or --snapshot-update)")]
    MissingExpected { path: String },

    /// Expected file unreadable or unwritable (T016)
    #[error("[T016] {action} expected {path}: {source}")]
    Expected {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Seed file unreadable (T017)
    #[error("[T017] read seed {path}: {source}")]
    ReadSeed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Execution requested without a connection (T018)
    #[error("[T018] no database connection available")]
    NoDatabase,

    /// Execution exceeded the timeout (T019)
    #[error("[T019] execute DB: timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The database rejected the SQL (T020)
    #[error("[T020] execute DB: {0}")]
    Execute(#[from] DbError),
}

impl RunError {
    /// Mismatches are assertion failures; everything else is an error
    pub fn is_failure(&self) -> bool {
        matches!(self, RunError::Mismatch { .. })
    }
}
