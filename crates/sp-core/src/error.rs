//! Error types for sp-core

use thiserror::Error;

/// Core error type for sqlproof
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Suite file could not be read
    #[error("[C001] Suite file not found: {path}")]
    SuiteNotFound { path: String },

    /// C002: Suite file is not a valid JSON(C) object of test definitions
    #[error("[C002] Failed to parse suite {path}: {message}")]
    SuiteParseError { path: String, message: String },

    /// C003: A test definition is missing required keys or has bad types
    #[error("[C003] Invalid test '{name}': {reason}")]
    InvalidTest { name: String, reason: String },

    /// C004: Parameter document could not be decoded
    #[error("[C004] Failed to decode params: {message}")]
    ParamsDecode { message: String },

    /// C005: Invalid --run selector
    #[error("[C005] Invalid test selector '{pattern}': {reason}")]
    InvalidSelector { pattern: String, reason: String },

    /// C006: Unknown database type
    #[error("[C006] Unsupported DBType: {db_type}")]
    UnsupportedDbType { db_type: String },

    /// C007: No DSN could be derived for a server database
    #[error("[C007] DSN not provided for {db_type} (set --dsn or --db-config)")]
    MissingDsn { db_type: String },

    /// C008: IO error with file path context
    #[error("[C008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
