//! Shared utilities for CLI commands

use std::fmt;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: main exits with the code and prints nothing
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Print a `[verbose]` diagnostic to stderr when `--verbose` is set
pub(crate) fn verbose(global: &GlobalArgs, msg: impl fmt::Display) {
    if global.verbose {
        eprintln!("[verbose] {}", msg);
    }
}
