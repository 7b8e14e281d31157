//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sqlproof - test harness for 2-way SQL templates
#[derive(Parser, Debug)]
#[command(name = "sqlproof")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every test, compare with expected SQL and execute it
    Run(RunArgs),

    /// Generate test definitions, params and expected files from templates
    GenSql(GenSqlArgs),

    /// Combine *.test.jsonc definitions into a single suite file
    Combine(CombineArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Suite file (combined test.json)
    #[arg(short, long, default_value = "test.json")]
    pub config: PathBuf,

    /// Database settings file (DBType, User, Pass, Name, Host, Port)
    #[arg(long)]
    pub db_config: Option<PathBuf>,

    /// Database driver override: sqlite (default), duckdb, mysql or postgres
    #[arg(long)]
    pub driver: Option<String>,

    /// DSN override
    #[arg(long, env = "SQLPROOF_DSN")]
    pub dsn: Option<String>,

    /// Seed SQL executed before every test (relative to the suite file)
    #[arg(long)]
    pub seed: Option<String>,

    /// Render and compare only; skip database execution
    #[arg(long)]
    pub noexec: bool,

    /// Database execution timeout in seconds
    #[arg(long, default_value = "15")]
    pub timeout: u64,

    /// Include rendered SQL in failure and error details
    #[arg(long)]
    pub print_sql: bool,

    /// Commit after execution instead of rolling back
    #[arg(long)]
    pub commit: bool,

    /// Request read-only transactions where the backend supports it
    #[arg(long)]
    pub readonly: bool,

    /// Generate a params file from template defaults when missing
    #[arg(long)]
    pub auto_params: bool,

    /// Write the expected file from the rendered SQL when missing
    #[arg(long)]
    pub auto_expected: bool,

    /// Always overwrite expected files with the rendered SQL
    #[arg(long)]
    pub snapshot_update: bool,

    /// Write a JUnit XML report to this path
    #[arg(long)]
    pub junit_out: Option<PathBuf>,

    /// Comma-separated test names to run
    #[arg(long)]
    pub only: Option<String>,

    /// Regular expression selecting tests by name
    #[arg(long)]
    pub run: Option<String>,
}

/// Arguments for the gen-sql command
#[derive(Args, Debug)]
pub struct GenSqlArgs {
    /// Directory containing SQL templates
    #[arg(long, default_value = "./sql")]
    pub src: PathBuf,

    /// Directory for generated *.test.jsonc files
    #[arg(long, default_value = "./tests-sql")]
    pub out: PathBuf,

    /// Directory for expected rendered SQL
    #[arg(long, default_value = "./expected-sql")]
    pub expected: PathBuf,

    /// Also write a combined suite file here
    #[arg(long)]
    pub combine: Option<PathBuf>,

    /// Overwrite existing test definitions
    #[arg(long)]
    pub overwrite: bool,

    /// Render expected files instead of writing a placeholder
    #[arg(long)]
    pub auto_expected: bool,
}

/// Arguments for the combine command
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Directory containing *.test.jsonc definitions
    #[arg(long = "in", default_value = "./tests-sql")]
    pub input: PathBuf,

    /// Output suite file
    #[arg(long, default_value = "./tests-sql/test.json")]
    pub out: PathBuf,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
