//! Run command implementation
//!
//! Loads the suite, renders and compares every selected test, executes the
//! rendered SQL inside a transaction and reports phpunit-style progress.

use anyhow::{Context, Result};
use sp_core::suite::resolve_path;
use sp_core::{filter_tests, load_suite, resolve_connection, ConnectionConfig};
use sp_db::Database;
use sp_test::{JunitCase, JunitSuite, RunOptions, TestOutcome, TestResult, TestRunner, TestSummary};
use std::io::Write as _;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{verbose, ExitCode};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let cases = load_suite(&args.config)
        .with_context(|| format!("Failed to load suite {}", args.config.display()))?;
    verbose(global, format!("Loaded {} test(s) from {}", cases.len(), args.config.display()));

    let cases = filter_tests(cases, args.only.as_deref(), args.run.as_deref())?;
    if cases.is_empty() {
        eprintln!("ERROR: no tests matched by --only / --run filters");
        return Err(ExitCode(1).into());
    }

    let db_config = args
        .db_config
        .as_deref()
        .map(ConnectionConfig::load)
        .transpose()
        .context("Failed to load database config")?;
    let connection =
        resolve_connection(db_config.as_ref(), args.driver.as_deref(), args.dsn.as_deref())?;

    let db: Option<Box<dyn Database>> = if args.noexec {
        verbose(global, "Skipping database connection (--noexec)");
        None
    } else {
        verbose(global, format!("Connecting to {}", connection.db_type));
        Some(sp_db::connect(&connection).context("Failed to connect to database")?)
    };

    println!("sqlproof: {} test(s)", cases.len());
    println!("driver={} dsn={}", connection.db_type, connection.display_dsn());
    if args.commit {
        println!("note: COMMIT enabled");
    } else {
        println!("note: transaction ROLLBACK (no persistent changes)");
    }
    if args.readonly {
        println!("note: READ ONLY (best-effort)");
    }
    println!();

    let options = build_options(args);
    let runner = TestRunner::new(&options, db.as_deref());

    let start = Instant::now();
    let mut results = Vec::with_capacity(cases.len());
    for case in &cases {
        let result = runner.run_case(case).await;
        print!("{}", progress_mark(&result.outcome));
        // Best-effort flush so progress appears as tests finish
        let _ = std::io::stdout().flush();
        results.push(result);
    }
    println!();

    let details: Vec<String> = results
        .iter()
        .map(|r| detail_text(r, args.print_sql))
        .collect();

    print_details("Failures", &results, &details, |o| {
        matches!(o, TestOutcome::Failure(_))
    });
    print_details("Errors", &results, &details, |o| {
        matches!(o, TestOutcome::Error(_))
    });

    let summary = TestSummary::from_results(&results, start.elapsed());
    println!(
        "Time: {:.3}s, Tests: {}, Failures: {}, Errors: {}",
        summary.duration.as_secs_f64(),
        summary.total,
        summary.failed,
        summary.errors
    );

    if let Some(path) = &args.junit_out {
        write_junit(path, &results, details, summary.duration);
    }

    if !summary.all_passed() {
        return Err(ExitCode(1).into());
    }

    Ok(())
}

fn build_options(args: &RunArgs) -> RunOptions {
    let base_dir = match args.config.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    RunOptions {
        no_exec: args.noexec,
        commit: args.commit,
        read_only: args.readonly,
        auto_params: args.auto_params,
        auto_expected: args.auto_expected,
        snapshot_update: args.snapshot_update,
        global_seed: args
            .seed
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| resolve_path(base_dir, s)),
        timeout: Duration::from_secs(args.timeout),
    }
}

fn progress_mark(outcome: &TestOutcome) -> char {
    match outcome {
        TestOutcome::Pass => '.',
        TestOutcome::Failure(_) => 'F',
        TestOutcome::Error(_) => 'E',
    }
}

/// Failure/error message, with the rendered SQL appended when requested
fn detail_text(result: &TestResult, print_sql: bool) -> String {
    let mut text = result.message().unwrap_or_default().to_string();
    if print_sql {
        if let Some(sql) = result.rendered_sql.as_deref().filter(|s| !s.trim().is_empty()) {
            text.push_str("\n--- Rendered SQL ---\n");
            text.push_str(sql);
            text.push_str("\n--------------------");
        }
    }
    text
}

fn print_details(
    heading: &str,
    results: &[TestResult],
    details: &[String],
    select: fn(&TestOutcome) -> bool,
) {
    let selected: Vec<(&TestResult, &String)> = results
        .iter()
        .zip(details)
        .filter(|(r, _)| select(&r.outcome))
        .collect();
    if selected.is_empty() {
        return;
    }

    println!("\n{} ({}):", heading, selected.len());
    for (i, (result, text)) in selected.into_iter().enumerate() {
        println!(
            "{}) {} ({:.3}s)\n{}\n",
            i + 1,
            result.name,
            result.duration.as_secs_f64(),
            text
        );
    }
}

fn write_junit(path: &Path, results: &[TestResult], details: Vec<String>, time: Duration) {
    let cases = results
        .iter()
        .zip(details)
        .map(|(r, text)| JunitCase::from_result(r, text))
        .collect();

    match JunitSuite::new("sqlproof", cases, time).write(path) {
        Ok(()) => println!("JUnit report written: {}", path.display()),
        Err(e) => eprintln!("WARN: failed to write JUnit report: {}", e),
    }
}
