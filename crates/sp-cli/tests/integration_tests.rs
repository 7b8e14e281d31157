//! End-to-end tests for the sqlproof binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const USERS_SQL: &str = "SELECT id, name FROM users\nWHERE status = /*status*/'active'\n/*BEGIN*/\n/*IF vip*/AND vip = /*vip*/false/*END*/\n/*END*/\n";

fn sqlproof(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlproof"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run sqlproof")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write(dir: &Path, rel: &str, text: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// One-test suite whose expected SQL is `expected`
fn users_suite(dir: &Path, expected: &str) {
    write(dir, "sql/users.sql", USERS_SQL);
    write(dir, "expected/users.expected.sql", expected);
    write(
        dir,
        "seed/users.sql",
        "CREATE TABLE users (id INTEGER, name VARCHAR, status VARCHAR, vip BOOLEAN);\nINSERT INTO users VALUES (1, 'ann', 'active', true);\n",
    );
    write(
        dir,
        "test.json",
        r#"{
  // users by status
  "users_active": {
    "sql": "sql/users.sql",
    "params": { "status": "active" },
    "expected": "expected/users.expected.sql",
    "seed": "seed/users.sql",
  }
}"#,
    );
}

#[test]
fn test_run_noexec_pass() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );

    let output = sqlproof(dir.path(), &["run", "--noexec"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stdout: {out}\nstderr: {}", stderr(&output));
    assert!(out.contains("sqlproof: 1 test(s)"));
    assert!(out.contains("driver=sqlite dsn=:memory:"));
    assert!(out.contains("note: transaction ROLLBACK (no persistent changes)"));
    assert!(out.contains("\n.\n"));
    assert!(out.contains("Tests: 1, Failures: 0, Errors: 0"));
}

#[test]
fn test_run_executes_against_duckdb() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );

    let output = sqlproof(dir.path(), &["run", "--driver", "duckdb", "--readonly"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stdout: {out}\nstderr: {}", stderr(&output));
    assert!(out.contains("driver=duckdb dsn=:memory:"));
    assert!(out.contains("note: READ ONLY (best-effort)"));
    assert!(out.contains("Failures: 0, Errors: 0"));
}

#[test]
fn test_run_executes_against_sqlite_by_default() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );

    let output = sqlproof(dir.path(), &["run"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stdout: {out}\nstderr: {}", stderr(&output));
    assert!(out.contains("driver=sqlite dsn=:memory:"));
    assert!(out.contains("Tests: 1, Failures: 0, Errors: 0"));
}

#[test]
fn test_run_sqlite_read_only_rejects_writes() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );

    let output = sqlproof(dir.path(), &["run", "--readonly"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("note: READ ONLY (best-effort)"));
    assert!(out.contains("Errors (1):"));
    assert!(out.contains("[D003]"));
}

#[test]
fn test_run_reports_mismatch() {
    let dir = TempDir::new().unwrap();
    users_suite(dir.path(), "SELECT id FROM users WHERE status = 'closed'\n");

    let output = sqlproof(dir.path(), &["run", "--noexec", "--print-sql"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\nF\n"));
    assert!(out.contains("Failures (1):"));
    assert!(out.contains("1) users_active ("));
    assert!(out.contains("- SELECT id FROM users WHERE status = 'closed'"));
    assert!(out.contains("--- Rendered SQL ---"));
    assert!(out.contains("Tests: 1, Failures: 1, Errors: 0"));
}

#[test]
fn test_run_reports_seed_error() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );
    write(dir.path(), "seed/users.sql", "CREATE TABLE broken (;\n");

    let output = sqlproof(dir.path(), &["run"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("\nE\n"));
    assert!(out.contains("Errors (1):"));
    assert!(out.contains("Tests: 1, Failures: 0, Errors: 1"));
}

#[test]
fn test_run_no_matching_tests() {
    let dir = TempDir::new().unwrap();
    users_suite(dir.path(), "SELECT 1\n");

    let output = sqlproof(dir.path(), &["run", "--noexec", "--only", "nope"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no tests matched by --only / --run filters"));
}

#[test]
fn test_run_writes_junit() {
    let dir = TempDir::new().unwrap();
    users_suite(
        dir.path(),
        "SELECT id, name FROM users WHERE status = 'active'\n",
    );

    let output = sqlproof(
        dir.path(),
        &["run", "--noexec", "--junit-out", "reports/junit.xml"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("JUnit report written: reports/junit.xml"));
    let xml = fs::read_to_string(dir.path().join("reports/junit.xml")).unwrap();
    assert!(xml.contains("<testsuite name=\"sqlproof\" tests=\"1\" failures=\"0\" errors=\"0\""));
    assert!(xml.contains("<testcase name=\"users_active\""));
}

#[test]
fn test_run_auto_params_and_expected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "sql/users.sql", USERS_SQL);
    write(
        dir.path(),
        "test.json",
        r#"{"users": {"sql": "sql/users.sql", "params": "config:params/users.jsonc", "expected": "expected/users.sql"}}"#,
    );

    let output = sqlproof(
        dir.path(),
        &["run", "--noexec", "--auto-params", "--auto-expected"],
    );

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    let params = fs::read_to_string(dir.path().join("params/users.jsonc")).unwrap();
    assert!(params.contains("\"status\": \"active\""));
    let expected = fs::read_to_string(dir.path().join("expected/users.sql")).unwrap();
    assert!(expected.contains("status = 'active'"));
}

#[test]
fn test_missing_suite_is_an_error() {
    let dir = TempDir::new().unwrap();

    let output = sqlproof(dir.path(), &["run", "--config", "missing.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load suite missing.json"));
}

#[test]
fn test_gen_sql_combine_then_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "sql/users.sql", USERS_SQL);

    let output = sqlproof(
        dir.path(),
        &[
            "gen-sql",
            "--src",
            "sql",
            "--out",
            "tests-sql",
            "--expected",
            "expected-sql",
            "--auto-expected",
            "--combine",
            "tests-sql/test.json",
        ],
    );
    let out = stdout(&output);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("generated: "));
    assert!(out.contains("combined: tests-sql/test.json"));
    assert!(out.contains("sqlproof run --config tests-sql/test.json"));
    assert!(dir.path().join("tests-sql/users.test.jsonc").exists());
    assert!(dir.path().join("tests-sql/users__vip.test.jsonc").exists());
    assert!(dir.path().join("tests-sql/_params/users.params.jsonc").exists());

    let output = sqlproof(
        dir.path(),
        &["run", "--noexec", "--config", "tests-sql/test.json"],
    );
    let out = stdout(&output);
    assert!(output.status.success(), "stdout: {out}");
    assert!(out.contains("sqlproof: 2 test(s)"));
    assert!(out.contains("\n..\n"));
}

#[test]
fn test_gen_sql_skips_existing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "sql/users.sql", USERS_SQL);
    let args = ["gen-sql", "--src", "sql", "--out", "t", "--expected", "e"];

    assert!(sqlproof(dir.path(), &args).status.success());
    let output = sqlproof(dir.path(), &args);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("skip (exists): "));
    assert!(!out.contains("generated: "));
}

#[test]
fn test_combine_command() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "defs/a.test.jsonc",
        r#"{
  // inline params
  "sql": "../sql/a.sql",
  "params": {"id": 1},
  "expected": "../expected/a.sql",
}"#,
    );

    let output = sqlproof(dir.path(), &["combine", "--in", "defs", "--out", "out/test.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("combined: out/test.json"));
    let suite = fs::read_to_string(dir.path().join("out/test.json")).unwrap();
    assert!(suite.contains("\"a\""));
    assert!(dir.path().join("out/_params/a.params.jsonc").exists());
}

#[test]
fn test_combine_missing_dir() {
    let dir = TempDir::new().unwrap();

    let output = sqlproof(dir.path(), &["combine", "--in", "nope"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to combine"));
}
