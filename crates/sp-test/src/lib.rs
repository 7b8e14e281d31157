//! sp-test - Test harness for sqlproof
//!
//! This crate compares rendered templates against expected SQL, executes
//! them against a database, generates test fixtures from templates and
//! writes JUnit reports.

pub mod compare;
pub mod error;
pub mod generator;
pub mod junit;
pub mod runner;

pub use compare::{compare, diff, equal, normalize, Comparison};
pub use error::{RunError, TestGenError, TestGenResult};
pub use generator::{combine_tests, generate_fixtures, GenerateOptions, GenerateReport, TestDef};
pub use junit::{JunitCase, JunitSuite};
pub use runner::{RunOptions, TestOutcome, TestResult, TestRunner, TestSummary};
