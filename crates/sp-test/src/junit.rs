//! JUnit XML report

use crate::error::TestGenResult;
use crate::generator::write_file;
use crate::runner::{TestOutcome, TestResult};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// `<testsuite>` element
#[derive(Debug, Clone)]
pub struct JunitSuite {
    pub name: String,
    pub tests: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
    pub time: Duration,
    /// When the run started
    pub timestamp: DateTime<Utc>,
    pub cases: Vec<JunitCase>,
}

/// `<testcase>` element
#[derive(Debug, Clone)]
pub struct JunitCase {
    pub name: String,
    pub time: Duration,
    pub failure: Option<JunitDetail>,
    pub error: Option<JunitDetail>,
}

/// Body of a `<failure>` or `<error>` element
#[derive(Debug, Clone)]
pub struct JunitDetail {
    pub message: String,
    pub kind: String,
    pub text: String,
}

impl JunitCase {
    /// Build a case from a result. `text` is the detail body, which callers
    /// may extend with the rendered SQL.
    pub fn from_result(result: &TestResult, text: String) -> Self {
        let (failure, error) = match &result.outcome {
            TestOutcome::Pass => (None, None),
            TestOutcome::Failure(_) => (
                Some(JunitDetail {
                    message: "SQL mismatch".to_string(),
                    kind: "AssertionError".to_string(),
                    text,
                }),
                None,
            ),
            TestOutcome::Error(_) => (
                None,
                Some(JunitDetail {
                    message: "Test execution error".to_string(),
                    kind: "Error".to_string(),
                    text,
                }),
            ),
        };

        Self {
            name: result.name.clone(),
            time: result.duration,
            failure,
            error,
        }
    }
}

impl JunitSuite {
    /// Build a suite, counting failures and errors from the cases.
    ///
    /// The timestamp is taken as now minus `time`.
    pub fn new(name: &str, cases: Vec<JunitCase>, time: Duration) -> Self {
        let started = chrono::Duration::from_std(time)
            .ok()
            .and_then(|elapsed| Utc::now().checked_sub_signed(elapsed))
            .unwrap_or_else(Utc::now);
        Self {
            name: name.to_string(),
            tests: cases.len(),
            failures: cases.iter().filter(|c| c.failure.is_some()).count(),
            errors: cases.iter().filter(|c| c.error.is_some()).count(),
            skipped: 0,
            time,
            timestamp: started,
            cases,
        }
    }

    /// Render as an XML document
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            xml,
            "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" time=\"{}\" timestamp=\"{}\">",
            escape_xml(&self.name),
            self.tests,
            self.failures,
            self.errors,
            self.skipped,
            seconds(self.time),
            self.timestamp.format("%Y-%m-%dT%H:%M:%S")
        );

        for case in &self.cases {
            let open = format!(
                "  <testcase name=\"{}\" time=\"{}\"",
                escape_xml(&case.name),
                seconds(case.time)
            );
            let details: Vec<(&str, &JunitDetail)> = [
                case.failure.as_ref().map(|d| ("failure", d)),
                case.error.as_ref().map(|d| ("error", d)),
            ]
            .into_iter()
            .flatten()
            .collect();

            if details.is_empty() {
                let _ = writeln!(xml, "{open}/>");
                continue;
            }

            let _ = writeln!(xml, "{open}>");
            for (tag, detail) in details {
                let _ = writeln!(
                    xml,
                    "    <{tag} message=\"{}\" type=\"{}\">{}</{tag}>",
                    escape_xml(&detail.message),
                    escape_xml(&detail.kind),
                    escape_xml(&detail.text)
                );
            }
            xml.push_str("  </testcase>\n");
        }

        xml.push_str("</testsuite>\n");
        xml
    }

    /// Write the report, creating parent directories
    pub fn write(&self, path: &Path) -> TestGenResult<()> {
        write_file(path, &self.to_xml())
    }
}

fn seconds(d: Duration) -> String {
    format!("{:.3}", d.as_secs_f64())
}

/// Escape the five XML special characters
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[path = "junit_test.rs"]
mod tests;
