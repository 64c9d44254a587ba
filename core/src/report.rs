#![deny(missing_docs)]

//! # Run Report
//!
//! Outcomes of a [`crate::Harness`] run, rendered in a `cargo test`-like
//! summary or exported as JSON.

use std::fmt;

use serde::Serialize;

use crate::error::{SuiteError, SuiteResult};

/// Final status of one test entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseStatus {
    /// The check (and every preceding hook) completed without error.
    Passed,
    /// A hook or the check returned an error or panicked.
    Failed {
        /// Failure message.
        message: String,
    },
    /// Registered as skipped; the check was never invoked.
    Skipped,
    /// Excluded by the harness filter.
    Filtered,
}

/// One test entry's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    /// Enclosing group names, outermost first.
    pub groups: Vec<String>,
    /// Entry label, e.g. `[GET] lists todos`.
    pub name: String,
    /// Final status.
    #[serde(flatten)]
    pub status: CaseStatus,
    /// Wall time spent in hooks and check.
    pub elapsed_ms: u64,
}

impl CaseOutcome {
    /// Group names and label joined with spaces, as matched by the harness filter.
    pub fn full_name(&self) -> String {
        let mut parts = self.groups.clone();
        parts.push(self.name.clone());
        parts.join(" ")
    }
}

/// Every outcome of a run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Outcomes in execution order.
    pub outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&CaseStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }

    /// Number of passed entries.
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Passed))
    }

    /// Number of failed entries.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Failed { .. }))
    }

    /// Number of skipped entries.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Skipped))
    }

    /// Number of entries excluded by the filter.
    pub fn filtered(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Filtered))
    }

    /// Total number of entries.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, CaseStatus::Failed { .. }))
    }

    /// Outcome of the entry with the given full name.
    pub fn find(&self, full_name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.full_name() == full_name)
    }

    /// Whether no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Converts a run with failures into `SuiteError::Failures`.
    pub fn ensure_success(&self) -> SuiteResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SuiteError::Failures {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }

    /// Pretty-printed JSON export.
    pub fn to_json(&self) -> SuiteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let name = outcome.full_name();
            match &outcome.status {
                CaseStatus::Passed => {
                    writeln!(f, "test {} ... ok ({} ms)", name, outcome.elapsed_ms)?
                }
                CaseStatus::Failed { message } => {
                    writeln!(f, "test {} ... FAILED ({} ms)", name, outcome.elapsed_ms)?;
                    for line in message.lines() {
                        writeln!(f, "    {}", line)?;
                    }
                }
                CaseStatus::Skipped => writeln!(f, "test {} ... skipped", name)?,
                CaseStatus::Filtered => {}
            }
        }

        let verdict = if self.is_success() { "ok" } else { "FAILED" };
        write!(
            f,
            "\ntest result: {}. {} passed; {} failed; {} skipped; {} filtered out",
            verdict,
            self.passed(),
            self.failed(),
            self.skipped(),
            self.filtered()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(name: &str, status: CaseStatus) -> CaseOutcome {
        CaseOutcome {
            groups: vec!["/todos/".into(), "GET".into()],
            name: name.into(),
            status,
            elapsed_ms: 0,
        }
    }

    fn sample() -> RunReport {
        RunReport {
            outcomes: vec![
                outcome("[GET] lists", CaseStatus::Passed),
                outcome(
                    "[GET] filters",
                    CaseStatus::Failed {
                        message: "expected 200\ngot 500".into(),
                    },
                ),
                outcome("[GET] pages", CaseStatus::Skipped),
                outcome("[GET] sorts", CaseStatus::Filtered),
            ],
        }
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.filtered(), 1);
        assert_eq!(report.total(), 4);
        assert!(!report.is_success());
    }

    #[test]
    fn test_ensure_success() {
        let err = sample().ensure_success().unwrap_err();
        assert!(matches!(
            err,
            SuiteError::Failures {
                failed: 1,
                total: 4
            }
        ));
        assert!(RunReport::default().ensure_success().is_ok());
    }

    #[test]
    fn test_display_summary() {
        let text = sample().to_string();
        assert!(text.contains("test /todos/ GET [GET] lists ... ok"));
        assert!(text.contains("test /todos/ GET [GET] filters ... FAILED"));
        assert!(text.contains("    got 500"));
        assert!(text.contains("test /todos/ GET [GET] pages ... skipped"));
        assert!(!text.contains("sorts"));
        assert!(text.ends_with("test result: FAILED. 1 passed; 1 failed; 1 skipped; 1 filtered out"));
    }

    #[test]
    fn test_json_export() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let first = &json["outcomes"][0];
        assert_eq!(first["name"], "[GET] lists");
        assert_eq!(first["status"], "passed");
        assert_eq!(json["outcomes"][1]["message"], "expected 200\ngot 500");
    }

    #[test]
    fn test_find_by_full_name() {
        let report = sample();
        let found = report.find("/todos/ GET [GET] pages").unwrap();
        assert_eq!(found.status, CaseStatus::Skipped);
        assert!(report.find("/todos/ [GET] pages").is_none());
    }
}
