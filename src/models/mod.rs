//! Shared data models for lint passes and their reports.

pub mod declaration;
pub mod token;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity of a diagnostic. A clean pass is the absence of diagnostics.
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single style violation with a 1-based location.
pub struct Diagnostic {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(
        rule: &'static str,
        severity: Severity,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Per-severity counts for a single file.
pub struct Counts {
    pub errors: usize,
    pub warnings: usize,
}

impl Counts {
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        let mut counts = Counts::default();
        for d in diagnostics {
            match d.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Sorted diagnostics of one lint pass plus its counts.
pub struct LintReport {
    pub file: String,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: Counts,
}

impl LintReport {
    /// Build a report from diagnostics in detection order.
    ///
    /// Ordering is by (line, column, rule id); the sort is stable so two
    /// diagnostics of one rule at the same spot keep detection order.
    pub fn new(file: impl Into<String>, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| {
            a.line
                .cmp(&b.line)
                .then(a.column.cmp(&b.column))
                .then(a.rule.cmp(b.rule))
        });
        let summary = Counts::of(&diagnostics);
        Self {
            file: file.into(),
            diagnostics,
            summary,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A path that could not be linted at all (missing, unreadable, no matches).
pub struct FileFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Totals across a multi-file run.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub files: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Lint results container for a whole run.
pub struct LintResult {
    pub reports: Vec<LintReport>,
    pub failures: Vec<FileFailure>,
    pub summary: Summary,
}

impl LintResult {
    pub fn new(mut reports: Vec<LintReport>, mut failures: Vec<FileFailure>) -> Self {
        reports.sort_by(|a, b| a.file.cmp(&b.file));
        failures.sort_by(|a, b| a.path.cmp(&b.path));
        let summary = Summary {
            errors: reports.iter().map(|r| r.summary.errors).sum(),
            warnings: reports.iter().map(|r| r.summary.warnings).sum(),
            files: reports.len(),
            failures: failures.len(),
        };
        Self {
            reports,
            failures,
            summary,
        }
    }

    /// Process exit status: 2 for file failures, 1 for error diagnostics.
    pub fn exit_code(&self) -> i32 {
        if self.summary.failures > 0 {
            2
        } else if self.summary.errors > 0 {
            1
        } else {
            0
        }
    }
}
