//! Dated, itemized issue reports.

use chrono::{Local, NaiveDateTime};
use std::fmt;

use crate::merge::MergeOutcome;
use crate::validation::ValidationSummary;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A titled list of problems, stamped with the time it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    title: String,
    generated_at: NaiveDateTime,
    items: Vec<String>,
}

impl IssueReport {
    /// Start an empty report stamped with the current local time.
    pub fn new(title: impl Into<String>) -> Self {
        Self::at(title, Local::now().naive_local())
    }

    /// Start an empty report with an explicit timestamp.
    pub fn at(title: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            generated_at,
            items: Vec::new(),
        }
    }

    /// Report every rejected candidate of a validation pass.
    pub fn from_validation(summary: &ValidationSummary) -> Self {
        let mut report = Self::new("Found issues");
        report.extend(summary.rejected.iter().map(ToString::to_string));
        report
    }

    /// Report the error diagnostics of a failed merge.
    pub fn from_outcome(outcome: &MergeOutcome) -> Self {
        let mut report = Self::new("FAILED to merge PDF files");
        report.extend(outcome.errors().map(str::to_string));
        report
    }

    /// Add one item.
    pub fn push(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the report has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<String> for IssueReport {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

impl fmt::Display for IssueReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}]",
            self.title,
            self.generated_at.format(TIMESTAMP_FORMAT)
        )?;
        for item in &self.items {
            writeln!(f, "   • {item}")?;
        }
        Ok(())
    }
}
