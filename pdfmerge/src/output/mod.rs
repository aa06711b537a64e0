//! Output formatting and display for pdfmerge.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - File listings with sizes
//! - Dated issue reports
//! - Merge result summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::output::{OutputFormatter, display_outcome};
//! use pdfmerge::merge::merge_documents;
//! use std::path::Path;
//!
//! let formatter = OutputFormatter::new(false, false);
//! let outcome = merge_documents(["a.pdf", "b.pdf"], Path::new("merged.pdf"));
//! display_outcome(&formatter, &outcome);
//! ```

pub mod formatter;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter};
pub use report::IssueReport;

use crate::merge::{DiagnosticLevel, MergeOutcome};
use crate::utils::size_kb;
use crate::validation::{DocumentBatch, display_name};

/// Lines describing a batch: one per file with its size, then the total.
pub fn batch_lines(batch: &DocumentBatch) -> Vec<String> {
    let mut lines: Vec<String> = batch
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("{}. {} ({} KB)", i + 1, doc.name(), doc.size_kb()))
        .collect();
    lines.push(format!("Total size: {} KB", size_kb(batch.total_size())));
    lines
}

/// Display the files about to be merged.
pub fn display_batch(formatter: &OutputFormatter, batch: &DocumentBatch) {
    formatter.success(&format!("Found {} valid PDF files:", batch.len()));
    for line in batch_lines(batch) {
        formatter.info(&format!("   {line}"));
    }
}

/// Display a merge outcome.
///
/// Info diagnostics are shown as progress, errors are always shown. A
/// successful merge ends with the created file's name, size and location; a
/// failed one with a dated report of what went wrong.
pub fn display_outcome(formatter: &OutputFormatter, outcome: &MergeOutcome) {
    for diagnostic in &outcome.diagnostics {
        match diagnostic.level {
            DiagnosticLevel::Info => formatter.info(&diagnostic.message),
            DiagnosticLevel::Error => formatter.debug(&format!(
                "[{}] {}",
                diagnostic.stage, diagnostic.message
            )),
        }
    }

    match (&outcome.output_path, outcome.success) {
        (Some(path), true) => {
            formatter.blank_line();
            formatter.success("SUCCESS!");
            formatter.info(&format!("Created:  {}", display_name(path)));
            formatter.info(&format!("Size:     {} KB", size_kb(outcome.output_size)));
            formatter.info(&format!("Pages:    {}", outcome.page_count));
            let location = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            formatter.info(&format!("Location: {}", location.display()));
        }
        _ => {
            formatter.blank_line();
            formatter.block(&IssueReport::from_outcome(outcome).to_string());
        }
    }
}
