//! pdfmerge - Validate and concatenate PDF files into a single document.
//!
//! This library checks candidate files for structural PDF validity, appends
//! their pages in a deterministic order and writes the result atomically.
//! It provides:
//!
//! - Structural validation of inputs and output locations
//! - An ordered merge engine with per-stage diagnostics
//! - Atomic output writes
//! - Formatted reports for command-line callers
//!
//! # Examples
//!
//! ## Basic Merge
//!
//! ```no_run
//! use pdfmerge::merge::merge_documents;
//! use pdfmerge::validation::validate_output_path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = validate_output_path("merged")?;
//! let outcome = merge_documents(["a.pdf", "b.pdf"], target.path()).into_result()?;
//! println!("Created {} page document", outcome.page_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Individual Components
//!
//! ```no_run
//! use pdfmerge::merge::{LopdfAccumulator, Merger, PageAccumulator};
//! use pdfmerge::validation::Validator;
//! use std::path::Path;
//!
//! let summary = Validator::new().validate_files(["a.pdf", "b.pdf", "c.pdf"]);
//! for rejection in &summary.rejected {
//!     eprintln!("{rejection}");
//! }
//!
//! let mut accumulator = LopdfAccumulator::new();
//! let outcome = Merger::new().merge_with(&summary.accepted, Path::new("out.pdf"), &mut accumulator);
//! assert!(accumulator.is_released());
//! println!("{} pages", outcome.page_count);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod utils;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{Config, OverwriteMode};
pub use error::{PdfMergeError, Result};
pub use merge::{MergeFailure, MergeOutcome, merge_documents};
pub use validation::{is_valid_pdf, validate_output_path};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
