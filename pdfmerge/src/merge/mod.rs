//! PDF merge engine.
//!
//! - [`merger`]: stage-by-stage merge driver
//! - [`accumulator`]: in-progress merged document
//! - [`outcome`]: structured result of one merge call

pub mod accumulator;
pub mod merger;
pub mod outcome;

pub use accumulator::{LopdfAccumulator, PageAccumulator};
pub use merger::Merger;
pub use outcome::{Diagnostic, DiagnosticLevel, MergeFailure, MergeOutcome, MergeStage};

use std::path::{Path, PathBuf};

use crate::validation::DocumentBatch;

/// Smallest batch the engine accepts.
pub const MIN_BATCH_SIZE: usize = 2;

/// Merge `paths`, in order, into a single document at `output`.
///
/// Convenience wrapper around [`Merger::merge`] that builds the
/// [`DocumentBatch`] from the paths. Never panics and never returns an
/// error; inspect [`MergeOutcome::success`] and [`MergeOutcome::failure`].
///
/// # Examples
///
/// ```no_run
/// use pdfmerge::merge::merge_documents;
/// use std::path::Path;
///
/// let outcome = merge_documents(["a.pdf", "b.pdf"], Path::new("merged.pdf"));
/// for message in outcome.messages() {
///     println!("{message}");
/// }
/// ```
pub fn merge_documents<I, P>(paths: I, output: &Path) -> MergeOutcome
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let batch = DocumentBatch::from_paths(paths);
    Merger::new().merge(&batch, output)
}
