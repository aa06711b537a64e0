//! Core PDF merging implementation.
//!
//! [`Merger`] drives one merge call through its stages, appending each
//! candidate's pages in batch order and writing the result atomically.
//! Every call returns a [`MergeOutcome`]; no error or panic escapes.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::PdfMergeError;
use crate::io::{PdfReader, PdfWriter, WriteStatistics};
use crate::merge::accumulator::{LopdfAccumulator, PageAccumulator};
use crate::merge::outcome::{Diagnostic, DiagnosticLevel, MergeFailure, MergeOutcome, MergeStage};
use crate::merge::MIN_BATCH_SIZE;
use crate::validation::{DocumentBatch, Validator, parent_dir, with_pdf_suffix};

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    /// Structural checks repeated before any page is appended.
    validator: Validator,

    /// Reader for loading PDFs.
    reader: PdfReader,

    /// Writer for the merged output.
    writer: PdfWriter,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `batch` into `output` using a fresh [`LopdfAccumulator`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::Merger;
    /// # use pdfmerge::validation::DocumentBatch;
    /// # use std::path::Path;
    /// let batch = DocumentBatch::from_paths(["a.pdf", "b.pdf"]);
    /// let outcome = Merger::new().merge(&batch, Path::new("merged.pdf"));
    /// if outcome.success {
    ///     println!("Merged {} files into {} pages", outcome.files_merged, outcome.page_count);
    /// }
    /// ```
    pub fn merge(&self, batch: &DocumentBatch, output: &Path) -> MergeOutcome {
        let mut accumulator = LopdfAccumulator::new();
        self.merge_with(batch, output, &mut accumulator)
    }

    /// Merge `batch` into `output` through a caller-supplied accumulator.
    ///
    /// `.pdf` is appended to `output` when its name lacks it. The accumulator
    /// is released before this returns, whatever the outcome. An existing
    /// file at the output is replaced on success and left untouched on
    /// failure.
    pub fn merge_with<A>(
        &self,
        batch: &DocumentBatch,
        output: &Path,
        accumulator: &mut A,
    ) -> MergeOutcome
    where
        A: PageAccumulator + ?Sized,
    {
        let mut run = MergeRun::new(batch.len());
        let output = with_pdf_suffix(output);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(batch, &output, &mut *accumulator, &mut run)
        }));
        accumulator.release();

        match result {
            Ok(Ok(stats)) => run.succeed(stats),
            Ok(Err(failure)) => run.fail(failure),
            Err(payload) => run.fail(MergeFailure::Unexpected {
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    fn run_stages<A>(
        &self,
        batch: &DocumentBatch,
        output: &Path,
        accumulator: &mut A,
        run: &mut MergeRun,
    ) -> Result<(WriteStatistics, usize), MergeFailure>
    where
        A: PageAccumulator + ?Sized,
    {
        run.enter(MergeStage::Validating);

        if batch.len() < MIN_BATCH_SIZE {
            return Err(MergeFailure::InsufficientInputs {
                provided: batch.len(),
            });
        }

        for candidate in batch {
            if let Err(rejection) = self.validator.inspect(candidate.path()) {
                run.error(rejection.to_string());
                return Err(MergeFailure::InvalidInput {
                    name: candidate.name().to_string(),
                });
            }
        }

        let dir = parent_dir(output);
        std::fs::create_dir_all(&dir).map_err(|err| MergeFailure::OutputPathError {
            path: dir.clone(),
            reason: err.to_string(),
        })?;

        run.enter(MergeStage::Appending);

        let total = batch.len();
        for (index, candidate) in batch.iter().enumerate() {
            run.info(format!(
                "Adding file {}/{}: {}",
                index + 1,
                total,
                candidate.name()
            ));

            let append_failure = |err: PdfMergeError| MergeFailure::AppendFailure {
                name: candidate.name().to_string(),
                cause: failure_cause(&err),
            };

            let loaded = self
                .reader
                .load(candidate.path())
                .map_err(append_failure)?;
            let pages = accumulator
                .append(loaded.document)
                .map_err(append_failure)?;

            run.files_merged += 1;
            tracing::debug!(file = candidate.name(), pages, "appended document");
        }

        run.enter(MergeStage::Writing);

        let page_count = accumulator.page_count();
        let stats = self
            .writer
            .write_atomic(output, |sink| accumulator.serialize_into(sink))
            .map_err(|err| MergeFailure::WriteFailure {
                path: output.to_path_buf(),
                cause: failure_cause(&err),
            })?;

        run.info(format!("Successfully created: {}", output.display()));
        Ok((stats, page_count))
    }
}

/// Bookkeeping for a single merge call.
struct MergeRun {
    stage: MergeStage,
    batch_len: usize,
    files_merged: usize,
    diagnostics: Vec<Diagnostic>,
}

impl MergeRun {
    fn new(batch_len: usize) -> Self {
        Self {
            stage: MergeStage::Idle,
            batch_len,
            files_merged: 0,
            diagnostics: Vec::new(),
        }
    }

    fn enter(&mut self, stage: MergeStage) {
        tracing::debug!(from = %self.stage, to = %stage, "merge stage");
        self.stage = stage;
    }

    fn info(&mut self, message: String) {
        tracing::info!("{message}");
        self.push(DiagnosticLevel::Info, message);
    }

    fn error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.push(DiagnosticLevel::Error, message);
    }

    fn push(&mut self, level: DiagnosticLevel, message: String) {
        self.diagnostics.push(Diagnostic {
            level,
            stage: self.stage,
            message,
        });
    }

    fn succeed(mut self, (stats, page_count): (WriteStatistics, usize)) -> MergeOutcome {
        self.enter(MergeStage::Done);

        MergeOutcome {
            success: true,
            output_path: Some(stats.output_path),
            output_size: stats.file_size,
            page_count,
            files_merged: self.files_merged,
            failed_stage: None,
            failure: None,
            diagnostics: self.diagnostics,
        }
    }

    fn fail(mut self, failure: MergeFailure) -> MergeOutcome {
        let failed_stage = self.stage;
        self.error(failure.to_string());
        tracing::warn!(
            stage = %failed_stage,
            files = self.batch_len,
            kind = ?failure,
            "merge failed"
        );
        self.enter(MergeStage::Done);

        MergeOutcome {
            success: false,
            output_path: None,
            output_size: 0,
            page_count: 0,
            files_merged: self.files_merged,
            failed_stage: Some(failed_stage),
            failure: Some(failure),
            diagnostics: self.diagnostics,
        }
    }
}

/// Short cause text for a failure message, without the path the message
/// already names.
fn failure_cause(err: &PdfMergeError) -> String {
    match err {
        PdfMergeError::FailedToLoadPdf { reason, .. } => reason.clone(),
        PdfMergeError::CorruptedPdf { details, .. } => details.clone(),
        PdfMergeError::EncryptedPdf { .. } => "PDF is encrypted".to_string(),
        PdfMergeError::FailedToCreateOutput { source, .. }
        | PdfMergeError::FailedToWrite { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic while processing PDF".to_string()
    }
}
