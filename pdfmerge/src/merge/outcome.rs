//! Merge outcome, stages and diagnostics.
//!
//! Every call into the merge engine produces exactly one [`MergeOutcome`].
//! Failures are not returned as `Err`; they are recorded as a
//! [`MergeFailure`] together with the stage that produced them, so callers
//! always receive the ordered diagnostics collected up to that point.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::merge::MIN_BATCH_SIZE;
use crate::utils::format_file_size;

/// Stage of a single merge invocation.
///
/// A call moves `Idle -> Validating -> Appending -> Writing -> Done`; a
/// failure in any of `Validating`, `Appending` or `Writing` ends it in
/// `Done` with that stage recorded as the failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStage {
    /// Nothing has happened yet.
    Idle,
    /// Checking batch size, inputs and output directory.
    Validating,
    /// Appending pages from each input to the accumulator.
    Appending,
    /// Serializing the accumulator to the output path.
    Writing,
    /// Terminal stage.
    Done,
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Appending => "appending",
            Self::Writing => "writing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Discriminated reason a merge attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MergeFailure {
    /// Fewer than two documents were supplied.
    #[error("Need at least {min} PDF files to merge, got {provided}", min = MIN_BATCH_SIZE)]
    InsufficientInputs {
        /// Number of documents in the rejected batch.
        provided: usize,
    },

    /// A candidate failed the existence, extension or signature check.
    #[error("'{name}' is not a valid PDF file")]
    InvalidInput {
        /// Display name of the rejected candidate.
        name: String,
    },

    /// The output directory could not be created.
    #[error("Cannot create output directory {}: {reason}", .path.display())]
    OutputPathError {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// A candidate could not be merged in during deep processing.
    #[error("Error adding '{name}': {cause}")]
    AppendFailure {
        /// Display name of the candidate.
        name: String,
        /// Underlying cause.
        cause: String,
    },

    /// Serializing the merged document failed.
    #[error("Error writing output file {}: {cause}", .path.display())]
    WriteFailure {
        /// Output path that was being written.
        path: PathBuf,
        /// Underlying cause.
        cause: String,
    },

    /// A fault that none of the other variants classify.
    #[error("Unexpected error during merge: {message}")]
    Unexpected {
        /// Description of the fault.
        message: String,
    },
}

impl MergeFailure {
    /// Whether the failure was caused by the caller's input (4xx) rather
    /// than by processing or the environment (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInputs { .. } | Self::InvalidInput { .. }
        )
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InsufficientInputs { .. } => 1,
            Self::InvalidInput { .. } => 2,
            Self::AppendFailure { .. } => 3,
            Self::OutputPathError { .. } => 5,
            Self::WriteFailure { .. } => 5,
            Self::Unexpected { .. } => 6,
        }
    }
}

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Progress information.
    Info,
    /// A failure explanation.
    Error,
}

/// One entry of a merge outcome's ordered diagnostic list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity.
    pub level: DiagnosticLevel,
    /// Stage that emitted the message.
    pub stage: MergeStage,
    /// Human-readable message.
    pub message: String,
}

/// Result of one merge invocation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    /// Whether the merged document was written.
    pub success: bool,

    /// Path of the written document, set on success only.
    pub output_path: Option<PathBuf>,

    /// Size of the written document in bytes (0 on failure).
    pub output_size: u64,

    /// Number of pages in the written document (0 on failure).
    pub page_count: usize,

    /// Number of input documents appended.
    pub files_merged: usize,

    /// Stage in which the call failed, if it failed.
    pub failed_stage: Option<MergeStage>,

    /// Why the call failed, if it failed.
    pub failure: Option<MergeFailure>,

    /// Ordered per-file and per-stage messages.
    pub diagnostics: Vec<Diagnostic>,
}

impl MergeOutcome {
    /// Iterate over diagnostic messages in emission order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().map(|d| d.message.as_str())
    }

    /// Iterate over error-level diagnostic messages.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .map(|d| d.message.as_str())
    }

    /// Format the output size as a human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }

    /// Convert into a `Result`, turning a failed outcome into
    /// [`PdfMergeError::Merge`](crate::PdfMergeError::Merge).
    pub fn into_result(self) -> crate::Result<Self> {
        match self.failure {
            Some(failure) => Err(failure.into()),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(MergeFailure::InsufficientInputs { provided: 0 }.is_client_error());
        assert!(
            MergeFailure::InvalidInput {
                name: "a.pdf".into()
            }
            .is_client_error()
        );
        assert!(
            !MergeFailure::WriteFailure {
                path: PathBuf::from("out.pdf"),
                cause: "disk full".into(),
            }
            .is_client_error()
        );
        assert!(
            !MergeFailure::AppendFailure {
                name: "a.pdf".into(),
                cause: "broken xref".into(),
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_failure_messages() {
        let msg = MergeFailure::InsufficientInputs { provided: 1 }.to_string();
        assert!(msg.contains("at least 2"));
        assert!(msg.contains("got 1"));

        let msg = MergeFailure::AppendFailure {
            name: "scan.pdf".into(),
            cause: "invalid file header".into(),
        }
        .to_string();
        assert_eq!(msg, "Error adding 'scan.pdf': invalid file header");
    }

    #[test]
    fn test_failure_serializes_with_kind_tag() {
        let value = serde_json::to_value(MergeFailure::InvalidInput {
            name: "notes.pdf".into(),
        })
        .unwrap();
        assert_eq!(value["kind"], "invalid_input");
        assert_eq!(value["name"], "notes.pdf");
    }

    #[test]
    fn test_into_result() {
        let outcome = MergeOutcome {
            success: false,
            output_path: None,
            output_size: 0,
            page_count: 0,
            files_merged: 0,
            failed_stage: Some(MergeStage::Validating),
            failure: Some(MergeFailure::InsufficientInputs { provided: 1 }),
            diagnostics: vec![],
        };
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(MergeStage::Appending.to_string(), "appending");
        assert_eq!(MergeStage::Done.to_string(), "done");
    }
}
