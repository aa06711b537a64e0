//! Integration tests for merge failures.

use pdfmerge::merge::{LopdfAccumulator, MergeFailure, MergeStage, Merger, PageAccumulator, merge_documents};
use pdfmerge::validation::DocumentBatch;
use pdfmerge::PdfMergeError;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{create_file, create_pdf};

#[rstest]
#[case(0)]
#[case(1)]
fn test_insufficient_inputs(#[case] count: usize) {
    let dir = TempDir::new().unwrap();
    let inputs: Vec<PathBuf> = (0..count)
        .map(|i| create_pdf(dir.path(), &format!("in{i}.pdf"), 1))
        .collect();
    let output = dir.path().join("merged.pdf");

    let outcome = merge_documents(inputs, &output);

    assert!(!outcome.success);
    assert_eq!(
        outcome.failure,
        Some(MergeFailure::InsufficientInputs { provided: count })
    );
    assert_eq!(outcome.failed_stage, Some(MergeStage::Validating));
    assert!(outcome.output_path.is_none());
    assert!(!output.exists());
}

#[rstest]
#[case("missing.pdf", None)]
#[case("notes.txt", Some(b"%PDF-1.4 but wrong name".as_slice()))]
#[case("empty.pdf", Some(b"".as_slice()))]
#[case("image.pdf", Some(b"\x89PNG\r\n".as_slice()))]
fn test_invalid_entry_stops_before_output(#[case] name: &str, #[case] content: Option<&[u8]>) {
    let dir = TempDir::new().unwrap();
    let good = create_pdf(dir.path(), "good.pdf", 1);
    let bad = match content {
        Some(bytes) => create_file(dir.path(), name, bytes),
        None => dir.path().join(name),
    };
    let output = dir.path().join("merged.pdf");

    let outcome = merge_documents([good, bad], &output);

    assert_eq!(
        outcome.failure,
        Some(MergeFailure::InvalidInput { name: name.into() })
    );
    assert_eq!(outcome.files_merged, 0);
    assert!(!output.exists());
    assert!(outcome.errors().count() >= 1);
}

#[test]
fn test_corrupt_body_is_append_failure() {
    let dir = TempDir::new().unwrap();
    let good = create_pdf(dir.path(), "good.pdf", 1);
    let corrupt = create_file(
        dir.path(),
        "corrupt.pdf",
        b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog /Pages 7 0 R\ngarbage",
    );
    let output = dir.path().join("merged.pdf");
    let mut accumulator = LopdfAccumulator::new();

    let outcome = Merger::new().merge_with(
        &DocumentBatch::from_paths([good, corrupt]),
        &output,
        &mut accumulator,
    );

    assert!(matches!(
        outcome.failure,
        Some(MergeFailure::AppendFailure { ref name, .. }) if name == "corrupt.pdf"
    ));
    assert_eq!(outcome.failed_stage, Some(MergeStage::Appending));
    assert_eq!(outcome.files_merged, 1);
    assert!(accumulator.is_released());
    assert!(!output.exists());
}

#[test]
fn test_output_directory_blocked_by_file() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);
    let b = create_pdf(dir.path(), "b.pdf", 1);
    let blocker = create_file(dir.path(), "blocker", b"a file, not a directory");
    let output = blocker.join("merged.pdf");

    let outcome = merge_documents([a, b], &output);

    assert!(matches!(
        outcome.failure,
        Some(MergeFailure::OutputPathError { .. })
    ));
    assert_eq!(outcome.failed_stage, Some(MergeStage::Validating));
}

#[test]
fn test_failure_converts_to_error() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);

    let err = merge_documents([a], &dir.path().join("merged.pdf"))
        .into_result()
        .unwrap_err();

    assert!(matches!(err, PdfMergeError::Merge(MergeFailure::InsufficientInputs { provided: 1 })));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_failure_outcome_serializes() {
    let dir = TempDir::new().unwrap();
    let outcome = merge_documents(Vec::<PathBuf>::new(), &dir.path().join("merged.pdf"));

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["failed_stage"], "validating");
    assert_eq!(json["failure"]["kind"], "insufficient_inputs");
    assert_eq!(json["failure"]["provided"], 0);
}
