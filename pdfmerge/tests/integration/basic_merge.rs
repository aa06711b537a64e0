//! Integration tests for basic PDF merging operations.

use pdfmerge::merge::{LopdfAccumulator, MergeStage, Merger, PageAccumulator, merge_documents};
use pdfmerge::validation::{DocumentBatch, validate_output_path};
use tempfile::TempDir;

use crate::common::{create_pdf, page_count, page_markers};

#[test]
fn test_merge_two_single_page_pdfs_end_to_end() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);
    let b = create_pdf(dir.path(), "b.pdf", 1);

    let raw = dir.path().join("out").display().to_string();
    let target = validate_output_path(&raw).unwrap();
    assert_eq!(target.path(), dir.path().join("out.pdf"));

    let outcome = merge_documents([a, b], target.path());

    assert!(outcome.success, "merge failed: {:?}", outcome.failure);
    assert_eq!(outcome.page_count, 2);
    assert_eq!(outcome.files_merged, 2);
    assert_eq!(outcome.failed_stage, None);
    assert_eq!(page_count(target.path()), 2);
    assert_eq!(
        outcome.output_size,
        std::fs::metadata(target.path()).unwrap().len()
    );
}

#[test]
fn test_output_without_suffix_gets_pdf_appended() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);
    let b = create_pdf(dir.path(), "b.pdf", 1);
    let expected = dir.path().join("out.pdf");

    let outcome = merge_documents([a, b], &dir.path().join("out"));

    assert!(outcome.success, "merge failed: {:?}", outcome.failure);
    assert_eq!(outcome.output_path.as_deref(), Some(expected.as_path()));
    assert_eq!(page_count(&expected), 2);
    assert!(!dir.path().join("out").exists());
    assert!(outcome.messages().any(|m| m.ends_with("out.pdf")));
}

#[test]
fn test_page_order_follows_batch_order() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 2);
    let b = create_pdf(dir.path(), "b.pdf", 3);
    let output = dir.path().join("merged.pdf");

    let outcome = merge_documents([&a, &b], &output);

    assert!(outcome.success, "merge failed: {:?}", outcome.failure);
    assert_eq!(outcome.page_count, 5);
    assert_eq!(
        page_markers(&output),
        vec!["a-1", "a-2", "b-1", "b-2", "b-3"]
    );
}

#[test]
fn test_reversed_batch_reverses_pages() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 2);
    let b = create_pdf(dir.path(), "b.pdf", 1);
    let output = dir.path().join("merged.pdf");

    let outcome = merge_documents([&b, &a], &output);

    assert!(outcome.success);
    assert_eq!(page_markers(&output), vec!["b-1", "a-1", "a-2"]);
}

#[test]
fn test_three_way_merge() {
    let dir = TempDir::new().unwrap();
    let inputs = [
        create_pdf(dir.path(), "one.pdf", 1),
        create_pdf(dir.path(), "two.pdf", 2),
        create_pdf(dir.path(), "three.pdf", 1),
    ];
    let output = dir.path().join("all.pdf");

    let outcome = merge_documents(inputs.iter(), &output);

    assert!(outcome.success);
    assert_eq!(outcome.files_merged, 3);
    assert_eq!(
        page_markers(&output),
        vec!["one-1", "two-1", "two-2", "three-1"]
    );
}

#[test]
fn test_same_file_twice() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 2);
    let output = dir.path().join("twice.pdf");

    let outcome = merge_documents([&a, &a], &output);

    assert!(outcome.success);
    assert_eq!(page_markers(&output), vec!["a-1", "a-2", "a-1", "a-2"]);
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 2);
    let b = create_pdf(dir.path(), "b.pdf", 3);
    let output = dir.path().join("merged.pdf");

    let first = merge_documents([&a, &b], &output);
    let second = merge_documents([&a, &b], &output);

    assert!(first.success && second.success);
    assert_eq!(first.page_count, second.page_count);
    assert_eq!(page_count(&output), 5);
    assert_eq!(page_markers(&output), vec!["a-1", "a-2", "b-1", "b-2", "b-3"]);
}

#[test]
fn test_existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);
    let b = create_pdf(dir.path(), "b.pdf", 1);
    let output = dir.path().join("merged.pdf");
    std::fs::write(&output, b"stale contents").unwrap();

    let outcome = merge_documents([&a, &b], &output);

    assert!(outcome.success);
    assert_eq!(page_count(&output), 2);
}

#[test]
fn test_accumulator_released_after_success() {
    let dir = TempDir::new().unwrap();
    let batch = DocumentBatch::from_paths([
        create_pdf(dir.path(), "a.pdf", 1),
        create_pdf(dir.path(), "b.pdf", 1),
    ]);
    let output = dir.path().join("merged.pdf");
    let mut accumulator = LopdfAccumulator::new();

    let outcome = Merger::new().merge_with(&batch, &output, &mut accumulator);

    assert!(outcome.success);
    assert!(accumulator.is_released());
    assert!(accumulator.document().is_none());

    // A second release is a no-op
    accumulator.release();
    assert!(accumulator.is_released());
}

#[test]
fn test_diagnostics_report_progress() {
    let dir = TempDir::new().unwrap();
    let a = create_pdf(dir.path(), "a.pdf", 1);
    let b = create_pdf(dir.path(), "b.pdf", 1);
    let output = dir.path().join("merged.pdf");

    let outcome = merge_documents([&a, &b], &output);

    let messages: Vec<&str> = outcome.messages().collect();
    assert_eq!(messages[0], "Adding file 1/2: a.pdf");
    assert_eq!(messages[1], "Adding file 2/2: b.pdf");
    assert!(messages[2].starts_with("Successfully created: "));
    assert!(outcome.errors().next().is_none());
    assert_eq!(outcome.diagnostics[0].stage, MergeStage::Appending);
    assert_eq!(outcome.diagnostics[2].stage, MergeStage::Writing);
}
