//! Integration tests for input and output validation.

use pdfmerge::validation::{OutputPathIssue, Validator, is_valid_pdf, validate_output_path};
use pdfmerge::utils::{collect_paths_for_patterns, split_path_list};
use tempfile::TempDir;

use crate::common::{create_file, create_pdf};

#[test]
fn test_generated_pdf_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = create_pdf(dir.path(), "doc.pdf", 2);

    assert!(is_valid_pdf(&path));
}

#[test]
fn test_signature_only_file_is_structurally_valid() {
    let dir = TempDir::new().unwrap();
    let path = create_file(dir.path(), "MINIMAL.PDF", b"%PDF");

    assert!(is_valid_pdf(&path));
}

#[test]
fn test_prompt_style_input_flow() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "a.pdf", 1);
    create_pdf(dir.path(), "b.pdf", 1);
    create_file(dir.path(), "c.pdf", b"not a pdf");

    let raw = format!(
        "\"{0}/a.pdf\", '{0}/b.pdf' , {0}/c.pdf, {0}/d.pdf,",
        dir.path().display()
    );
    let paths = collect_paths_for_patterns(split_path_list(&raw)).unwrap();
    let summary = Validator::new().validate_files(&paths);

    assert_eq!(paths.len(), 4);
    assert_eq!(summary.accepted.len(), 2);
    let messages: Vec<String> = summary.rejected.iter().map(ToString::to_string).collect();
    assert!(messages[0].starts_with("Not a valid PDF: "));
    assert!(messages[1].starts_with("File not found: "));
}

#[test]
fn test_glob_input_expands_in_order() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "2-second.pdf", 1);
    create_pdf(dir.path(), "1-first.pdf", 1);

    let pattern = format!("{}/*.pdf", dir.path().display());
    let paths = collect_paths_for_patterns([pattern]).unwrap();
    let summary = Validator::new().validate_files(&paths);

    let names: Vec<&str> = summary.accepted.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["1-first.pdf", "2-second.pdf"]);
}

#[test]
fn test_output_validation_then_existing_check() {
    let dir = TempDir::new().unwrap();
    create_pdf(dir.path(), "report.pdf", 1);

    let target = validate_output_path(&dir.path().join("report").display().to_string()).unwrap();
    assert!(target.exists());

    let fresh = validate_output_path(&dir.path().join("fresh.PDF").display().to_string()).unwrap();
    assert!(!fresh.exists());
    assert!(fresh.path().to_string_lossy().ends_with("fresh.PDF"));
}

#[test]
fn test_empty_output_rejected() {
    let err = validate_output_path("").unwrap_err();
    assert_eq!(err.issue, OutputPathIssue::Empty);
    assert_eq!(err.to_string(), "Output path cannot be empty");
}
