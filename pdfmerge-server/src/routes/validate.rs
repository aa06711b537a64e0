//! `POST /validate-files`: report which uploads are mergeable without
//! merging anything.

use axum::Json;
use axum::extract::Multipart;
use pdfmerge::utils::size_kb;
use pdfmerge::validation::is_valid_pdf_bytes;
use serde::Serialize;

use crate::error::{ServerError, ServerResult};
use crate::upload::{Upload, read_uploads};

/// Verdict for one upload.
#[derive(Debug, Clone, Serialize)]
pub struct FileValidation {
    pub filename: String,
    pub is_valid: bool,
    pub size: usize,
    pub size_kb: f64,
    pub error: Option<&'static str>,
}

impl FileValidation {
    fn check(upload: &Upload) -> Self {
        let is_valid = is_valid_pdf_bytes(&upload.bytes);
        Self {
            filename: upload.filename.clone(),
            is_valid,
            size: upload.bytes.len(),
            size_kb: size_kb(upload.bytes.len() as u64),
            error: (!is_valid).then_some("Invalid PDF file"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    pub files: Vec<FileValidation>,
}

/// Validate uploaded files, in upload order.
///
/// An upload passes when its content starts with the `%PDF` signature. The
/// client file name is reported back but not judged, matching how
/// `/merge-pdfs` stages uploads under its own `.pdf` names.
pub async fn validate_files(mut multipart: Multipart) -> ServerResult<Json<ValidationResponse>> {
    let uploads = read_uploads(&mut multipart).await?;
    if uploads.is_empty() {
        return Err(ServerError::BadRequest("No files uploaded".to_string()));
    }

    let files = uploads.iter().map(FileValidation::check).collect();
    Ok(Json(ValidationResponse { files }))
}
