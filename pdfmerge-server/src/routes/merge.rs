//! `POST /merge-pdfs`: merge the uploads in order and return the result.

use axum::extract::Multipart;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use pdfmerge::merge::{MIN_BATCH_SIZE, merge_documents};
use pdfmerge::validation::is_valid_pdf;

use crate::error::{ServerError, ServerResult};
use crate::upload::{Staging, Upload, read_uploads};

/// Merge uploaded PDF files into a single PDF
///
/// - **Success**: 200 OK with the merged document as `application/pdf`
/// - **Error**: 400 for too few or invalid uploads, 500 when the merge
///   itself fails
pub async fn merge_pdfs(mut multipart: Multipart) -> ServerResult<Response> {
    let uploads = read_uploads(&mut multipart).await?;
    if uploads.len() < MIN_BATCH_SIZE {
        return Err(ServerError::BadRequest(
            "At least 2 PDF files required".to_string(),
        ));
    }

    let merged = tokio::task::spawn_blocking(move || merge_uploads(&uploads)).await??;

    Ok((
        [
            (CONTENT_TYPE, "application/pdf"),
            (CONTENT_DISPOSITION, "attachment; filename=\"merged.pdf\""),
        ],
        merged,
    )
        .into_response())
}

/// Stage, check and merge the uploads in a private directory that is gone
/// once this returns.
fn merge_uploads(uploads: &[Upload]) -> ServerResult<Vec<u8>> {
    let staging = Staging::new()?;

    let mut inputs = Vec::with_capacity(uploads.len());
    for (index, upload) in uploads.iter().enumerate() {
        let path = staging.stage(index, upload)?;
        if !is_valid_pdf(&path) {
            return Err(ServerError::BadRequest(format!(
                "Invalid PDF file: {}",
                upload.filename
            )));
        }
        inputs.push(path);
    }

    let output = staging.output_path();
    let outcome = merge_documents(inputs, &output);
    if let Some(failure) = outcome.failure {
        return Err(failure.into());
    }

    tracing::info!(
        files = outcome.files_merged,
        pages = outcome.page_count,
        bytes = outcome.output_size,
        "merged uploads"
    );
    Ok(std::fs::read(&output)?)
}
