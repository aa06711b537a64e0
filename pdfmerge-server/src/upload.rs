//! Multipart upload collection and per-request staging.

use axum::body::Bytes;
use axum::extract::Multipart;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::ServerResult;

/// Form field carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name.
    pub filename: String,
    /// File content.
    pub bytes: Bytes,
}

/// Read every `files` field in order. Other fields are skipped.
pub async fn read_uploads(multipart: &mut Multipart) -> ServerResult<Vec<Upload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| staged_name(uploads.len()));
        let bytes = field.bytes().await?;
        uploads.push(Upload { filename, bytes });
    }

    tracing::debug!(count = uploads.len(), "uploads received");
    Ok(uploads)
}

/// Name an upload is stored under inside a [`Staging`] directory.
pub fn staged_name(index: usize) -> String {
    format!("input_{index}.pdf")
}

/// Private scratch directory for one request. Dropping it removes the
/// directory and everything written into it.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Create a fresh directory under the system temp location.
    pub fn new() -> ServerResult<Self> {
        let dir = tempfile::Builder::new().prefix("pdfmerge-").tempdir()?;
        Ok(Self { dir })
    }

    /// Write `upload` as the `index`-th input and return its path.
    pub fn stage(&self, index: usize, upload: &Upload) -> ServerResult<PathBuf> {
        let path = self.dir.path().join(staged_name(index));
        std::fs::write(&path, &upload.bytes)?;
        Ok(path)
    }

    /// Path the merged document is written to.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("merged_output.pdf")
    }
}
