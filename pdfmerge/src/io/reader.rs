//! PDF reading and loading operations.
//!
//! Loading is the only place a candidate is fully parsed. The reader turns
//! lopdf failures into [`PdfMergeError`] values that name the offending file:
//! - Unparseable structure becomes [`PdfMergeError::FailedToLoadPdf`]
//! - Encrypted input becomes [`PdfMergeError::EncryptedPdf`]
//! - A document without pages becomes [`PdfMergeError::CorruptedPdf`]
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfReader;
//! use std::path::Path;
//!
//! # fn example() -> pdfmerge::Result<()> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("document.pdf"))?;
//! println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergeError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,
}

/// PDF reader used by the merge engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            let lowered = err_msg.to_lowercase();
            if lowered.contains("encrypt") || lowered.contains("password") {
                PdfMergeError::encrypted_pdf(path_buf.clone())
            } else {
                PdfMergeError::failed_to_load_pdf(path_buf.clone(), err_msg)
            }
        })?;

        if document.is_encrypted() {
            return Err(PdfMergeError::encrypted_pdf(path_buf));
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfMergeError::corrupted_pdf(path_buf, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        tracing::debug!(
            path = %path_buf.display(),
            pages = page_count,
            elapsed = ?load_time,
            "loaded document"
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
        })
    }
}
