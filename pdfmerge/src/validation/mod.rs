//! Input validation for pdfmerge.
//!
//! This module classifies candidate files and output locations before any
//! merge work is attempted. The input check is deliberately structural:
//! - File existence and type
//! - `.pdf` file name suffix (case-insensitive)
//! - Non-empty content
//! - `%PDF` signature in the first four bytes
//!
//! Full parsing happens once, while appending pages during the merge.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::validation::{is_valid_pdf, validate_output_path};
//!
//! assert!(is_valid_pdf("chapter1.pdf"));
//! let target = validate_output_path("book").unwrap();
//! println!("Writing to {}", target.path().display());
//! ```

mod candidate;
mod output;

pub use candidate::{CandidateDocument, DocumentBatch};
pub use output::{OutputPathIssue, OutputPathRejection, OutputTarget, validate_output_path};

pub(crate) use candidate::display_name;
pub(crate) use output::parent_dir;

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::utils::format_file_size;

/// Leading bytes every PDF file starts with.
pub const PDF_SIGNATURE: &[u8; 4] = b"%PDF";

/// File name suffix of admissible inputs and of every output.
pub const PDF_SUFFIX: &str = ".pdf";

/// Why a candidate file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Nothing exists at the path.
    #[error("File not found: {}", .path.display())]
    NotFound {
        /// Rejected path.
        path: PathBuf,
    },

    /// The path is a directory or another non-regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Rejected path.
        path: PathBuf,
    },

    /// The file name does not end in `.pdf`.
    #[error("Not a valid PDF: {} (expected a .pdf extension)", .path.display())]
    WrongExtension {
        /// Rejected path.
        path: PathBuf,
    },

    /// The file has no content.
    #[error("Not a valid PDF: {} (file is empty)", .path.display())]
    Empty {
        /// Rejected path.
        path: PathBuf,
    },

    /// The first bytes are not `%PDF`.
    #[error("Not a valid PDF: {} (missing %PDF header)", .path.display())]
    BadSignature {
        /// Rejected path.
        path: PathBuf,
    },

    /// Metadata or content could not be read.
    #[error("Cannot read file: {} ({reason})", .path.display())]
    Unreadable {
        /// Rejected path.
        path: PathBuf,
        /// Underlying I/O error message.
        reason: String,
    },
}

impl Rejection {
    /// Path of the rejected file.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::WrongExtension { path }
            | Self::Empty { path }
            | Self::BadSignature { path }
            | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Summary of checking a list of candidate paths.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    /// Candidates that passed, in input order.
    pub accepted: DocumentBatch,

    /// Rejections, in input order.
    pub rejected: Vec<Rejection>,
}

impl ValidationSummary {
    /// Whether every candidate passed.
    pub fn all_valid(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Format the accepted files' total size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.accepted.total_size())
    }
}

/// Validator for candidate PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Check a single file and report which check failed.
    ///
    /// Performs, in order:
    /// - existence and regular-file checks
    /// - `.pdf` extension check
    /// - non-empty check
    /// - `%PDF` signature check on the first four bytes
    ///
    /// A file that disappears between checks is reported as not found.
    pub fn inspect(&self, path: &Path) -> Result<CandidateDocument, Rejection> {
        let path_buf = path.to_path_buf();

        let metadata = std::fs::metadata(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Rejection::NotFound {
                path: path_buf.clone(),
            },
            _ => Rejection::Unreadable {
                path: path_buf.clone(),
                reason: err.to_string(),
            },
        })?;

        if !metadata.is_file() {
            return Err(Rejection::NotAFile { path: path_buf });
        }

        if !has_pdf_extension(path) {
            return Err(Rejection::WrongExtension { path: path_buf });
        }

        if metadata.len() == 0 {
            return Err(Rejection::Empty { path: path_buf });
        }

        match read_signature(path) {
            Ok(true) => Ok(CandidateDocument::from_path(path_buf)),
            Ok(false) => Err(Rejection::BadSignature { path: path_buf }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Rejection::NotFound { path: path_buf })
            }
            Err(err) => Err(Rejection::Unreadable {
                path: path_buf,
                reason: err.to_string(),
            }),
        }
    }

    /// Whether `path` is admissible merge input. Never fails.
    pub fn is_valid_pdf(&self, path: &Path) -> bool {
        self.inspect(path).is_ok()
    }

    /// Check every path, keeping input order in both halves of the summary.
    pub fn validate_files<I, P>(&self, paths: I) -> ValidationSummary
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for path in paths {
            match self.inspect(path.as_ref()) {
                Ok(candidate) => accepted.push(candidate),
                Err(rejection) => {
                    tracing::debug!(%rejection, "candidate rejected");
                    rejected.push(rejection);
                }
            }
        }

        ValidationSummary {
            accepted: accepted.into_iter().collect(),
            rejected,
        }
    }
}

/// Whether `path` is admissible merge input.
///
/// Returns false, never panics or errors, for missing, unreadable, empty,
/// misnamed or wrongly signed files.
pub fn is_valid_pdf(path: impl AsRef<Path>) -> bool {
    Validator::new().is_valid_pdf(path.as_ref())
}

/// Content check for an in-memory upload: non-empty and starting with
/// `%PDF`.
///
/// The client's file name plays no part. Uploads are staged under a `.pdf`
/// name before merging, so the content alone decides.
pub fn is_valid_pdf_bytes(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_SIGNATURE)
}

/// `path` with `.pdf` appended unless its name already ends in it, ignoring
/// case.
///
/// ```
/// use pdfmerge::validation::with_pdf_suffix;
/// use std::path::Path;
///
/// assert_eq!(with_pdf_suffix(Path::new("out")), Path::new("out.pdf"));
/// assert_eq!(with_pdf_suffix(Path::new("OUT.PDF")), Path::new("OUT.PDF"));
/// ```
pub fn with_pdf_suffix(path: &Path) -> PathBuf {
    if has_pdf_suffix(&path.to_string_lossy()) {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_os_string();
    raw.push(PDF_SUFFIX);
    PathBuf::from(raw)
}

fn has_pdf_suffix(name: &str) -> bool {
    name.to_lowercase().ends_with(PDF_SUFFIX)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| has_pdf_suffix(&name.to_string_lossy()))
}

/// Read up to four bytes and compare them with the signature.
///
/// A file truncated after the size check yields a short read and is
/// reported as a mismatch.
fn read_signature(path: &Path) -> io::Result<bool> {
    let mut header = Vec::with_capacity(PDF_SIGNATURE.len());
    File::open(path)?
        .take(PDF_SIGNATURE.len() as u64)
        .read_to_end(&mut header)?;
    Ok(header == PDF_SIGNATURE)
}
