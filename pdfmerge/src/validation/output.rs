//! Output path normalization and writability checks.

use std::path::{Path, PathBuf};

use crate::utils::strip_quotes;
use crate::validation::with_pdf_suffix;

const PROBE_PREFIX: &str = ".pdfmerge-probe-";

/// A normalized output location whose parent directory exists and accepted
/// a write probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Normalized path, always ending in `.pdf`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a file already exists at the target.
    ///
    /// Overwrite policy belongs to the caller; the merge engine always
    /// overwrites.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Consume the target, returning the path.
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

/// Which output path check failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputPathIssue {
    /// Nothing left after trimming whitespace and quotes.
    #[error("Output path cannot be empty")]
    Empty,

    /// The parent directory was missing and could not be created.
    #[error("Cannot create directory: {} ({reason})", .dir.display())]
    CannotCreateDirectory {
        /// Directory that could not be created.
        dir: PathBuf,
        /// Underlying reason.
        reason: String,
    },

    /// The parent directory rejected the write probe.
    #[error("Output directory is not writable: {} ({reason})", .dir.display())]
    NotWritable {
        /// Directory that rejected the probe.
        dir: PathBuf,
        /// Underlying reason.
        reason: String,
    },
}

/// A rejected output path, carrying the path as normalized so far.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{issue}")]
pub struct OutputPathRejection {
    /// Normalized path (empty when the input was empty).
    pub path: PathBuf,
    /// The failed check.
    pub issue: OutputPathIssue,
}

/// Normalize a caller-supplied output path and make sure it can be written.
///
/// Trims whitespace and surrounding quotes, appends `.pdf` when missing
/// (case-insensitive), creates the parent directory and probes it for
/// writability with a temporary file that is removed again. The output file
/// itself is never created here.
///
/// # Examples
///
/// ```no_run
/// use pdfmerge::validation::validate_output_path;
///
/// let target = validate_output_path(" 'report' ").unwrap();
/// assert_eq!(target.path().to_str(), Some("report.pdf"));
/// ```
pub fn validate_output_path(raw: &str) -> Result<OutputTarget, OutputPathRejection> {
    let clean = strip_quotes(raw);
    if clean.is_empty() {
        return Err(OutputPathRejection {
            path: PathBuf::new(),
            issue: OutputPathIssue::Empty,
        });
    }

    let path = with_pdf_suffix(Path::new(clean));

    let dir = parent_dir(&path);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        return Err(OutputPathRejection {
            issue: OutputPathIssue::CannotCreateDirectory {
                dir,
                reason: err.to_string(),
            },
            path,
        });
    }

    if let Err(err) = probe_writable(&dir) {
        return Err(OutputPathRejection {
            issue: OutputPathIssue::NotWritable {
                dir,
                reason: err.to_string(),
            },
            path,
        });
    }

    tracing::debug!(path = %path.display(), "output path accepted");
    Ok(OutputTarget { path })
}

/// Directory that will contain `path`; `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Create and immediately remove a uniquely named file inside `dir`.
fn probe_writable(dir: &Path) -> std::io::Result<()> {
    let probe = tempfile::Builder::new()
        .prefix(PROBE_PREFIX)
        .tempfile_in(dir)?;
    probe.close()
}
