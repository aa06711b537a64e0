//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to a sibling temp file, then rename)
//! - Buffered output
//! - Cleanup of partial output on failure
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfWriter;
//! use std::io::Write;
//! use std::path::Path;
//!
//! # fn example(bytes: &[u8]) -> pdfmerge::Result<()> {
//! let writer = PdfWriter::new();
//! let stats = writer.write_atomic(Path::new("output.pdf"), |sink| {
//!     sink.write_all(bytes)?;
//!     Ok(())
//! })?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{PdfMergeError, Result};
use crate::utils::format_file_size;

/// Suffix appended to the output path for the in-progress file.
pub const TEMP_SUFFIX: &str = ".pdfmerge.tmp";

const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writer that never leaves a partially written file at the output path.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    buffer_size: usize,
}

impl PdfWriter {
    /// Create a new PDF writer with default buffering.
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Temp path used while writing `path`.
    pub fn temp_path_for(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    /// Stream a document to `path` through `write`.
    ///
    /// Bytes go to `<path>.pdfmerge.tmp`, which is flushed and renamed onto
    /// `path` only after `write` succeeds. An existing file at `path` is
    /// replaced. On any failure the temp file is removed and `path` is left
    /// as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The temp file cannot be created
    /// - `write` fails
    /// - Flushing or renaming fails
    pub fn write_atomic<F>(&self, path: &Path, write: F) -> Result<WriteStatistics>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let start = Instant::now();
        let temp_path = Self::temp_path_for(path);

        let result = self.write_temp(&temp_path, write).and_then(|()| {
            std::fs::rename(&temp_path, path).map_err(|e| PdfMergeError::FailedToWrite {
                path: path.to_path_buf(),
                source: e,
            })
        });

        if let Err(err) = result {
            remove_temp(&temp_path);
            return Err(err);
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let write_time = start.elapsed();
        tracing::debug!(
            path = %path.display(),
            bytes = file_size,
            elapsed = ?write_time,
            "wrote output"
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
            output_path: path.to_path_buf(),
        })
    }

    fn write_temp<F>(&self, temp_path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let file = File::create(temp_path).map_err(|e| PdfMergeError::FailedToCreateOutput {
            path: temp_path.to_path_buf(),
            source: e,
        })?;

        let mut writer = BufWriter::with_capacity(self.buffer_size, file);
        write(&mut writer)?;

        writer
            .into_inner()
            .map_err(|e| PdfMergeError::FailedToWrite {
                path: temp_path.to_path_buf(),
                source: e.into_error(),
            })?
            .sync_all()
            .map_err(|e| PdfMergeError::FailedToWrite {
                path: temp_path.to_path_buf(),
                source: e,
            })
    }
}

fn remove_temp(temp_path: &Path) {
    match std::fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %temp_path.display(),
            error = %e,
            "failed to remove temp file"
        ),
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
