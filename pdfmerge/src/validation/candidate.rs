//! Candidate documents and ordered batches.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::utils::{format_file_size, size_kb};

/// A reference to an input file plus cached filesystem metadata.
///
/// Built once from the path; the cached fields are not refreshed, so a
/// candidate describes the file as it was when it was inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateDocument {
    path: PathBuf,
    name: String,
    size: u64,
    exists: bool,
}

impl CandidateDocument {
    /// Inspect `path` and cache its size, display name and existence.
    ///
    /// Never fails: a path that cannot be stat'ed is recorded with
    /// `exists == false` and a size of zero.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (exists, size) = match std::fs::metadata(&path) {
            Ok(metadata) => (true, metadata.len()),
            Err(_) => (false, 0),
        };
        let name = display_name(&path);

        Self {
            path,
            name,
            size,
            exists,
        }
    }

    /// Path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes at inspection time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size in KiB rounded to one decimal.
    pub fn size_kb(&self) -> f64 {
        size_kb(self.size)
    }

    /// Whether the path existed at inspection time.
    pub fn exists(&self) -> bool {
        self.exists
    }
}

/// File name component of `path`, or the whole path when it has none.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Ordered sequence of candidates for one merge call.
///
/// Order is significant: pages appear in the output in exactly this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentBatch {
    documents: Vec<CandidateDocument>,
}

impl DocumentBatch {
    /// Build a batch from paths, inspecting each one.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .map(CandidateDocument::from_path)
            .collect()
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate in batch order.
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateDocument> {
        self.documents.iter()
    }

    /// Sum of cached sizes.
    pub fn total_size(&self) -> u64 {
        self.documents.iter().map(CandidateDocument::size).sum()
    }

    /// Format the total size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size())
    }
}

impl FromIterator<CandidateDocument> for DocumentBatch {
    fn from_iter<T: IntoIterator<Item = CandidateDocument>>(iter: T) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DocumentBatch {
    type Item = &'a CandidateDocument;
    type IntoIter = std::slice::Iter<'a, CandidateDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
