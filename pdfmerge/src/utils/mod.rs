//! Utilities for path lists, size formatting, etc.

use std::path::PathBuf;

use crate::{Result, error::PdfMergeError};

/// Characters that make an entry a glob pattern rather than a literal path.
const GLOB_META: &[char] = &['*', '?', '['];

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Size in KiB rounded to one decimal place.
pub fn size_kb(size: u64) -> f64 {
    (size as f64 / 1024.0 * 10.0).round() / 10.0
}

/// Trim whitespace and one layer of surrounding `"` or `'` quotes.
///
/// Drag-and-drop into a terminal often wraps paths in quotes.
pub fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

/// Split a comma-separated list of paths, dropping empty entries.
///
/// ```
/// use pdfmerge::utils::split_path_list;
///
/// let paths = split_path_list(r#" a.pdf, "my docs/b.pdf" ,,'c.pdf'"#);
/// assert_eq!(paths, vec!["a.pdf", "my docs/b.pdf", "c.pdf"]);
/// ```
pub fn split_path_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(strip_quotes)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Expand glob patterns into filesystem paths, keeping order.
///
/// Entries without glob metacharacters are passed through untouched, as are
/// patterns that match nothing, so the caller can report them as missing.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        if !pattern.contains(GLOB_META) {
            resolved_paths.push(PathBuf::from(pattern));
            continue;
        }

        let matches = collect_paths_for_pattern(pattern)?;
        if matches.is_empty() {
            resolved_paths.push(PathBuf::from(pattern));
        } else {
            resolved_paths.extend(matches);
        }
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfMergeError::Other {
        message: format!("Invalid pattern '{pattern}': {err}"),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfMergeError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}
