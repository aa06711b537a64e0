//! In-progress merged document.
//!
//! The first appended document becomes the base. Every later document is
//! renumbered past the base's highest object id, its pages are re-parented
//! under the base's root `Pages` node, and its own catalog and page-tree
//! nodes are dropped.

use lopdf::{Document, Object, ObjectId};
use std::io::Write;

use crate::error::{PdfMergeError, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page trees deeper than this are treated as malformed.
const MAX_TREE_DEPTH: usize = 64;

/// Transient merged-document state owned by one merge call.
///
/// Release must be idempotent; implementations also release on drop so the
/// state is discarded on every exit path.
pub trait PageAccumulator {
    /// Append every page of `document` in page order. Returns the number of
    /// pages appended.
    fn append(&mut self, document: Document) -> Result<usize>;

    /// Pages accumulated so far.
    fn page_count(&self) -> usize;

    /// Serialize the merged document.
    fn serialize_into(&mut self, writer: &mut dyn Write) -> Result<()>;

    /// Discard the accumulated state. Safe to call more than once.
    fn release(&mut self);

    /// Whether [`release`](Self::release) has run.
    fn is_released(&self) -> bool;
}

/// [`PageAccumulator`] backed by a [`lopdf::Document`].
#[derive(Debug, Default)]
pub struct LopdfAccumulator {
    merged: Option<Document>,
    page_count: usize,
    released: bool,
}

impl LopdfAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The merged document, if anything has been appended and the
    /// accumulator is still live.
    pub fn document(&self) -> Option<&Document> {
        self.merged.as_ref()
    }
}

impl PageAccumulator for LopdfAccumulator {
    fn append(&mut self, document: Document) -> Result<usize> {
        if self.released {
            return Err(PdfMergeError::other("accumulator already released"));
        }

        let appended = match self.merged.as_mut() {
            Some(merged) => absorb(merged, document)?,
            None => {
                let mut document = document;
                inline_root_kids(&mut document)?;
                let pages = document.get_pages().len();
                if pages == 0 {
                    return Err(PdfMergeError::other("document has no pages"));
                }
                self.merged = Some(document);
                pages
            }
        };

        self.page_count += appended;
        Ok(appended)
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    fn serialize_into(&mut self, writer: &mut dyn Write) -> Result<()> {
        if self.released {
            return Err(PdfMergeError::other("accumulator already released"));
        }
        let merged = self
            .merged
            .as_mut()
            .ok_or_else(|| PdfMergeError::other("nothing to write"))?;

        let mut sink = writer;
        merged.save_to(&mut sink)?;
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.merged = None;
        self.page_count = 0;
        self.released = true;
        tracing::trace!("accumulator released");
    }

    fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for LopdfAccumulator {
    fn drop(&mut self) {
        self.release();
    }
}

/// Merge all pages of `source` into `merged`, returning the page count.
fn absorb(merged: &mut Document, mut source: Document) -> Result<usize> {
    let root_pages = root_pages_id(merged)?;

    source.renumber_objects_with(merged.max_id + 1);
    inline_root_kids(&mut source)?;

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(PdfMergeError::other("document has no pages"));
    }

    for &page_id in &page_ids {
        let inherited: Vec<(&[u8], Object)> = {
            let page = source.get_dictionary(page_id)?;
            INHERITABLE_KEYS
                .iter()
                .filter(|key| !page.has(key))
                .filter_map(|key| inherited_attribute(&source, page_id, key).map(|v| (*key, v)))
                .collect()
        };

        let page = source.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
        page.set("Parent", root_pages);
    }

    for id in tree_scaffolding(&source) {
        source.objects.remove(&id);
    }

    merged.max_id = merged.max_id.max(source.max_id);
    merged.objects.extend(std::mem::take(&mut source.objects));

    let pages = merged.get_dictionary_mut(root_pages)?;
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    match pages.get_mut(b"Kids") {
        Ok(Object::Array(kids)) => kids.extend(page_ids.iter().copied().map(Object::Reference)),
        _ => return Err(PdfMergeError::other("root Pages node has no Kids array")),
    }
    pages.set("Count", count + page_ids.len() as i64);

    if version_key(&source.version) > version_key(&merged.version) {
        merged.version = std::mem::take(&mut source.version);
    }

    Ok(page_ids.len())
}

/// Id of the root `Pages` node referenced by the catalog.
fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfMergeError::other(format!("missing root Pages node: {e}")))
}

/// Replace an indirect `Kids` array on the root `Pages` node with the array
/// itself. Returns the root node's id.
fn inline_root_kids(doc: &mut Document) -> Result<ObjectId> {
    let root_pages = root_pages_id(doc)?;

    let kids_id = match doc.get_dictionary(root_pages)?.get(b"Kids") {
        Ok(Object::Reference(id)) => *id,
        _ => return Ok(root_pages),
    };
    let kids = doc.get_object(kids_id)?.as_array()?.clone();
    doc.get_dictionary_mut(root_pages)?.set("Kids", kids);
    doc.objects.remove(&kids_id);

    Ok(root_pages)
}

/// Nearest value of `key` on an ancestor of `page_id`.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = parent_of(doc, page_id);

    for _ in 0..MAX_TREE_DEPTH {
        let node_id = current?;
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        current = parent_of(doc, node_id);
    }

    None
}

fn parent_of(doc: &Document, id: ObjectId) -> Option<ObjectId> {
    doc.get_dictionary(id)
        .and_then(|dict| dict.get(b"Parent"))
        .and_then(Object::as_reference)
        .ok()
}

/// Catalog and intermediate page-tree nodes of a source document.
fn tree_scaffolding(doc: &Document) -> Vec<ObjectId> {
    let mut ids: Vec<ObjectId> = doc
        .objects
        .iter()
        .filter(|(_, object)| {
            object
                .as_dict()
                .and_then(|dict| dict.get(b"Type"))
                .and_then(Object::as_name)
                .is_ok_and(|name| name == b"Pages" || name == b"Catalog")
        })
        .map(|(id, _)| *id)
        .collect();

    let root = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .ok()
        .filter(|root| !ids.contains(root));
    ids.extend(root);

    ids
}

/// Orderable form of a `major.minor` version string.
fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}
