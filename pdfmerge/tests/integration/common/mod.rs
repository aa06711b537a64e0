//! Shared helpers for the integration tests.
//!
//! Fixtures are generated on the fly: each page's content stream draws a
//! `"{label}-{n}"` marker so page order can be asserted after a merge.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};

/// Write an `pages`-page PDF named `name` into `dir` and return its path.
///
/// The marker label is the file stem.
pub fn create_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let label = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let kids: Vec<Object> = (1..=pages)
        .map(|n| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("{label}-{n}"))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("failed to save fixture");
    path
}

/// Write arbitrary bytes to `name` inside `dir`.
pub fn create_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

/// Page markers of the PDF at `path`, in page order.
pub fn page_markers(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("failed to reload output");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let raw = doc.get_page_content(page_id).expect("page has no content");
            Content::decode(&raw)
                .expect("undecodable content stream")
                .operations
                .into_iter()
                .find(|op| op.operator == "Tj")
                .and_then(|op| op.operands.into_iter().next())
                .and_then(|operand| operand.as_str().map(<[u8]>::to_vec).ok())
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default()
        })
        .collect()
}

/// Number of pages of the PDF at `path`.
pub fn page_count(path: &Path) -> usize {
    Document::load(path)
        .expect("failed to reload output")
        .get_pages()
        .len()
}
