//! Plain-text extraction from a loaded [`Document`].
//!
//! Paragraph texts are joined with `\n`. A document with no paragraphs
//! yields the empty string, and no separator precedes the first paragraph.

use std::path::Path;

use crate::document::{Document, DocumentFormat};
use crate::error::DocumentLoadError;

/// Paragraph separator in extracted text.
pub const PARAGRAPH_SEPARATOR: &str = "\n";

/// Join every paragraph of `doc` into one string.
pub fn document_text(doc: &Document) -> String {
    let mut out = String::new();
    for (i, paragraph) in doc.paragraphs().enumerate() {
        if i > 0 {
            out.push_str(PARAGRAPH_SEPARATOR);
        }
        out.push_str(paragraph);
    }
    out
}

/// Load the document at `path` and return its text. The document is
/// released before this returns.
pub fn file_text(path: &Path, format: DocumentFormat) -> Result<String, DocumentLoadError> {
    let doc = Document::open(path, format)?;
    Ok(document_text(&doc))
}
