//! Plain-text extraction from structured documents.
//!
//! Walks every block of the body and every element of each paragraph
//! in reading order, concatenating all text runs. Reading only the
//! first element of a paragraph drops text and must not be done.

use crate::core::types::StructuredDocument;

/// Flatten a structured document into a single trimmed string.
///
/// Blocks without a paragraph and elements without a text run are
/// skipped. A run with no content contributes nothing. Returns an
/// empty string when there is no extractable text; deciding whether
/// that is a failure is up to the caller.
///
/// # Example
///
/// ```
/// use gdocs_index::core::extract::extract_text;
/// use gdocs_index::core::types::StructuredDocument;
///
/// let doc = StructuredDocument::from_paragraphs("t", &[&["Hello, "], &["world."]]);
/// assert_eq!(extract_text(&doc), "Hello, world.");
/// ```
pub fn extract_text(doc: &StructuredDocument) -> String {
    let Some(body) = &doc.body else {
        return String::new();
    };

    let mut acc = String::new();
    for block in &body.content {
        let Some(paragraph) = &block.paragraph else {
            continue;
        };
        for element in &paragraph.elements {
            if let Some(run) = &element.text_run {
                acc.push_str(run.content.as_deref().unwrap_or(""));
            }
        }
    }

    acc.trim().to_string()
}
