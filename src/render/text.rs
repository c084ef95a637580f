//! Plain text rendering for block documents.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines. With `include_header_context` every
/// block below a header is prefixed with `[header text] `.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut parts = Vec::with_capacity(doc.blocks.len());
    for block in &doc.blocks {
        if block.is_empty() || !options.page_selection.includes_index(block.page_idx) {
            continue;
        }
        let text = options.apply(&block.block_text);
        match (&block.header_text, options.include_header_context) {
            (Some(header), true) => parts.push(format!("[{}] {}", options.apply(header), text)),
            _ => parts.push(text),
        }
    }
    Ok(parts.join("\n\n").trim().to_string())
}
