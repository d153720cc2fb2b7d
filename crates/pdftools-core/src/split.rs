//! Page-range extraction.
//!
//! Produces a new document containing one contiguous, 1-indexed inclusive
//! page range of the input, in original order.

use crate::error::PdfToolsError;
use lopdf::Document;

/// Extract pages `[start, end]` (1-indexed, inclusive) into a new document.
///
/// The whole range is validated against the real page count before anything
/// is modified, so every rejection can name the document's actual size. The
/// extraction itself deletes the complement of the range and prunes the
/// objects that become unreachable.
pub fn extract_range(bytes: &[u8], start: u32, end: u32) -> Result<Vec<u8>, PdfToolsError> {
    let doc = Document::load_mem(bytes).map_err(|e| PdfToolsError::Parse(e.to_string()))?;
    let total = doc.get_pages().len() as u32;

    if start < 1 || end < start || end > total {
        return Err(PdfToolsError::InvalidRange(format!(
            "Invalid page range. Document has {} pages.",
            total
        )));
    }

    let mut output = doc.clone();

    // Delete high pages first so earlier page numbers stay valid.
    let complement: Vec<u32> = (1..=total).rev().filter(|p| *p < start || *p > end).collect();
    for page in complement {
        output.delete_pages(&[page]);
    }

    output.prune_objects();
    output.compress();

    let mut buffer = Vec::new();
    output
        .save_to(&mut buffer)
        .map_err(|e| PdfToolsError::Operation(format!("failed to save split PDF: {}", e)))?;
    Ok(buffer)
}
