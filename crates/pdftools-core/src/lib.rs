//! PDF transformation engine for the PDF tools backend.
//!
//! Pure byte-in/byte-out operations built on lopdf:
//! - `merge_documents`: concatenate the pages of several PDFs
//! - `extract_range`: cut a contiguous 1-indexed page range out of a PDF
//! - `images_to_pdf`: assemble decoded images into a multi-page PDF

pub mod error;
pub mod images;
pub mod merge;
pub mod split;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::PdfToolsError;
pub use images::images_to_pdf;
pub use merge::merge_documents;
pub use split::extract_range;

/// Parse PDF bytes and return the page count.
pub fn page_count(bytes: &[u8]) -> Result<u32, PdfToolsError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| PdfToolsError::Parse(e.to_string()))?;
    Ok(doc.get_pages().len() as u32)
}
