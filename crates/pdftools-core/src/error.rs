use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfToolsError {
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidRange(String),

    #[error("PDF operation failed: {0}")]
    Operation(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
}
