//! Error types for the comprov-core library.

use thiserror::Error;

/// Main error type for the comprov library.
#[derive(Error, Debug)]
pub enum ComprovError {
    /// Recipient name extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Archive assembly error.
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to recipient name extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The name label was not present in the text.
    #[error("could not extract the recipient name")]
    NameNotFound,

    /// A configured label or terminator produced an unusable pattern.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors related to archive assembly.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The ZIP writer failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Writing entry content failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the comprov library.
pub type Result<T> = std::result::Result<T, ComprovError>;
