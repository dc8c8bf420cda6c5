//! PDF processing module.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF, pages concatenated in order.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Turns raw document bytes into a single text string.
///
/// This is the seam the batch processor decodes documents through, so tests
/// and alternative decoders can stand in for the PDF stack.
pub trait TextExtractor {
    /// Decode `data` and return its text content.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        (**self).extract_text(data)
    }
}
