//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result, TextExtractor};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    decrypt_empty_password: bool,
    fallback_to_pdf_extract: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            decrypt_empty_password: true,
            fallback_to_pdf_extract: true,
        }
    }

    /// Create an extractor from PDF configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_empty_password_decryption(config.decrypt_empty_password)
            .with_fallback(config.fallback_to_pdf_extract)
    }

    /// Set whether to try decrypting with an empty user password.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_empty_password = enabled;
        self
    }

    /// Set whether to fall back to pdf-extract when per-page extraction fails.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_pdf_extract = enabled;
        self
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    fn extract_text_by_pages(&self) -> Result<String> {
        let doc = self.document()?;

        // No separator between pages: receipts are matched on the raw concatenation.
        let mut text = String::new();
        for page_num in doc.get_pages().keys() {
            let page_text = self.extract_page_text(*page_num)?;
            trace!("Page {} yielded {} chars", page_num, page_text.len());
            text.push_str(&page_text);
        }

        Ok(text)
    }

    fn extract_text_whole(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes for the fallback path
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        match self.extract_text_by_pages() {
            Ok(text) => Ok(text),
            Err(e) if self.fallback_to_pdf_extract => {
                warn!("Per-page extraction failed ({}), falling back to pdf-extract", e);
                self.extract_text_whole()
            }
            Err(e) => Err(e),
        }
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Stateless [`TextExtractor`] that loads a fresh [`PdfExtractor`] per document.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor {
    config: PdfConfig,
}

impl PdfTextExtractor {
    /// Create an extractor with default PDF settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor from PDF configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::from_config(&self.config);
        extractor.load(data)?;
        PdfProcessor::extract_text(&extractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.extract_page_text(1),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let result = extractor.load(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_text_extractor_rejects_garbage() {
        let extractor = PdfTextExtractor::new();
        assert!(extractor.extract_text(b"%PDF-garbage").is_err());
    }
}
