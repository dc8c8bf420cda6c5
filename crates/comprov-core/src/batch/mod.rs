//! Batch renaming of receipt documents.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ComprovError, ExtractionError};
use crate::models::config::ComprovConfig;
use crate::models::document::{
    display_name, Document, DocumentOutcome, FailureKind, PaymentCategory, ProcessedDocument,
    ProcessingError,
};
use crate::pdf::{PdfTextExtractor, TextExtractor};
use crate::receipt::{derived_file_name, NameExtractor, PixReceiptExtractor};

/// Result of processing a batch.
///
/// Every input document appears exactly once, either in `processed` or in
/// `errors`. Both lists, and `outcomes`, keep input order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Documents that were renamed.
    pub processed: Vec<ProcessedDocument>,
    /// Documents that could not be renamed.
    pub errors: Vec<ProcessingError>,
    /// Per-document outcomes for display.
    pub outcomes: Vec<DocumentOutcome>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl BatchResult {
    /// Number of documents in the batch.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Split into renamed documents and errors.
    pub fn into_parts(self) -> (Vec<ProcessedDocument>, Vec<ProcessingError>) {
        (self.processed, self.errors)
    }

    fn push(&mut self, result: Result<ProcessedDocument, ProcessingError>) {
        match result {
            Ok(doc) => {
                self.outcomes.push(DocumentOutcome::from(&doc));
                self.processed.push(doc);
            }
            Err(err) => {
                self.outcomes.push(DocumentOutcome::from(&err));
                self.errors.push(err);
            }
        }
    }
}

/// Extracts, parses and renames receipts one document at a time.
pub struct BatchProcessor<T = PdfTextExtractor, N = PixReceiptExtractor> {
    text_extractor: T,
    name_extractor: N,
}

impl BatchProcessor {
    /// Create a processor using the PDF decoder and the PIX receipt layout.
    pub fn new() -> Self {
        Self::with_extractors(PdfTextExtractor::new(), PixReceiptExtractor::new())
    }

    /// Create a processor from configuration.
    pub fn from_config(config: &ComprovConfig) -> Result<Self, ComprovError> {
        let name_extractor = PixReceiptExtractor::from_config(&config.extraction)?;
        Ok(Self::with_extractors(
            PdfTextExtractor::with_config(config.pdf.clone()),
            name_extractor,
        ))
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TextExtractor, N: NameExtractor> BatchProcessor<T, N> {
    /// Create a processor from explicit extraction strategies.
    pub fn with_extractors(text_extractor: T, name_extractor: N) -> Self {
        Self {
            text_extractor,
            name_extractor,
        }
    }

    /// Process every document independently, in input order.
    pub fn process(&self, documents: &[Document], category: PaymentCategory) -> BatchResult {
        let start = Instant::now();
        let mut result = BatchResult::default();

        for document in documents {
            result.push(self.process_document(document, category));
        }

        self.finish(result, start)
    }

    /// Read and process files from disk. A file that cannot be read becomes
    /// an I/O error for that file only.
    pub fn process_paths<P: AsRef<Path>>(&self, paths: &[P], category: PaymentCategory) -> BatchResult {
        let start = Instant::now();
        let mut result = BatchResult::default();

        for path in paths {
            let path = path.as_ref();
            let outcome = match Document::from_path(path) {
                Ok(document) => self.process_document(&document, category),
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    Err(ProcessingError::new(
                        display_name(path),
                        FailureKind::Io,
                        format!("failed to read file: {}", e),
                    ))
                }
            };
            result.push(outcome);
        }

        self.finish(result, start)
    }

    /// Process a single document.
    pub fn process_document(
        &self,
        document: &Document,
        category: PaymentCategory,
    ) -> Result<ProcessedDocument, ProcessingError> {
        let text = self
            .text_extractor
            .extract_text(&document.content)
            .map_err(|e| {
                warn!("Failed to decode {}: {}", document.name, e);
                ProcessingError::new(&document.name, FailureKind::Decode, e.to_string())
            })?;

        debug!("Extracted {} chars from {}", text.len(), document.name);

        let person_name = self.name_extractor.extract_name(&text).ok_or_else(|| {
            warn!(
                "No recipient name found in {} (template {})",
                document.name,
                self.name_extractor.template()
            );
            ProcessingError::new(
                &document.name,
                FailureKind::NameNotFound,
                ExtractionError::NameNotFound.to_string(),
            )
        })?;

        let new_name = derived_file_name(&person_name, category);
        debug!("{} -> {}", document.name, new_name);

        Ok(ProcessedDocument {
            original_name: document.name.clone(),
            new_name,
            person_name,
            content: document.content.clone(),
        })
    }

    fn finish(&self, mut result: BatchResult, start: Instant) -> BatchResult {
        result.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Processed {} documents: {} renamed, {} failed in {}ms",
            result.total(),
            result.processed.len(),
            result.errors.len(),
            result.processing_time_ms
        );
        result
    }
}
