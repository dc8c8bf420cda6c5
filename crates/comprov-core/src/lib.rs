//! Core library for PIX payment receipt renaming.
//!
//! This crate provides:
//! - PDF text extraction (lopdf per-page text, pdf-extract fallback)
//! - Recipient name extraction from receipt text
//! - File name sanitization and derived name construction
//! - Batch processing with per-document error isolation
//! - In-memory ZIP packaging of renamed receipts

pub mod archive;
pub mod batch;
pub mod error;
pub mod models;
pub mod pdf;
pub mod receipt;

pub use archive::{archive_file_name, replaced_entries, ArchiveBuilder, ReplacedEntry};
pub use batch::{BatchProcessor, BatchResult};
pub use error::{ComprovError, Result};
pub use models::config::ComprovConfig;
pub use models::document::{
    Document, DocumentOutcome, FailureKind, PaymentCategory, ProcessedDocument, ProcessingError,
};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextExtractor, TextExtractor};
pub use receipt::{
    derived_file_name, parse_name, sanitize, ExtractionMatch, NameExtractor, PixReceiptExtractor,
};
