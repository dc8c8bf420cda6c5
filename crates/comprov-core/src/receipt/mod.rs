//! Receipt field extraction and file naming.

pub mod rules;
mod sanitize;

pub use rules::{parse_name, PixReceiptExtractor};
pub use sanitize::{derived_file_name, sanitize, ILLEGAL_FILENAME_CHARS};

/// Strategy for locating the recipient name in a receipt's text.
///
/// Each receipt template is one implementation; the batch processor only
/// sees this trait.
pub trait NameExtractor {
    /// Short identifier of the receipt template this strategy handles.
    fn template(&self) -> &str;

    /// Locate the recipient name, with the span it was found in.
    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>>;

    /// Locate the recipient name.
    fn extract_name(&self, text: &str) -> Option<String> {
        self.extract_match(text).map(|m| m.value)
    }
}

impl<T: NameExtractor + ?Sized> NameExtractor for &T {
    fn template(&self) -> &str {
        (**self).template()
    }

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        (**self).extract_match(text)
    }
}

/// A value extracted from text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range of the full match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
