//! Recipient name extraction for PIX transfer receipts.

use regex::Regex;
use tracing::trace;

use super::patterns::{name_pattern, RECIPIENT_NAME, WHITESPACE_RUN};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::receipt::{ExtractionMatch, NameExtractor};

/// Name extractor for the PIX receipt layout: `Nome: <name>` terminated by a
/// line break or the `CPF` field.
///
/// A name that itself contains `CPF` is cut short at that point.
#[derive(Debug, Clone)]
pub struct PixReceiptExtractor {
    pattern: Regex,
}

impl PixReceiptExtractor {
    /// Create an extractor for the default `Nome:` / `CPF` layout.
    pub fn new() -> Self {
        Self {
            pattern: RECIPIENT_NAME.clone(),
        }
    }

    /// Create an extractor for a different label and terminator.
    pub fn with_label(label: &str, terminator: &str) -> Result<Self, ExtractionError> {
        Ok(Self {
            pattern: name_pattern(label, terminator)?,
        })
    }

    /// Create an extractor from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        Self::with_label(&config.name_label, &config.name_terminator)
    }
}

impl Default for PixReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NameExtractor for PixReceiptExtractor {
    fn template(&self) -> &str {
        "pix"
    }

    fn extract_match(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(text)?;
        let full_match = caps.get(0)?;
        let name = normalize_name(&caps[1]);

        trace!("Matched recipient name {:?} at {}..{}", name, full_match.start(), full_match.end());

        if name.is_empty() {
            return None;
        }

        Some(
            ExtractionMatch::new(name, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Trim and collapse internal whitespace runs to single spaces.
fn normalize_name(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

/// Extract the recipient name from PIX receipt text.
pub fn parse_name(text: &str) -> Option<String> {
    PixReceiptExtractor::new().extract_name(text)
}
