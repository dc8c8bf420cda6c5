//! Configuration structures for the renaming pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the comprov pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComprovConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Recipient name extraction configuration.
    pub extraction: ExtractionConfig,

    /// Archive packaging configuration.
    pub archive: ArchiveConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try to open encrypted PDFs with an empty user password.
    pub decrypt_empty_password: bool,

    /// Fall back to whole-document pdf-extract when per-page extraction fails.
    pub fallback_to_pdf_extract: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            fallback_to_pdf_extract: true,
        }
    }
}

/// Recipient name extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Label that precedes the recipient name.
    pub name_label: String,

    /// Token that ends the name when it shares a line with the next field.
    pub name_terminator: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_label: "Nome:".to_string(),
            name_terminator: "CPF".to_string(),
        }
    }
}

/// Archive packaging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Deflate level (0-9). `None` uses the library default.
    pub compression_level: Option<i64>,

    /// Prefix of the generated archive file name.
    pub file_prefix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: None,
            file_prefix: "Comprovantes".to_string(),
        }
    }
}

impl ComprovConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
