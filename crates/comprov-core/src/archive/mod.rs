//! In-memory ZIP packaging of renamed receipts.

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;
use crate::models::config::ArchiveConfig;
use crate::models::document::{PaymentCategory, ProcessedDocument};

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// A renamed document left out of the archive because a later document in
/// the batch was given the same entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedEntry {
    /// Shared derived name.
    pub entry_name: String,
    /// Original name of the document that was dropped.
    pub replaced: String,
    /// Original name of the document stored under `entry_name`.
    pub kept: String,
}

/// Index of the last document carrying each entry name.
fn last_writers(processed: &[ProcessedDocument]) -> HashMap<&str, usize> {
    processed
        .iter()
        .enumerate()
        .map(|(i, doc)| (doc.new_name.as_str(), i))
        .collect()
}

/// Documents whose entry is overwritten by a later document with the same
/// derived name, in input order.
pub fn replaced_entries(processed: &[ProcessedDocument]) -> Vec<ReplacedEntry> {
    let last = last_writers(processed);

    processed
        .iter()
        .enumerate()
        .filter_map(|(i, doc)| {
            let kept = last[doc.new_name.as_str()];
            (kept != i).then(|| ReplacedEntry {
                entry_name: doc.new_name.clone(),
                replaced: doc.original_name.clone(),
                kept: processed[kept].original_name.clone(),
            })
        })
        .collect()
}

/// Builds a deflate-compressed ZIP from renamed documents.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    compression_level: Option<i64>,
    file_prefix: String,
}

impl ArchiveBuilder {
    /// Create a builder with the default compression level.
    pub fn new() -> Self {
        Self::from_config(&ArchiveConfig::default())
    }

    /// Create a builder from archive configuration.
    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self {
            compression_level: config.compression_level,
            file_prefix: config.file_prefix.clone(),
        }
    }

    /// Set the deflate level (0-9).
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Build the complete archive image, one entry per derived name. An empty
    /// list yields a valid archive with no entries.
    ///
    /// When several documents share a derived name the last one wins; see
    /// [`replaced_entries`].
    pub fn build(&self, processed: &[ProcessedDocument]) -> Result<Vec<u8>> {
        let last = last_writers(processed);

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.compression_level);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (i, doc) in processed.iter().enumerate() {
            let kept = last[doc.new_name.as_str()];
            if kept != i {
                warn!(
                    "{} replaced by {} as {}",
                    doc.original_name, processed[kept].original_name, doc.new_name
                );
                continue;
            }

            zip.start_file(doc.new_name.as_str(), options)?;
            zip.write_all(&doc.content)?;
            debug!("Added {} ({} bytes)", doc.new_name, doc.content.len());
        }

        let data = zip.finish()?.into_inner();
        info!("Built archive with {} entries ({} bytes)", last.len(), data.len());
        Ok(data)
    }

    /// Build the archive and write it to `path`.
    pub fn write_to(&self, path: &Path, processed: &[ProcessedDocument]) -> crate::Result<()> {
        let data = self.build(processed)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Download name for a category's archive, e.g.
    /// `Comprovantes_Salario_20240305_143000.zip`.
    pub fn file_name(&self, category: PaymentCategory, timestamp: &NaiveDateTime) -> String {
        format!(
            "{}_{}_{}.zip",
            self.file_prefix,
            category.label(),
            timestamp.format("%Y%m%d_%H%M%S")
        )
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Download name for a category's archive using the default prefix.
pub fn archive_file_name(category: PaymentCategory, timestamp: &NaiveDateTime) -> String {
    ArchiveBuilder::new().file_name(category, timestamp)
}
