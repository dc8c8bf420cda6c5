//! Subcommand implementations.

pub mod config;
pub mod inspect;
pub mod rename;

use std::path::{Path, PathBuf};

use comprov_core::ComprovConfig;
use tracing::debug;

/// Output format for reports.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("comprov")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or
/// fall back to defaults when neither exists.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ComprovConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(ComprovConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ComprovConfig::from_file(&default_path)?)
    } else {
        Ok(ComprovConfig::default())
    }
}
