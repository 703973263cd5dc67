//! Subcommands and the input handling they share.

pub mod config;
pub mod extract;
pub mod import;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use arremate_core::models::config::{ArremateConfig, PdfConfig};
use arremate_core::pdf::PdfExtractor;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arremate")
        .join("config.json")
}

/// Load the configuration from `--config`, the user file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ArremateConfig> {
    if let Some(path) = config_path {
        return Ok(ArremateConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(ArremateConfig::from_file(&default_path)?)
    } else {
        Ok(ArremateConfig::default())
    }
}

/// Read raw document text from a `.pdf` or `.txt` file.
pub fn read_document_text(path: &Path, pdf: &PdfConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            PdfExtractor::new()
                .with_min_text_length(pdf.min_text_length)
                .text_from_bytes(&data)?
        }
        "txt" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text could be read from {}", path.display());
    }

    debug!("Read {} characters from {}", text.len(), path.display());
    Ok(text)
}
