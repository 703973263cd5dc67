//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the arremate pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArremateConfig {
    /// Record extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text extraction configuration.
    pub pdf: PdfConfig,
}

/// Record extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of a catalog lot kept as description; the rest becomes
    /// the annotation. Tuned for the common catalog template only.
    pub description_limit: usize,

    /// Inputs larger than this many bytes are rejected.
    pub max_input_bytes: usize,

    /// Report lines shorter than this are skipped by the line parser.
    pub report_min_line_len: usize,

    /// Report lines shorter than this are skipped by the block parser.
    pub fallback_min_line_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            description_limit: 500,
            max_input_bytes: 16 * 1024 * 1024,
            report_min_line_len: 5,
            fallback_min_line_len: 10,
        }
    }
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

impl ArremateConfig {
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
