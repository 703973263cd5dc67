//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{ArremateConfig, ExtractionConfig, PdfConfig};
pub use record::{CatalogRecord, DocumentKind, MISSING_VALUE, ReportRecord};
