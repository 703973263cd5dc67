//! Error types for the arremate-core library.

use thiserror::Error;

use crate::models::record::DocumentKind;

/// Main error type for the arremate library.
#[derive(Error, Debug)]
pub enum ArremateError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to auction record extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Neither strategy produced a record for the document.
    #[error("no records could be extracted from the {0}")]
    NoRecords(DocumentKind),

    /// A stored numeric string could not be parsed.
    #[error("invalid numeric format for {field}: {value:?}")]
    InvalidNumericFormat { field: String, value: String },

    /// The input exceeds the configured size bound.
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// Lot search term is too short to be selective.
    #[error("search term must have at least {min} characters")]
    SearchTermTooShort { min: usize },
}

impl ExtractionError {
    pub(crate) fn invalid_numeric(field: &str, value: &str) -> Self {
        Self::InvalidNumericFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result type for the arremate library.
pub type Result<T> = std::result::Result<T, ArremateError>;
