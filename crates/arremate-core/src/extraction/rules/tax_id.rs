//! Masked CPF/CNPJ recognition.
//!
//! Reports never print a full taxpayer number; some digits are replaced
//! with `X`, so no checksum validation is possible.

use serde::{Deserialize, Serialize};

use super::patterns::{TAX_ID_LINE, TAX_ID_LOOSE};
use super::{ExtractionMatch, FieldExtractor};

/// Shape of a masked taxpayer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxIdKind {
    /// Individual (`123.456.XXX-78`).
    Cpf,
    /// Individual with a wider mask (`123.45X.XXX-78`).
    PartiallyMaskedCpf,
    /// Company (`12.345.XXX/0001-90`).
    Cnpj,
}

/// Classify a whole line as one of the exact masked shapes.
pub fn classify_tax_id(line: &str) -> Option<TaxIdKind> {
    let compact = format_tax_id(line);
    if !TAX_ID_LINE.is_match(&compact) {
        return None;
    }

    if compact.contains('/') {
        Some(TaxIdKind::Cnpj)
    } else if compact.as_bytes().get(6) == Some(&b'X') {
        Some(TaxIdKind::PartiallyMaskedCpf)
    } else {
        Some(TaxIdKind::Cpf)
    }
}

/// Strip all whitespace from an identifier.
pub fn format_tax_id(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Finds identifiers with any mix of digits and mask characters.
pub struct LooseTaxIdExtractor;

impl FieldExtractor for LooseTaxIdExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TAX_ID_LOOSE
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(format_tax_id(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}
