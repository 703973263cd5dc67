//! Rule-based field extractors for auction documents.

pub mod amounts;
pub mod noise;
pub mod patterns;
pub mod tax_id;
pub mod weight;

pub use amounts::{
    format_brl_amount, normalize_brl_value, parse_brl_amount, strip_currency_prefix,
    CurrencyValueExtractor,
};
pub use noise::{NoiseFilter, NoiseRule};
pub use tax_id::{classify_tax_id, format_tax_id, TaxIdKind};
pub use weight::{extract_weight, WeightExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A normalized value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
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
