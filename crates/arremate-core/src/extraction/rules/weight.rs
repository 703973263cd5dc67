//! Lot weight extraction from catalog descriptions.

use super::amounts::normalize_brl_number;
use super::patterns::{WEIGHT_BARE, WEIGHT_LABELLED};
use super::{ExtractionMatch, FieldExtractor};

/// Weight field extractor.
///
/// A labelled weight (`PESO LOTE: 4,96 G`) wins over a bare one (`4,96G`).
pub struct WeightExtractor;

impl WeightExtractor {
    pub fn new() -> Self {
        Self
    }

    fn to_match(caps: regex::Captures<'_>) -> ExtractionMatch<String> {
        let full = caps.get(0).expect("group 0 always participates");
        let grams = format!("{}G", normalize_brl_number(&caps[1]));
        ExtractionMatch::new(grams, full.as_str()).with_position(full.start(), full.end())
    }
}

impl Default for WeightExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for WeightExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        WEIGHT_LABELLED
            .captures(text)
            .or_else(|| WEIGHT_BARE.captures(text))
            .map(Self::to_match)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let labelled: Vec<_> = WEIGHT_LABELLED.captures_iter(text).map(Self::to_match).collect();
        if !labelled.is_empty() {
            return labelled;
        }

        WEIGHT_BARE.captures_iter(text).map(Self::to_match).collect()
    }
}

/// Extract the lot weight (`4.96G`) from a description.
pub fn extract_weight(description: &str) -> Option<String> {
    WeightExtractor::new().extract(description).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_weight() {
        assert_eq!(extract_weight("ANEL PESO LOTE: 4,96 G"), Some("4.96G".to_string()));
        assert_eq!(extract_weight("peso 12,5 gramas"), Some("12.5G".to_string()));
        assert_eq!(extract_weight("PESO: 1.250,00GR"), Some("1250.00G".to_string()));
    }

    #[test]
    fn test_bare_weight() {
        assert_eq!(extract_weight("anel 4,96G"), Some("4.96G".to_string()));
        assert_eq!(extract_weight("CORRENTE 10,20 g AMASSADA"), Some("10.20G".to_string()));
    }

    #[test]
    fn test_labelled_takes_precedence() {
        assert_eq!(
            extract_weight("2 ANEIS 1,00G E 3,00G PESO LOTE: 4,00G"),
            Some("4.00G".to_string())
        );
    }

    #[test]
    fn test_no_weight() {
        assert_eq!(extract_weight("RELOGIO DE PULSO SEM PULSEIRA"), None);
        assert_eq!(extract_weight("12 GAVETAS"), None);
    }

    #[test]
    fn test_extract_all_weights() {
        let extractor = WeightExtractor::new();
        assert_eq!(extractor.extract_all("1,00G e 3,00G").len(), 2);
    }
}
