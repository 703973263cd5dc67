//! Catalog parser: lot/contract headers followed by free-text descriptions.

use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::record::{CatalogRecord, DocumentKind, MISSING_VALUE};

use super::rules::{
    amounts::CurrencyValueExtractor,
    noise::NoiseFilter,
    patterns::*,
    weight::extract_weight,
    FieldExtractor,
};
use super::{DocumentParser, Strategy};

/// Catalog parser with a line state machine and a block fallback.
#[derive(Debug, Clone)]
pub struct CatalogParser {
    config: ExtractionConfig,
    line_filter: NoiseFilter,
    block_filter: NoiseFilter,
}

impl CatalogParser {
    /// Create a new catalog parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a catalog parser from an explicit configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            line_filter: NoiseFilter::catalog_lines(),
            block_filter: NoiseFilter::catalog_blocks(),
        }
    }

    /// Set the description/annotation cutoff in characters.
    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.config.description_limit = limit;
        self
    }

    /// Line-oriented parse. Empty when no header line is found.
    pub fn parse_lines(&self, text: &str) -> Vec<CatalogRecord> {
        let cleaned = self.line_filter.apply(text);
        let mut accumulator = LotAccumulator::new(self.config.description_limit);

        for (number, line) in cleaned
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .enumerate()
        {
            match classify_line(line) {
                CatalogLine::Boilerplate => trace!(line = number, "Skipping boilerplate line"),
                CatalogLine::Header { lot, contract, rest } => accumulator.open(lot, contract, &rest),
                CatalogLine::Content(content) => {
                    if !accumulator.push(content) {
                        trace!(line = number, "Dropping text before first lot header");
                    }
                }
            }
        }

        accumulator.finish()
    }

    /// Block-oriented parse that ignores line boundaries.
    pub fn parse_blocks(&self, text: &str) -> Vec<CatalogRecord> {
        let content = self.block_filter.apply(text);

        let headers: Vec<BlockHeader<'_>> = LOT_CONTRACT
            .captures_iter(&content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(BlockHeader {
                    lot: caps.get(1)?.as_str(),
                    contract: caps.get(2)?.as_str(),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect();

        debug!("Found {} lot blocks", headers.len());

        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let block_end = headers.get(i + 1).map(|next| next.start).unwrap_or(content.len());
                parse_block(header.lot, header.contract, content[header.end..block_end].trim())
            })
            .collect()
    }
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for CatalogParser {
    type Record = CatalogRecord;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Catalog
    }

    fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn run_strategy(&self, strategy: Strategy, text: &str) -> Vec<CatalogRecord> {
        match strategy {
            Strategy::Primary => self.parse_lines(text),
            Strategy::Fallback => self.parse_blocks(text),
        }
    }
}

/// A classified catalog line.
#[derive(Debug, PartialEq)]
enum CatalogLine<'a> {
    /// Lot/contract pair plus whatever text shared the line.
    Header {
        lot: &'a str,
        contract: &'a str,
        rest: String,
    },
    /// Column headers, page numbers and section markers.
    Boilerplate,
    /// Description, value or annotation text.
    Content(&'a str),
}

fn classify_line(line: &str) -> CatalogLine<'_> {
    if CATALOG_BOILERPLATE.iter().any(|b| line.contains(b)) || PAGE_NUMBER_PREFIX.is_match(line) {
        return CatalogLine::Boilerplate;
    }

    let header = LOT_CONTRACT.captures(line).and_then(|caps| {
        let whole = caps.get(0)?;
        Some(CatalogLine::Header {
            lot: caps.get(1)?.as_str(),
            contract: caps.get(2)?.as_str(),
            rest: remove_span(line, whole.start(), whole.end()),
        })
    });

    header.unwrap_or(CatalogLine::Content(line))
}

/// Cut `[start, end)` out of `text`, joining the two sides with one space.
fn remove_span(text: &str, start: usize, end: usize) -> String {
    let before = text[..start].trim();
    let after = text[end..].trim();

    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{} {}", before, after),
    }
}

/// A lot whose description is still being collected.
struct PendingLot {
    lot: String,
    contract: String,
    value: Option<String>,
    buffer: Vec<String>,
}

/// Accumulates lines into lots; `current` is `None` until the first header.
struct LotAccumulator {
    description_limit: usize,
    current: Option<PendingLot>,
    records: Vec<CatalogRecord>,
    currency: CurrencyValueExtractor,
}

impl LotAccumulator {
    fn new(description_limit: usize) -> Self {
        Self {
            description_limit,
            current: None,
            records: Vec::new(),
            currency: CurrencyValueExtractor::new(),
        }
    }

    /// Finalize the pending lot and start a new one.
    fn open(&mut self, lot: &str, contract: &str, rest: &str) {
        self.flush();
        self.current = Some(PendingLot {
            lot: lot.to_string(),
            contract: contract.to_string(),
            value: None,
            buffer: Vec::new(),
        });

        if !rest.is_empty() {
            self.push(rest);
        }
    }

    /// Append a content line to the pending lot. Returns `false` if there
    /// is no lot to append to.
    fn push(&mut self, line: &str) -> bool {
        let Some(pending) = self.current.as_mut() else {
            return false;
        };

        let text = match pending.value {
            None => match self.currency.extract(line) {
                Some(found) => {
                    pending.value = Some(found.value);
                    let (start, end) = found.position.unwrap_or((0, 0));
                    remove_span(line, start, end)
                }
                None => line.to_string(),
            },
            Some(_) => line.to_string(),
        };

        if !text.is_empty() {
            pending.buffer.push(text);
        }
        true
    }

    fn flush(&mut self) {
        if let Some(pending) = self.current.take() {
            self.records.push(finalize_lot(pending, self.description_limit));
        }
    }

    fn finish(mut self) -> Vec<CatalogRecord> {
        self.flush();
        self.records
    }
}

fn finalize_lot(pending: PendingLot, description_limit: usize) -> CatalogRecord {
    let joined = pending.buffer.join(" ");
    let joined = PAGE_MARKER.replace_all(&joined, "");

    // Trailing sections that slipped past the noise filter end the lot text.
    let tail_start = [&*PARTICIPATING_UNITS_MARKER, &*OBSERVATIONS_MARKER]
        .iter()
        .filter_map(|marker| marker.find(&joined).map(|m| m.start()))
        .min()
        .unwrap_or(joined.len());
    let text = joined[..tail_start].trim();

    // Fixed-width split: an approximation tuned for one catalog template.
    let split = text
        .char_indices()
        .nth(description_limit)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let description = text[..split].trim().to_string();
    let annotation = text[split..].trim();

    CatalogRecord {
        weight: extract_weight(&description),
        lot: pending.lot,
        contract: pending.contract,
        value: pending.value.unwrap_or_else(|| MISSING_VALUE.to_string()),
        annotation: (!annotation.is_empty()).then(|| annotation.to_string()),
        description,
    }
}

struct BlockHeader<'a> {
    lot: &'a str,
    contract: &'a str,
    start: usize,
    end: usize,
}

/// Split a block body into value, description and annotation.
///
/// Only a spaced ` - ` separates description from annotation; a bare `-`
/// belongs to the description (`OURO-AMASSADO`, contract numbers).
fn parse_block(lot: &str, contract: &str, block: &str) -> CatalogRecord {
    let (value, before, after) = match CurrencyValueExtractor::new().extract(block) {
        Some(found) => {
            let (start, end) = found.position.unwrap_or((0, 0));
            (found.value, &block[..start], &block[end..])
        }
        None => (MISSING_VALUE.to_string(), block, ""),
    };

    let before = collapse_whitespace(before);
    let mut segments = before.split(" - ").map(str::trim);
    let description = segments.next().unwrap_or_default().to_string();

    let annotation: Vec<String> = segments
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .chain(Some(collapse_whitespace(after)).filter(|s| !s.is_empty()))
        .collect();

    CatalogRecord {
        lot: lot.to_string(),
        contract: contract.to_string(),
        weight: extract_weight(&description),
        description,
        value,
        annotation: (!annotation.is_empty()).then(|| annotation.join(" ")),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_LOTS: &str = "\
0235.000186-0 / 0123.456.789-0 ANEL DE OURO 4,96G R$ 1.296,00 obs: sem avarias
0235.000187-8 / 0123.456.790-1 CORRENTE EM OURO
PESO LOTE: 10,20 G
R$ 2.500,00
RETIRADA NA AGENCIA
";

    #[test]
    fn test_parse_two_lots() {
        let records = CatalogParser::new().parse_lines(TWO_LOTS);

        assert_eq!(
            records,
            vec![
                CatalogRecord {
                    lot: "0235.000186-0".to_string(),
                    contract: "0123.456.789-0".to_string(),
                    description: "ANEL DE OURO 4,96G obs: sem avarias".to_string(),
                    value: "1296.00".to_string(),
                    weight: Some("4.96G".to_string()),
                    annotation: None,
                },
                CatalogRecord {
                    lot: "0235.000187-8".to_string(),
                    contract: "0123.456.790-1".to_string(),
                    description: "CORRENTE EM OURO PESO LOTE: 10,20 G RETIRADA NA AGENCIA"
                        .to_string(),
                    value: "2500.00".to_string(),
                    weight: Some("10.20G".to_string()),
                    annotation: None,
                },
            ]
        );
    }

    #[test]
    fn test_only_first_currency_token_is_value() {
        let text = "0235.000186-0 / 0123.456.789-0 LOTE\nR$ 100,00\nlance minimo R$ 50,00\n";
        let records = CatalogParser::new().parse_lines(text);

        assert_eq!(records[0].value, "100.00");
        assert_eq!(records[0].description, "LOTE lance minimo R$ 50,00");
    }

    #[test]
    fn test_missing_value_uses_sentinel() {
        let records = CatalogParser::new().parse_lines("0235.000186-0 / 0123.456.789-0 RELOGIO\n");
        assert_eq!(records[0].value, MISSING_VALUE);
        assert_eq!(records[0].weight, None);
    }

    #[test]
    fn test_description_limit_splits_annotation() {
        let long = "A".repeat(30);
        let text = format!("0235.000186-0 / 0123.456.789-0 {} R$ 1,00 BBBB", long);
        let records = CatalogParser::new().with_description_limit(30).parse_lines(&text);

        assert_eq!(records[0].description, long);
        assert_eq!(records[0].annotation.as_deref(), Some("BBBB"));
    }

    #[test]
    fn test_description_limit_counts_characters() {
        let text = "0235.000186-0 / 0123.456.789-0 ÇÇÇÇ R$ 1,00";
        let records = CatalogParser::new().with_description_limit(2).parse_lines(text);

        assert_eq!(records[0].description, "ÇÇ");
        assert_eq!(records[0].annotation.as_deref(), Some("ÇÇ"));
    }

    #[test]
    fn test_text_before_first_header_is_dropped() {
        let text = "EDITAL 01/2024\n0235.000186-0 / 0123.456.789-0 ANEL R$ 1,00\n";
        let records = CatalogParser::new().parse_lines(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "ANEL");
    }

    #[test]
    fn test_near_miss_header_is_description() {
        let text = "0235.000186-0 / 0123.456.789-0 ANEL R$ 1,00\n0235.000187-8 / 0123.456-1 ver lote\n";
        let records = CatalogParser::new().parse_lines(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "ANEL 0235.000187-8 / 0123.456-1 ver lote");
    }

    #[test]
    fn test_no_headers_yields_nothing() {
        assert!(CatalogParser::new().parse_lines("ANEL DE OURO R$ 10,00\n").is_empty());
        assert!(CatalogParser::new().parse_blocks("ANEL DE OURO R$ 10,00\n").is_empty());
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("Página 3 de 9"), CatalogLine::Boilerplate);
        assert_eq!(classify_line("ANEL"), CatalogLine::Content("ANEL"));
        assert_eq!(
            classify_line("0235.000186-0 / 0123.456.789-0"),
            CatalogLine::Header {
                lot: "0235.000186-0",
                contract: "0123.456.789-0",
                rest: String::new(),
            }
        );
    }

    #[test]
    fn test_blocks_on_merged_lines() {
        let text = "0235.000186-0 / 0123.456.789-0 ANEL DE OURO 4,96G - AMASSADO R$ 1.296,00 sem avarias 0235.000187-8/0123.456.790-1 BROCHE R$ 80,00";
        let records = CatalogParser::new().parse_blocks(text);

        assert_eq!(
            records,
            vec![
                CatalogRecord {
                    lot: "0235.000186-0".to_string(),
                    contract: "0123.456.789-0".to_string(),
                    description: "ANEL DE OURO 4,96G".to_string(),
                    value: "1296.00".to_string(),
                    weight: Some("4.96G".to_string()),
                    annotation: Some("AMASSADO sem avarias".to_string()),
                },
                CatalogRecord {
                    lot: "0235.000187-8".to_string(),
                    contract: "0123.456.790-1".to_string(),
                    description: "BROCHE".to_string(),
                    value: "80.00".to_string(),
                    weight: None,
                    annotation: None,
                },
            ]
        );
    }

    #[test]
    fn test_block_unspaced_hyphen_stays_in_description() {
        let record = parse_block("0235.000186-0", "0123.456.789-0", "ANEL DE OURO-AMASSADO R$ 10,00");

        assert_eq!(record.description, "ANEL DE OURO-AMASSADO");
        assert_eq!(record.annotation, None);
    }

    #[test]
    fn test_block_without_value() {
        let records = CatalogParser::new().parse_blocks("0235.000186-0 / 0123.456.789-0 RELOGIO");
        assert_eq!(records[0].value, MISSING_VALUE);
        assert_eq!(records[0].description, "RELOGIO");
    }

    #[test]
    fn test_parse_falls_back_to_blocks() {
        let text = "Página 1 0235.000186-0 / 0123.456.789-0 ANEL 2,00G R$ 10,00";
        let parser = CatalogParser::new();

        assert!(parser.parse_lines(text).is_empty());

        let result = parser.parse(text).unwrap();
        assert_eq!(result.strategy, Some(Strategy::Fallback));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].weight.as_deref(), Some("2.00G"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_parse_prefers_primary() {
        let result = CatalogParser::new().parse(TWO_LOTS).unwrap();
        assert_eq!(result.strategy, Some(Strategy::Primary));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_rejects_oversized_input() {
        let parser = CatalogParser::with_config(ExtractionConfig {
            max_input_bytes: 8,
            ..ExtractionConfig::default()
        });

        assert!(matches!(
            parser.parse(TWO_LOTS),
            Err(crate::error::ExtractionError::InputTooLarge { limit: 8, .. })
        ));
    }
}
