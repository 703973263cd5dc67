//! Winning-bid report parser.
//!
//! Reports list a masked bidder identifier followed by one line per lot the
//! bidder won. The identifier applies to every lot line until the next one.

use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::record::{DocumentKind, ReportRecord};

use super::rules::{
    amounts::{strip_currency_markers, strip_currency_prefix},
    noise::NoiseFilter,
    patterns::*,
    tax_id::{classify_tax_id, format_tax_id, LooseTaxIdExtractor},
    FieldExtractor,
};
use super::{DocumentParser, Strategy};

/// Report parser with identifier carry-forward and a block fallback.
#[derive(Debug, Clone)]
pub struct ReportParser {
    config: ExtractionConfig,
    line_filter: NoiseFilter,
    block_filter: NoiseFilter,
}

impl ReportParser {
    /// Create a new report parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a report parser from an explicit configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            line_filter: NoiseFilter::report_lines(),
            block_filter: NoiseFilter::report_blocks(),
        }
    }

    /// Line-oriented parse.
    pub fn parse_lines(&self, text: &str) -> Vec<ReportRecord> {
        let cleaned = self.line_filter.apply(text);
        let mut current_tax_id: Option<String> = None;
        let mut records = Vec::new();

        for line in cleaned.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match classify_line(line, self.config.report_min_line_len) {
                ReportLine::TaxId(tax_id) => current_tax_id = Some(tax_id),
                ReportLine::Award(award) => records.push(award.into_record(current_tax_id.clone())),
                ReportLine::Skipped(reason) => trace!(?reason, line, "Skipping report line"),
            }
        }

        records
    }

    /// Block-oriented parse for glued columns and inline identifiers.
    pub fn parse_blocks(&self, text: &str) -> Vec<ReportRecord> {
        let content = self.block_filter.apply(text);
        let tax_ids = LooseTaxIdExtractor.extract_all(&content);

        if tax_ids.is_empty() {
            debug!("No bidder identifiers found, skipping block parse");
            return Vec::new();
        }

        let mut records = Vec::new();

        for (i, tax_id) in tax_ids.iter().enumerate() {
            let Some((_, block_start)) = tax_id.position else {
                continue;
            };
            let block_end = tax_ids
                .get(i + 1)
                .and_then(|next| next.position)
                .map(|(start, _)| start)
                .unwrap_or(content.len());

            for line in content[block_start..block_end]
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
            {
                if REPORT_BLOCK_BOILERPLATE.iter().any(|b| line.contains(b))
                    || line.chars().count() < self.config.fallback_min_line_len
                {
                    trace!(line, "Skipping report block line");
                    continue;
                }

                if let Some(caps) = AWARD_GLUED.captures(line) {
                    records.push(ReportRecord {
                        tax_id: Some(tax_id.value.clone()),
                        lot_number: caps[1].to_string(),
                        bid_value: strip_currency_prefix(&caps[2]),
                        fee: strip_currency_prefix(&caps[3]),
                        total: strip_currency_prefix(&caps[4]),
                    });
                } else {
                    trace!(line, "No award in report block line");
                }
            }
        }

        records
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for ReportParser {
    type Record = ReportRecord;

    fn kind(&self) -> DocumentKind {
        DocumentKind::Report
    }

    fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn run_strategy(&self, strategy: Strategy, text: &str) -> Vec<ReportRecord> {
        match strategy {
            Strategy::Primary => self.parse_lines(text),
            Strategy::Fallback => self.parse_blocks(text),
        }
    }
}

/// Why a report line produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Boilerplate,
    TooShort,
    TooFewColumns,
    Unrecognized,
}

/// Award columns of a lot line.
#[derive(Debug, PartialEq)]
struct Award {
    lot_number: String,
    bid_value: String,
    fee: String,
    total: String,
}

impl Award {
    fn into_record(self, tax_id: Option<String>) -> ReportRecord {
        ReportRecord {
            tax_id,
            lot_number: self.lot_number,
            bid_value: self.bid_value,
            fee: self.fee,
            total: self.total,
        }
    }
}

/// A classified report line.
#[derive(Debug, PartialEq)]
enum ReportLine {
    TaxId(String),
    Award(Award),
    Skipped(SkipReason),
}

fn classify_line(line: &str, min_len: usize) -> ReportLine {
    if REPORT_LINE_BOILERPLATE.iter().any(|b| line.contains(b)) {
        return ReportLine::Skipped(SkipReason::Boilerplate);
    }
    if line.chars().count() < min_len {
        return ReportLine::Skipped(SkipReason::TooShort);
    }
    if classify_tax_id(line).is_some() {
        return ReportLine::TaxId(format_tax_id(line));
    }

    let stripped = strip_currency_markers(line);
    let tokens: Vec<&str> = stripped.split_whitespace().collect();

    match tokens.as_slice() {
        [lot, bid, fee, total, ..] if REPORT_LOT_TOKEN.is_match(lot) => ReportLine::Award(Award {
            lot_number: lot.to_string(),
            bid_value: bid.to_string(),
            fee: fee.to_string(),
            total: total.to_string(),
        }),
        [lot, ..] if REPORT_LOT_TOKEN.is_match(lot) => ReportLine::Skipped(SkipReason::TooFewColumns),
        _ => ReportLine::Skipped(SkipReason::Unrecognized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_award() {
        let records = ReportParser::new().parse_lines("123.456.XXX-78\n0235.000186-0 3.090,00 185,40 3.275,40");

        assert_eq!(
            records,
            vec![ReportRecord {
                tax_id: Some("123.456.XXX-78".to_string()),
                lot_number: "0235.000186-0".to_string(),
                bid_value: "3.090,00".to_string(),
                fee: "185,40".to_string(),
                total: "3.275,40".to_string(),
            }]
        );
    }

    #[test]
    fn test_tax_id_carries_forward() {
        let text = "\
123.456.XXX-78
0235.000186-0 3.090,00 185,40 3.275,40
0235.000187-8 100,00 6,00 106,00
12.345.XXX/0001-90
0235.000188-6 50,00 3,00 53,00
";
        let records = ReportParser::new().parse_lines(text);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].tax_id, records[1].tax_id);
        assert_eq!(records[1].tax_id.as_deref(), Some("123.456.XXX-78"));
        assert_eq!(records[2].tax_id.as_deref(), Some("12.345.XXX/0001-90"));
    }

    #[test]
    fn test_lot_before_any_tax_id() {
        let records = ReportParser::new().parse_lines("0235.000186-0 10,00 1,00 11,00");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tax_id, None);
    }

    #[test]
    fn test_currency_prefixes_are_stripped() {
        let records = ReportParser::new()
            .parse_lines("123.45X.XXX-78\n0235.000186-0 R$ 3.090,00 R$ 185,40 R$ 3.275,40");

        assert_eq!(records[0].tax_id.as_deref(), Some("123.45X.XXX-78"));
        assert_eq!(records[0].bid_value, "3.090,00");
        assert_eq!(records[0].total, "3.275,40");
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(
            classify_line("Sipen - Sistema de Penhor", 5),
            ReportLine::Skipped(SkipReason::Boilerplate)
        );
        assert_eq!(classify_line("30", 5), ReportLine::Skipped(SkipReason::TooShort));
        assert_eq!(
            classify_line("0235.000186-0 3.090,00", 5),
            ReportLine::Skipped(SkipReason::TooFewColumns)
        );
        assert_eq!(
            classify_line("Arrematante 0235.000186-0", 5),
            ReportLine::Skipped(SkipReason::Unrecognized)
        );
        assert_eq!(
            classify_line("12.345.XXX/0001-90", 5),
            ReportLine::TaxId("12.345.XXX/0001-90".to_string())
        );
    }

    #[test]
    fn test_blocks_with_glued_amounts() {
        let text = "\
CAIXA ECONÔMICA FEDERAL Relatório Total
1X3.456.XXX-7X 0235.000186-03.090,00185,403.275,40
Total do arrematante 3.275,40
98.765.XXX/0001-12
0235.000187-8 100,00 6,00 106,00
Alô CAIXA: 4004 0104
0235.000999-9 1,00 1,00 2,00
";
        let records = ReportParser::new().parse_blocks(text);

        assert_eq!(
            records,
            vec![
                ReportRecord {
                    tax_id: Some("1X3.456.XXX-7X".to_string()),
                    lot_number: "0235.000186-0".to_string(),
                    bid_value: "3.090,00".to_string(),
                    fee: "185,40".to_string(),
                    total: "3.275,40".to_string(),
                },
                ReportRecord {
                    tax_id: Some("98.765.XXX/0001-12".to_string()),
                    lot_number: "0235.000187-8".to_string(),
                    bid_value: "100,00".to_string(),
                    fee: "6,00".to_string(),
                    total: "106,00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_blocks_with_tax_id_glued_to_subtotal() {
        let text = "\
123.456.XXX-78
0235.000186-03.090,00185,403.275,40
(1) 3.275,40Total98.765.XXX/0001-12
0235.000187-8100,006,00106,00
";
        let records = ReportParser::new().parse_blocks(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tax_id.as_deref(), Some("123.456.XXX-78"));
        assert_eq!(records[1].tax_id.as_deref(), Some("98.765.XXX/0001-12"));
        assert_eq!(records[1].lot_number, "0235.000187-8");
        assert_eq!(records[1].bid_value, "100,00");
        assert_eq!(records[1].fee, "6,00");
        assert_eq!(records[1].total, "106,00");
    }

    #[test]
    fn test_blocks_with_tax_id_glued_to_lot() {
        let records = ReportParser::new().parse_blocks("123.456.XXX-780235.000186-03.090,00185,403.275,40\n");

        assert_eq!(
            records,
            vec![ReportRecord {
                tax_id: Some("123.456.XXX-78".to_string()),
                lot_number: "0235.000186-0".to_string(),
                bid_value: "3.090,00".to_string(),
                fee: "185,40".to_string(),
                total: "3.275,40".to_string(),
            }]
        );
    }

    #[test]
    fn test_blocks_without_tax_id() {
        assert!(ReportParser::new()
            .parse_blocks("0235.000186-0 10,00 1,00 11,00")
            .is_empty());
    }

    #[test]
    fn test_parse_falls_back_to_blocks() {
        let text = "123.456.XXX-78 0235.000186-03.090,00185,403.275,40";
        let parser = ReportParser::new();

        assert!(parser.parse_lines(text).is_empty());

        let result = parser.parse(text).unwrap();
        assert_eq!(result.strategy, Some(Strategy::Fallback));
        assert_eq!(result.records[0].tax_id.as_deref(), Some("123.456.XXX-78"));
        assert_eq!(result.records[0].fee, "185,40");
    }

    #[test]
    fn test_parse_empty_document() {
        let result = ReportParser::new().parse("Relatório sem arrematações").unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.strategy, None);
    }
}
