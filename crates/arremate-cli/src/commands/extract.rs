//! Catalog and report commands - extract records from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use arremate_core::extraction::{CatalogParser, DocumentParser, ExtractionResult, ReportParser};
use arremate_core::models::record::{CatalogRecord, DocumentKind, ReportRecord};

use super::{load_config, read_document_text};

/// Arguments for the catalog and report commands.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings and timing
    #[arg(long)]
    show_stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text listing
    Text,
}

/// A record that can be written as a CSV row or a text block.
pub trait RecordRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl RecordRow for CatalogRecord {
    const HEADERS: &'static [&'static str] = &["lot", "contract", "description", "value", "weight", "annotation"];

    fn row(&self) -> Vec<String> {
        vec![
            self.lot.clone(),
            self.contract.clone(),
            self.description.clone(),
            self.value.clone(),
            self.weight.clone().unwrap_or_default(),
            self.annotation.clone().unwrap_or_default(),
        ]
    }
}

impl RecordRow for ReportRecord {
    const HEADERS: &'static [&'static str] = &["tax_id", "lot_number", "bid_value", "fee", "total"];

    fn row(&self) -> Vec<String> {
        vec![
            self.tax_id.clone().unwrap_or_default(),
            self.lot_number.clone(),
            self.bid_value.clone(),
            self.fee.clone(),
            self.total.clone(),
        ]
    }
}

pub async fn run(kind: DocumentKind, args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    info!("Processing {} file: {}", kind, args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading document...");
    let text = read_document_text(&args.input, &config.pdf)?;

    pb.set_message(format!("Extracting {} records...", kind));
    let output = match kind {
        DocumentKind::Catalog => {
            let result = CatalogParser::with_config(config.extraction).parse(&text)?;
            render(kind, result, &args)?
        }
        DocumentKind::Report => {
            let result = ReportParser::with_config(config.extraction).parse(&text)?;
            render(kind, result, &args)?
        }
    };

    pb.finish_and_clear();

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn render<R: RecordRow>(
    kind: DocumentKind,
    result: ExtractionResult<R>,
    args: &ExtractArgs,
) -> anyhow::Result<String> {
    if result.records.is_empty() {
        anyhow::bail!("No {} records could be extracted from {}", kind, args.input.display());
    }

    if args.show_stats {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        eprintln!(
            "{} {} records via {} parser in {}ms",
            style("ℹ").blue(),
            result.records.len(),
            result
                .strategy
                .map(|s| s.to_string())
                .unwrap_or_default(),
            result.processing_time_ms
        );
    }

    debug!("Formatting {} records as {:?}", result.records.len(), args.format);
    format_records(&result.records, args.format)
}

pub fn format_records<R: RecordRow>(records: &[R], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv<R: RecordRow>(records: &[R]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(R::HEADERS)?;
    for record in records {
        wtr.write_record(record.row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text<R: RecordRow>(records: &[R]) -> String {
    let width = R::HEADERS.iter().map(|h| h.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        for (header, value) in R::HEADERS.iter().zip(record.row()) {
            if !value.is_empty() {
                output.push_str(&format!("{:width$}  {}\n", header, value, width = width));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award() -> ReportRecord {
        ReportRecord {
            tax_id: None,
            lot_number: "0235.000186-0".to_string(),
            bid_value: "3.090,00".to_string(),
            fee: "185,40".to_string(),
            total: "3.275,40".to_string(),
        }
    }

    #[test]
    fn test_csv_keeps_empty_columns() {
        let csv = format_records(&[award()], OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("tax_id,lot_number,bid_value,fee,total"));
        assert_eq!(lines.next(), Some(",0235.000186-0,\"3.090,00\",\"185,40\",\"3.275,40\""));
    }

    #[test]
    fn test_text_skips_missing_fields() {
        let text = format_records(&[award()], OutputFormat::Text).unwrap();

        assert!(text.contains("lot_number  0235.000186-0"));
        assert!(!text.contains("tax_id"));
    }
}
