//! Import command - combine a catalog and its report for one auction date.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use arremate_core::auction::{AuctionImport, ImportSummary, LotSummary};
use arremate_core::extraction::{CatalogParser, DocumentParser, ReportParser};
use arremate_core::models::config::ArremateConfig;

use super::{load_config, read_document_text};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Catalog file (PDF or extracted text)
    #[arg(long, required = true)]
    catalog: PathBuf,

    /// Winning-bid report file (PDF or extracted text)
    #[arg(long, required = true)]
    report: PathBuf,

    /// Auction date (YYYY-MM-DD)
    #[arg(long, required = true)]
    date: NaiveDate,

    /// Include every lot joined with its winning bid
    #[arg(long)]
    lots: bool,

    /// Only list lots whose number or description contains this term
    #[arg(long)]
    search: Option<String>,
}

#[derive(Serialize)]
struct ImportOutput {
    summary: ImportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    lots: Option<Vec<LotSummary>>,
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    info!(
        "Importing auction of {} from {} and {}",
        args.date,
        args.catalog.display(),
        args.report.display()
    );

    let catalog = tokio::task::spawn_blocking({
        let path = args.catalog.clone();
        let config = config.clone();
        move || extract_catalog(path, config)
    });
    let report = tokio::task::spawn_blocking({
        let path = args.report.clone();
        let config = config.clone();
        move || extract_report(path, config)
    });

    let (catalog, report) = tokio::try_join!(catalog, report)?;
    let import = AuctionImport::from_records(args.date, catalog?, report?)?;

    let lots = match &args.search {
        Some(term) => Some(import.search(term)?),
        None if args.lots => Some(import.lot_summaries()),
        None => None,
    };

    let output = ImportOutput {
        summary: import.summary(),
        lots,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    eprintln!(
        "{} Imported {} lots and {} awards",
        style("✓").green(),
        import.catalog.len(),
        import.report.len()
    );

    Ok(())
}

fn extract_catalog(
    path: PathBuf,
    config: ArremateConfig,
) -> anyhow::Result<Vec<arremate_core::CatalogRecord>> {
    let text = read_document_text(&path, &config.pdf)?;
    Ok(CatalogParser::with_config(config.extraction).parse(&text)?.records)
}

fn extract_report(
    path: PathBuf,
    config: ArremateConfig,
) -> anyhow::Result<Vec<arremate_core::ReportRecord>> {
    let text = read_document_text(&path, &config.pdf)?;
    Ok(ReportParser::with_config(config.extraction).parse(&text)?.records)
}
