//! Record extraction from raw catalog and report text.

mod catalog;
mod report;
pub mod rules;
mod strategy;

pub use catalog::CatalogParser;
pub use report::ReportParser;
pub use strategy::{first_non_empty, Strategy, StrategyOutcome};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{CatalogRecord, DocumentKind, ReportRecord};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Result of running a document pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult<R> {
    /// Extracted records, in document order.
    pub records: Vec<R>,
    /// Strategy that produced the records.
    pub strategy: Option<Strategy>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// A two-stage document pipeline.
pub trait DocumentParser {
    /// Record type produced by this parser.
    type Record;

    /// Document family this parser handles.
    fn kind(&self) -> DocumentKind;

    /// Configuration in effect.
    fn config(&self) -> &ExtractionConfig;

    /// Run a single strategy on raw text.
    fn run_strategy(&self, strategy: Strategy, text: &str) -> Vec<Self::Record>;

    /// Run the strategies in order until one yields records.
    ///
    /// An empty record list is not an error; callers decide whether zero
    /// records is a failure.
    fn parse(&self, text: &str) -> Result<ExtractionResult<Self::Record>> {
        let start = Utc::now();
        let kind = self.kind();
        let limit = self.config().max_input_bytes;

        if text.len() > limit {
            return Err(ExtractionError::InputTooLarge { size: text.len(), limit });
        }

        info!("Parsing {} from {} characters of text", kind, text.len());

        let outcome = first_non_empty(&Strategy::ORDER, |strategy| self.run_strategy(strategy, text));
        let mut warnings = Vec::new();

        match outcome.strategy {
            Some(Strategy::Primary) => {}
            Some(strategy) => {
                warnings.push(format!("{} layout not recognized, used {} parser", kind, strategy));
            }
            None => {
                warn!("No {} records found by any strategy", kind);
                warnings.push(format!("no {} records found", kind));
            }
        }

        debug!(
            "Extracted {} {} records via {:?}",
            outcome.records.len(),
            kind,
            outcome.strategy
        );

        Ok(ExtractionResult {
            records: outcome.records,
            strategy: outcome.strategy,
            warnings,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        })
    }
}

/// Extract catalog lots with default settings.
pub fn parse_catalog(text: &str) -> Vec<CatalogRecord> {
    records_or_empty(CatalogParser::new().parse(text))
}

/// Extract winning bids with default settings.
pub fn parse_report(text: &str) -> Vec<ReportRecord> {
    records_or_empty(ReportParser::new().parse(text))
}

fn records_or_empty<R>(result: Result<ExtractionResult<R>>) -> Vec<R> {
    match result {
        Ok(result) => result.records,
        Err(e) => {
            warn!("Extraction skipped: {}", e);
            Vec::new()
        }
    }
}
