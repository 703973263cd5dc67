//! Auction import: a catalog and its report combined under one auction date.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ExtractionError, Result};
use crate::extraction::{CatalogParser, DocumentParser, ReportParser};
use crate::models::config::ExtractionConfig;
use crate::models::record::{CatalogRecord, DocumentKind, ReportRecord};

/// Minimum number of non-blank characters in a lot search term.
pub const MIN_SEARCH_LEN: usize = 3;

/// Maximum number of lots returned by a search.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// Records of one auction, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionImport {
    pub auction_date: NaiveDate,
    pub catalog: Vec<CatalogRecord>,
    pub report: Vec<ReportRecord>,
}

/// A catalog lot joined with its winning bid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotSummary {
    pub lot: String,
    pub contract: String,
    pub description: String,
    /// Catalog value as stored on the record.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Bidder of the winning bid, if the lot was awarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    /// Winning total, or the catalog value when nobody bid.
    pub total: Option<Decimal>,
    pub price_per_gram: Option<Decimal>,
    pub awarded: bool,
}

/// Aggregate counts for an import.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub auction_date: NaiveDate,
    pub catalog_lots: usize,
    pub awarded_lots: usize,
    pub unawarded_lots: usize,
    pub bidders: usize,
    /// Sum of every parseable report total.
    pub total_awarded: Decimal,
}

impl AuctionImport {
    /// Build an import from already extracted records.
    ///
    /// Either side being empty means the upload was the wrong document or
    /// an unreadable one.
    pub fn from_records(
        auction_date: NaiveDate,
        catalog: Vec<CatalogRecord>,
        report: Vec<ReportRecord>,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(ExtractionError::NoRecords(DocumentKind::Catalog).into());
        }
        if report.is_empty() {
            return Err(ExtractionError::NoRecords(DocumentKind::Report).into());
        }

        Ok(Self {
            auction_date,
            catalog,
            report,
        })
    }

    /// Run both pipelines on raw text and build an import.
    pub fn from_texts(
        auction_date: NaiveDate,
        catalog_text: &str,
        report_text: &str,
        config: &ExtractionConfig,
    ) -> Result<Self> {
        let catalog = CatalogParser::with_config(config.clone()).parse(catalog_text)?;
        let report = ReportParser::with_config(config.clone()).parse(report_text)?;

        info!(
            "Imported auction of {}: {} catalog lots, {} awards",
            auction_date,
            catalog.records.len(),
            report.records.len()
        );

        Self::from_records(auction_date, catalog.records, report.records)
    }

    /// Every catalog lot joined with the first award for the same lot.
    pub fn lot_summaries(&self) -> Vec<LotSummary> {
        let awards = self.awards_by_lot();
        self.catalog
            .iter()
            .map(|lot| summarize(lot, awards.get(lot.lot.as_str()).copied()))
            .collect()
    }

    /// Lots whose number or description contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Result<Vec<LotSummary>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LEN {
            return Err(ExtractionError::SearchTermTooShort { min: MIN_SEARCH_LEN }.into());
        }

        let needle = term.to_lowercase();
        let awards = self.awards_by_lot();
        let results: Vec<LotSummary> = self
            .catalog
            .iter()
            .filter(|lot| {
                lot.lot.to_lowercase().contains(&needle)
                    || lot.description.to_lowercase().contains(&needle)
            })
            .take(MAX_SEARCH_RESULTS)
            .map(|lot| summarize(lot, awards.get(lot.lot.as_str()).copied()))
            .collect();

        debug!("Search {:?} matched {} lots", term, results.len());
        Ok(results)
    }

    /// Aggregate counts over the import.
    pub fn summary(&self) -> ImportSummary {
        let awards = self.awards_by_lot();
        let awarded_lots = self
            .catalog
            .iter()
            .filter(|lot| awards.contains_key(lot.lot.as_str()))
            .count();
        let bidders: HashSet<&str> = self.report.iter().filter_map(|r| r.tax_id.as_deref()).collect();
        let total_awarded = self.report.iter().filter_map(|r| r.total_amount().ok()).sum();

        ImportSummary {
            auction_date: self.auction_date,
            catalog_lots: self.catalog.len(),
            awarded_lots,
            unawarded_lots: self.catalog.len() - awarded_lots,
            bidders: bidders.len(),
            total_awarded,
        }
    }

    fn awards_by_lot(&self) -> HashMap<&str, &ReportRecord> {
        let mut awards = HashMap::with_capacity(self.report.len());
        for record in &self.report {
            awards.entry(record.lot_number.as_str()).or_insert(record);
        }
        awards
    }
}

fn summarize(lot: &CatalogRecord, award: Option<&ReportRecord>) -> LotSummary {
    let total = match award {
        Some(award) => award.total_amount().ok(),
        None => lot.value_amount().ok(),
    };

    let price_per_gram = match (total, lot.weight_grams()) {
        (Some(total), Some(Ok(grams))) => total.checked_div(grams).map(|p| p.round_dp(2)),
        (_, Some(Err(e))) => {
            debug!("Lot {} has unreadable weight: {}", lot.lot, e);
            None
        }
        _ => None,
    };

    LotSummary {
        lot: lot.lot.clone(),
        contract: lot.contract.clone(),
        description: lot.description.clone(),
        value: lot.value.clone(),
        weight: lot.weight.clone(),
        annotation: lot.annotation.clone(),
        tax_id: award.and_then(|a| a.tax_id.clone()),
        total,
        price_per_gram,
        awarded: award.is_some(),
    }
}
