//! Auction record models produced by the extraction pipelines.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::extraction::rules::amounts::{parse_brl_amount, parse_decimal_value};

/// Value stored when a catalog lot carries no currency token.
pub const MISSING_VALUE: &str = "N/A";

/// The two document families handled by the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Lot catalog published before the auction.
    Catalog,
    /// Winning-bid report published after the auction.
    Report,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// A single lot listed in an auction catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Lot identifier (`0235.000186-0`).
    pub lot: String,

    /// Contract identifier (`0123.456.789-0`).
    pub contract: String,

    /// Narrative description of the lot.
    pub description: String,

    /// Normalized decimal value (`1296.00`), or [`MISSING_VALUE`].
    pub value: String,

    /// Weight in grams with a `G` suffix (`4.96G`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Trailing free text that did not fit the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl CatalogRecord {
    /// Appraised value as a decimal.
    pub fn value_amount(&self) -> Result<Decimal, ExtractionError> {
        parse_decimal_value(&self.value).ok_or_else(|| ExtractionError::invalid_numeric("value", &self.value))
    }

    /// Weight in grams, if the description declared one.
    pub fn weight_grams(&self) -> Option<Result<Decimal, ExtractionError>> {
        self.weight.as_deref().map(|weight| {
            let grams = weight.trim().trim_end_matches(['G', 'g']);
            parse_decimal_value(grams).ok_or_else(|| ExtractionError::invalid_numeric("weight", weight))
        })
    }

    /// Whether the value fell back to the sentinel.
    pub fn has_value(&self) -> bool {
        self.value != MISSING_VALUE
    }
}

/// A winning bid from an auction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    /// Masked CPF/CNPJ of the bidder, if one preceded the lot line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Lot identifier (`0235.000186-0`).
    pub lot_number: String,

    /// Winning bid as printed (`3.090,00`).
    pub bid_value: String,

    /// Auction fee as printed.
    pub fee: String,

    /// Bid plus fee as printed.
    pub total: String,
}

impl ReportRecord {
    pub fn bid_amount(&self) -> Result<Decimal, ExtractionError> {
        parse_report_field("bid_value", &self.bid_value)
    }

    pub fn fee_amount(&self) -> Result<Decimal, ExtractionError> {
        parse_report_field("fee", &self.fee)
    }

    pub fn total_amount(&self) -> Result<Decimal, ExtractionError> {
        parse_report_field("total", &self.total)
    }
}

fn parse_report_field(field: &str, value: &str) -> Result<Decimal, ExtractionError> {
    parse_brl_amount(value).ok_or_else(|| ExtractionError::invalid_numeric(field, value))
}
