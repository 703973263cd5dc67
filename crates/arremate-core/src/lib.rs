//! Core library for pawn auction document extraction.
//!
//! This crate provides:
//! - Catalog and winning-bid report parsers with a block fallback
//! - Layout noise stripping and Brazilian numeric normalization
//! - PDF text adapter (native builds only)
//! - Auction import with lot lookup and price per gram

pub mod auction;
pub mod error;
pub mod extraction;
pub mod models;
#[cfg(feature = "native")]
pub mod pdf;

pub use auction::{AuctionImport, ImportSummary, LotSummary};
pub use error::{ArremateError, ExtractionError, PdfError, Result};
pub use extraction::rules::{format_brl_amount, normalize_brl_value, parse_brl_amount};
pub use extraction::{
    parse_catalog, parse_report, CatalogParser, DocumentParser, ExtractionResult, ReportParser, Strategy,
};
pub use models::{ArremateConfig, CatalogRecord, DocumentKind, ExtractionConfig, ReportRecord, MISSING_VALUE};
#[cfg(feature = "native")]
pub use pdf::{PdfExtractor, PdfTextSource, PdfType};
