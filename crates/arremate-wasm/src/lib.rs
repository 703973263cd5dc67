//! WASM bindings for auction document extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! PDF decoding stays on the JavaScript side; these functions take the text
//! it produces.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use arremate_core::auction::{AuctionImport, ImportSummary, LotSummary};
use arremate_core::extraction::{CatalogParser, DocumentParser, ReportParser};
use arremate_core::models::config::ExtractionConfig;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract catalog lots from text.
///
/// Returns an array of lot objects, empty when nothing was recognized.
#[wasm_bindgen]
pub fn parse_catalog_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&arremate_core::parse_catalog(text))
}

/// Extract winning bids from report text.
#[wasm_bindgen]
pub fn parse_report_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&arremate_core::parse_report(text))
}

/// Normalize a Brazilian currency string (`R$ 1.296,00` -> `1296.00`).
#[wasm_bindgen]
pub fn normalize_brl_value(raw: &str) -> String {
    arremate_core::normalize_brl_value(raw)
}

/// Parse a Brazilian-formatted amount (e.g., "3.275,40").
#[wasm_bindgen]
pub fn parse_brl_amount(amount: &str) -> Option<f64> {
    arremate_core::parse_brl_amount(amount).and_then(|d| d.to_string().parse().ok())
}

/// Document extractor class for browser use.
#[wasm_bindgen]
pub struct DocumentExtractor {
    config: ExtractionConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportOutput {
    summary: ImportSummary,
    lots: Vec<LotSummary>,
}

#[wasm_bindgen]
impl DocumentExtractor {
    /// Create a new extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Characters of a lot kept as description before the annotation.
    #[wasm_bindgen]
    pub fn set_description_limit(&mut self, limit: usize) {
        self.config.description_limit = limit;
    }

    /// Largest accepted input in bytes.
    #[wasm_bindgen]
    pub fn set_max_input_bytes(&mut self, limit: usize) {
        self.config.max_input_bytes = limit;
    }

    /// Extract catalog lots, with the strategy used and any warnings.
    #[wasm_bindgen]
    pub fn extract_catalog(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = CatalogParser::with_config(self.config.clone())
            .parse(text)
            .map_err(js_error)?;
        to_js(&result)
    }

    /// Extract winning bids, with the strategy used and any warnings.
    #[wasm_bindgen]
    pub fn extract_report(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = ReportParser::with_config(self.config.clone())
            .parse(text)
            .map_err(js_error)?;
        to_js(&result)
    }

    /// Combine a catalog and report into an import summary with every lot.
    ///
    /// `auction_date` is `YYYY-MM-DD`. Fails when either document yields no
    /// records.
    #[wasm_bindgen]
    pub fn import_auction(
        &self,
        auction_date: &str,
        catalog_text: &str,
        report_text: &str,
    ) -> Result<JsValue, JsValue> {
        let date: NaiveDate = auction_date.parse().map_err(js_error)?;
        let import =
            AuctionImport::from_texts(date, catalog_text, report_text, &self.config).map_err(js_error)?;

        to_js(&ImportOutput {
            summary: import.summary(),
            lots: import.lot_summaries(),
        })
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_normalize_brl_value() {
        assert_eq!(normalize_brl_value("R$ 1.296,00"), "1296.00");
        assert_eq!(normalize_brl_value("R$50,00"), "50.00");
    }

    #[wasm_bindgen_test]
    fn test_parse_brl_amount() {
        let amount = parse_brl_amount("3.275,40");
        assert!(amount.is_some());
        assert!((amount.unwrap() - 3275.40).abs() < 0.01);
        assert!(parse_brl_amount("abc").is_none());
    }

    #[wasm_bindgen_test]
    fn test_parse_catalog_text_returns_array() {
        let value = parse_catalog_text("0235.000186-0 / 0123.456.789-0 ANEL R$ 10,00").unwrap();
        assert!(value.is_object());
    }

    #[wasm_bindgen_test]
    fn test_import_rejects_bad_date() {
        let extractor = DocumentExtractor::new();
        assert!(extractor.import_auction("15/01/2024", "", "").is_err());
    }
}
