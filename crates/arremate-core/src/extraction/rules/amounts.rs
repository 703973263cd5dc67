//! Monetary value handling for Brazilian-formatted documents.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{CURRENCY_PREFIX, CURRENCY_VALUE, THOUSANDS_GROUPED};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::record::MISSING_VALUE;

/// Currency token extractor (`R$ 1.296,00`).
pub struct CurrencyValueExtractor;

impl CurrencyValueExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CurrencyValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CurrencyValueExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CURRENCY_VALUE.find(text).map(|m| {
            ExtractionMatch::new(normalize_brl_value(m.as_str()), m.as_str())
                .with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CURRENCY_VALUE
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(normalize_brl_value(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Remove a leading `R$` marker and surrounding whitespace.
pub fn strip_currency_prefix(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix("R$").unwrap_or(raw).trim().to_string()
}

/// Remove every `R$` marker from a line, keeping the amounts.
pub fn strip_currency_markers(line: &str) -> String {
    CURRENCY_PREFIX.replace_all(line, "").into_owned()
}

/// Normalize a Brazilian currency token into a plain decimal string.
///
/// `R$ 1.296,00` becomes `1296.00`. Tokens with no digits yield
/// [`MISSING_VALUE`].
pub fn normalize_brl_value(raw: &str) -> String {
    let stripped = strip_currency_prefix(raw);
    let number = stripped.trim_end_matches(['.', ',']);

    if !number.chars().any(|c| c.is_ascii_digit()) {
        return MISSING_VALUE.to_string();
    }

    normalize_brl_number(number)
}

/// Convert a Brazilian number (`1.234,5`) to decimal-point notation (`1234.5`).
///
/// Dots count as thousands separators when a decimal comma is present or
/// when they group exactly three digits; otherwise they are left alone.
pub fn normalize_brl_number(number: &str) -> String {
    let number: String = number.chars().filter(|c| !c.is_whitespace()).collect();

    if number.contains(',') {
        number.replace('.', "").replace(',', ".")
    } else if THOUSANDS_GROUPED.is_match(&number) {
        number.replace('.', "")
    } else {
        number
    }
}

/// Parse an already-normalized decimal string (`1296.00`).
pub fn parse_decimal_value(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

/// Parse a Brazilian-formatted amount (e.g., `"R$ 3.090,00"` or `"185,40"`).
pub fn parse_brl_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = strip_currency_prefix(s)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    parse_decimal_value(&normalize_brl_number(&cleaned))
}

/// Format amount in Brazilian style (`R$ 1.234,56`).
pub fn format_brl_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => return format!("R$ {}", s),
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, formatted, decimal_part)
}
