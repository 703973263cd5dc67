//! Common regex patterns for auction document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Lot / contract identifiers
    pub static ref LOT_NUMBER: Regex = Regex::new(
        r"\d+\.\d+-\d+"
    ).unwrap();

    pub static ref LOT_CONTRACT: Regex = Regex::new(
        r"(\d+\.\d+-\d+)\s*/\s*(\d+\.\d+\.\d+-\d+)"
    ).unwrap();

    pub static ref REPORT_LOT_TOKEN: Regex = Regex::new(
        r"^\d{4}\.\d{6}-\d$"
    ).unwrap();

    // Currency value (Brazilian real)
    pub static ref CURRENCY_VALUE: Regex = Regex::new(
        r"R\$\s*\d[\d.,]*"
    ).unwrap();

    pub static ref CURRENCY_PREFIX: Regex = Regex::new(
        r"R\$\s*"
    ).unwrap();

    pub static ref THOUSANDS_GROUPED: Regex = Regex::new(
        r"^\d{1,3}(?:\.\d{3})+$"
    ).unwrap();

    // Weight in grams
    pub static ref WEIGHT_LABELLED: Regex = Regex::new(
        r"(?i)\bPESO(?:\s+LOTE)?\s*:?\s*(\d+(?:\.\d{3})*(?:,\d+)?)\s*(?:GRAMAS?|GR|G)\b"
    ).unwrap();

    pub static ref WEIGHT_BARE: Regex = Regex::new(
        r"(?i)(\d+(?:\.\d{3})*,\d{2})\s*G(?:RAMAS?|R)?\b"
    ).unwrap();

    // Masked CPF/CNPJ
    pub static ref TAX_ID_LINE: Regex = Regex::new(
        r"^(?:\d{3}\.\d{3}\.XXX-\d{2}|\d{3}\.\d{2}X\.XXX-\d{2}|\d{2}\.\d{3}\.XXX/\d{4}-\d{2})$"
    ).unwrap();

    pub static ref TAX_ID_LOOSE: Regex = Regex::new(
        r"[\dX]{2}\.[\dX]{3}\.[\dX]{3}/[\dX]{4}-[\dX]{2}|[\dX]{3}\.[\dX]{3}\.[\dX]{3}-[\dX]{2}"
    ).unwrap();

    // Lot number followed by three amounts, whitespace optional
    pub static ref AWARD_GLUED: Regex = Regex::new(
        r"(?i)^(\d{4}\.\d{6}-\d)\s*(?:R\$\s*)?((?:\d{1,3}(?:\.\d{3})+|\d+),\d{2})\s*(?:R\$\s*)?((?:\d{1,3}(?:\.\d{3})+|\d+),\d{2})\s*(?:R\$\s*)?((?:\d{1,3}(?:\.\d{3})+|\d+),\d{2})"
    ).unwrap();

    // Catalog layout noise
    pub static ref PAGE_MARKER: Regex = Regex::new(
        r"--\s*\d+\s+of\s+\d+\s*--"
    ).unwrap();

    pub static ref PAGE_NUMBER: Regex = Regex::new(
        r"Página\s+\d+\s+de\s+\d+"
    ).unwrap();

    pub static ref PAGE_NUMBER_PREFIX: Regex = Regex::new(
        r"Página\s+\d+"
    ).unwrap();

    pub static ref CATALOG_HEADER_DESCRIPTION_FIRST: Regex = Regex::new(
        r"LOTE\s*/\s*CONTRATO\s+DESCRIÇÃO\s+VALOR\s+ANOTAÇÕES"
    ).unwrap();

    pub static ref CATALOG_HEADER_ANNOTATIONS_FIRST: Regex = Regex::new(
        r"LOTE\s*/\s*CONTRATO\s+ANOTAÇÕES\s+VALOR\s+DESCRIÇÃO"
    ).unwrap();

    pub static ref CATALOG_HEADER_ANY_SPACING: Regex = Regex::new(
        r"LOTE\s*/\s*CONTRATO\s*(?:DESCRIÇÃO\s*VALOR\s*ANOTAÇÕES|ANOTAÇÕES\s*VALOR\s*DESCRIÇÃO)"
    ).unwrap();

    pub static ref CENTRALIZER_MARKER: Regex = Regex::new(
        r"Centralizadora:"
    ).unwrap();

    pub static ref CENTRALIZER_TO_PAGE: Regex = Regex::new(
        r"Centralizadora:[\s\S]*?Página\s+\d+\s+de\s+\d+"
    ).unwrap();

    pub static ref OBSERVATIONS_MARKER: Regex = Regex::new(
        r"OBSERVAÇÕES:"
    ).unwrap();

    pub static ref PARTICIPATING_UNITS_MARKER: Regex = Regex::new(
        r"UNIDADES PARTICIPANTES:"
    ).unwrap();

    pub static ref LOT_OR_OBSERVATIONS: Regex = Regex::new(
        r"\d+\.\d+-\d+|OBSERVAÇÕES:"
    ).unwrap();

    // Report layout noise
    pub static ref REPORT_LETTERHEAD: Regex = Regex::new(
        r"CAIXA ECONÔMICA FEDERAL[\s\S]*?Data Atual:.*?\d+:"
    ).unwrap();

    pub static ref REPORT_LETTERHEAD_TO_TOTAL: Regex = Regex::new(
        r"CAIXA ECONÔMICA FEDERAL[\s\S]*?Total"
    ).unwrap();

    pub static ref REPORT_COLUMN_HEADER: Regex = Regex::new(
        r"C\.P\.F/C\.N\.PJ\s+Número Lote\s+Valor Lance\s+Tarifa Arrematação\s+Total"
    ).unwrap();

    pub static ref REPORT_REGISTRATION: Regex = Regex::new(
        r"Matrícula:.*?Data da Licitação:.*?\d+/\d+/\d+"
    ).unwrap();

    pub static ref REPORT_CONTACT: Regex = Regex::new(
        r"Alô CAIXA:.*?Ouvidoria:.*?\d+"
    ).unwrap();

    pub static ref REPORT_CONTACT_MARKER: Regex = Regex::new(
        r"Alô CAIXA:"
    ).unwrap();

    pub static ref REPORT_SUBTOTAL: Regex = Regex::new(
        r"\(\d+\)\s+[\d.,]+Total"
    ).unwrap();
}

/// Substrings marking catalog lines that never carry lot data.
pub const CATALOG_BOILERPLATE: &[&str] = &[
    "Centralizadora:",
    "LOTE / CONTRATO",
    "DESCRIÇÃO VALOR ANOTAÇÕES",
    "OBSERVAÇÕES:",
    "UNIDADES PARTICIPANTES:",
];

/// Substrings marking report lines skipped by the line parser.
pub const REPORT_LINE_BOILERPLATE: &[&str] = &[
    "Sipen - Sistema",
    "Relatório de Apuração",
    "P.V. ",
];

/// Substrings marking report lines skipped by the block parser.
pub const REPORT_BLOCK_BOILERPLATE: &[&str] = &[
    "Total",
    "Matrícula",
    "Data da Licitação",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lot_contract_pattern() {
        let caps = LOT_CONTRACT.captures("0235.000186-0 / 0123.456.789-0 ANEL").unwrap();
        assert_eq!(&caps[1], "0235.000186-0");
        assert_eq!(&caps[2], "0123.456.789-0");

        assert!(LOT_CONTRACT.is_match("0235.000186-0/0123.456.789-0"));
        assert!(!LOT_CONTRACT.is_match("0235.000186-0 / 0123.456-0"));
    }

    #[test]
    fn test_currency_value_requires_digit() {
        assert_eq!(CURRENCY_VALUE.find("R$ 1.296,00 obs").unwrap().as_str(), "R$ 1.296,00");
        assert!(!CURRENCY_VALUE.is_match("R$ ,"));
    }

    #[test]
    fn test_tax_id_line_shapes() {
        assert!(TAX_ID_LINE.is_match("123.456.XXX-78"));
        assert!(TAX_ID_LINE.is_match("123.45X.XXX-78"));
        assert!(TAX_ID_LINE.is_match("12.345.XXX/0001-90"));
        assert!(!TAX_ID_LINE.is_match("123.456.789-78"));
    }

    #[test]
    fn test_loose_tax_id_does_not_match_lot_numbers() {
        assert!(TAX_ID_LOOSE.is_match("1X3.4X6.XXX-7X"));
        assert!(!TAX_ID_LOOSE.is_match("0235.000186-0 3.090,00"));
    }

    #[test]
    fn test_loose_tax_id_matches_glued_text() {
        let found = TAX_ID_LOOSE.find("3.275,40Total98.765.XXX/0001-12").unwrap();
        assert_eq!(found.as_str(), "98.765.XXX/0001-12");

        let found = TAX_ID_LOOSE.find("123.456.XXX-780235.000186-0").unwrap();
        assert_eq!(found.as_str(), "123.456.XXX-78");
    }

    #[test]
    fn test_award_glued_splits_amounts() {
        let caps = AWARD_GLUED.captures("0235.000186-03.090,00185,403.275,40").unwrap();
        assert_eq!(&caps[1], "0235.000186-0");
        assert_eq!(&caps[2], "3.090,00");
        assert_eq!(&caps[3], "185,40");
        assert_eq!(&caps[4], "3.275,40");
    }
}
