//! Layout noise stripping applied before structural parsing.
//!
//! Each pipeline stage gets its own ordered rule list. Section rules come
//! first: a line-level rule that ran earlier could remove the marker a
//! section rule stops at and let boilerplate leak into record text.

use regex::Regex;
use tracing::trace;

use super::patterns::*;

/// A single text removal step.
#[derive(Debug, Clone, Copy)]
pub enum NoiseRule {
    /// Remove every match of the pattern.
    Replace(&'static Regex),
    /// Remove from each `start` match up to (not including) the next
    /// `stop` match, or to end of input when `stop` is absent or unseen.
    Section {
        start: &'static Regex,
        stop: Option<&'static Regex>,
    },
}

impl NoiseRule {
    fn apply(&self, text: &str) -> String {
        match *self {
            NoiseRule::Replace(pattern) => pattern.replace_all(text, "").into_owned(),
            NoiseRule::Section { start, stop } => strip_sections(text, start, stop),
        }
    }
}

fn strip_sections(text: &str, start: &Regex, stop: Option<&Regex>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(marker) = start.find_at(text, cursor) {
        out.push_str(&text[cursor..marker.start()]);
        cursor = stop
            .and_then(|stop| stop.find_at(text, marker.end()))
            .map(|m| m.start())
            .unwrap_or(text.len());
    }

    out.push_str(&text[cursor..]);
    out
}

/// An ordered list of noise rules.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    name: &'static str,
    rules: Vec<NoiseRule>,
}

impl NoiseFilter {
    pub fn new(name: &'static str, rules: Vec<NoiseRule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run every rule in order.
    pub fn apply(&self, text: &str) -> String {
        let cleaned = self
            .rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc));

        trace!(
            filter = self.name,
            removed = text.len() - cleaned.len(),
            "Stripped layout noise"
        );
        cleaned
    }

    /// Rules for the line-oriented catalog parser.
    pub fn catalog_lines() -> Self {
        Self::new(
            "catalog_lines",
            vec![
                NoiseRule::Section { start: &*CENTRALIZER_MARKER, stop: Some(&*LOT_NUMBER) },
                NoiseRule::Section { start: &*OBSERVATIONS_MARKER, stop: Some(&*LOT_NUMBER) },
                NoiseRule::Section {
                    start: &*PARTICIPATING_UNITS_MARKER,
                    stop: Some(&*LOT_OR_OBSERVATIONS),
                },
                NoiseRule::Replace(&*PAGE_MARKER),
                NoiseRule::Replace(&*CATALOG_HEADER_ANNOTATIONS_FIRST),
                NoiseRule::Replace(&*CATALOG_HEADER_DESCRIPTION_FIRST),
                NoiseRule::Replace(&*PAGE_NUMBER),
            ],
        )
    }

    /// Rules for the block-oriented catalog parser.
    pub fn catalog_blocks() -> Self {
        Self::new(
            "catalog_blocks",
            vec![
                NoiseRule::Replace(&*CENTRALIZER_TO_PAGE),
                NoiseRule::Section { start: &*OBSERVATIONS_MARKER, stop: None },
                NoiseRule::Section {
                    start: &*PARTICIPATING_UNITS_MARKER,
                    stop: Some(&*LOT_OR_OBSERVATIONS),
                },
                NoiseRule::Replace(&*PAGE_MARKER),
                NoiseRule::Replace(&*CATALOG_HEADER_ANY_SPACING),
            ],
        )
    }

    /// Rules for the line-oriented report parser.
    pub fn report_lines() -> Self {
        Self::new(
            "report_lines",
            vec![
                NoiseRule::Replace(&*REPORT_LETTERHEAD),
                NoiseRule::Replace(&*REPORT_COLUMN_HEADER),
                NoiseRule::Replace(&*REPORT_REGISTRATION),
                NoiseRule::Replace(&*REPORT_CONTACT),
                NoiseRule::Replace(&*REPORT_SUBTOTAL),
            ],
        )
    }

    /// Rules for the block-oriented report parser.
    pub fn report_blocks() -> Self {
        Self::new(
            "report_blocks",
            vec![
                NoiseRule::Replace(&*REPORT_LETTERHEAD_TO_TOTAL),
                NoiseRule::Section { start: &*REPORT_CONTACT_MARKER, stop: None },
            ],
        )
    }
}
