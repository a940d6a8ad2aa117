//! Position-based heuristics for merchant and issuer names.

use serde::Serialize;

use super::patterns::COMPANY_LEGAL_FORM;
use super::FieldMatch;

/// Lines shorter than this are considered noise when picking the merchant.
const MIN_MERCHANT_LEN: usize = 3;

/// Number of header lines searched for the issuer's company name.
const HEADER_LINES: usize = 5;

/// A field heuristic based on where text sits, not on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// First line of the receipt, or the second when the first is too short.
    MerchantLine,
    /// Company name with legal form in the header, else the first line.
    CompanyHeader,
}

impl Heuristic {
    pub fn apply(&self, text: &str) -> Option<FieldMatch> {
        match self {
            Heuristic::MerchantLine => merchant_line(text),
            Heuristic::CompanyHeader => company_header(text),
        }
    }
}

fn header_lines(text: &str) -> Vec<&str> {
    text.trim().split('\n').collect()
}

/// Merchant name: first line, falling back to the second when the first
/// has fewer than three characters.
pub fn merchant_line(text: &str) -> Option<FieldMatch> {
    let lines = header_lines(text);

    let first = lines.first()?.trim();
    let (value, index) = match lines.get(1) {
        Some(second) if first.chars().count() < MIN_MERCHANT_LEN => (second.trim(), 1),
        _ => (first, 0),
    };

    if value.is_empty() {
        return None;
    }
    Some(FieldMatch::new(value, index, value))
}

/// Issuer name: `<name> SARL|SAS|SA|EURL|EI|SASU` within the first five
/// lines, else the first line.
pub fn company_header(text: &str) -> Option<FieldMatch> {
    let lines = header_lines(text);
    let header = lines
        .iter()
        .take(HEADER_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    // Newlines became single spaces, so header offsets shift only by the
    // leading whitespace that `trim` removed.
    if let Some(m) = COMPANY_LEGAL_FORM.find(&header) {
        let offset = text.len() - text.trim_start().len();
        return Some(
            FieldMatch::new(m.as_str(), 0, m.as_str())
                .with_position(offset + m.start(), offset + m.end()),
        );
    }

    let first = lines.first()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(FieldMatch::new(first, 1, first))
}
