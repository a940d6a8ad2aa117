//! Normalization of matched substrings.

use serde::Serialize;

/// Canonicalization applied to a raw match before it enters the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    /// Keep the matched text as-is (dates, times, names).
    Verbatim,
    /// Decimal comma becomes a period. No thousands or currency handling.
    DecimalComma,
    /// Drop embedded whitespace (VAT number, SIRET, account number).
    StripWhitespace,
    /// Title case, e.g. `BNP PARIBAS` -> `Bnp Paribas`.
    TitleCase,
}

impl Normalizer {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Normalizer::Verbatim => raw.to_string(),
            Normalizer::DecimalComma => normalize_decimal(raw),
            Normalizer::StripWhitespace => strip_whitespace(raw),
            Normalizer::TitleCase => title_case(raw),
        }
    }
}

/// Replace the decimal comma with a period.
pub fn normalize_decimal(raw: &str) -> String {
    raw.replace(',', ".")
}

/// Remove all whitespace from an identifier.
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for c in raw.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
