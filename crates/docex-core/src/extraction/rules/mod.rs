//! Rule-based field matchers.
//!
//! A [`FieldRule`] is an ordered list of patterns for one output field. The
//! first pattern that matches anywhere in the text wins and later patterns
//! are never consulted, even when they would give a more specific value.

pub mod normalize;
pub mod patterns;
pub mod structural;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

pub use normalize::{normalize_decimal, strip_whitespace, title_case, Normalizer};
pub use structural::{company_header, merchant_line, Heuristic};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Every candidate the extractor could produce, in evaluation order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A normalized value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    /// Normalized value.
    pub value: String,
    /// Index of the pattern (or heuristic branch) that produced it.
    pub pattern_index: usize,
    /// Byte span in the input text of the whole match that produced the
    /// value. Both fields of a range rule share their pattern's span.
    /// `None` for heuristics that pick a line rather than match a pattern.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl FieldMatch {
    pub fn new(value: impl Into<String>, pattern_index: usize, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            pattern_index,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// One pattern of a field rule: regex, capture group and normalizer.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub regex: &'static Regex,
    /// Capture group holding the value; 0 is the whole match.
    pub group: usize,
    pub normalizer: Normalizer,
}

impl PatternRule {
    pub fn new(regex: &'static Regex, group: usize, normalizer: Normalizer) -> Self {
        Self {
            regex,
            group,
            normalizer,
        }
    }

    fn try_match(&self, text: &str, index: usize) -> Option<FieldMatch> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        let raw = caps.get(self.group)?;

        Some(
            FieldMatch::new(self.normalizer.apply(raw.as_str()), index, whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

/// Ordered patterns for one output field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: &'static str,
    pub patterns: Vec<PatternRule>,
}

impl FieldRule {
    pub fn new(field: &'static str, patterns: Vec<PatternRule>) -> Self {
        Self { field, patterns }
    }
}

impl FieldExtractor for FieldRule {
    type Output = FieldMatch;

    fn extract(&self, text: &str) -> Option<FieldMatch> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.try_match(text, i))
    }

    fn extract_all(&self, text: &str) -> Vec<FieldMatch> {
        self.patterns
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.try_match(text, i))
            .collect()
    }
}

/// Two fields captured together by one pattern (groups 1 and 2).
#[derive(Debug, Clone)]
pub struct RangeRule {
    pub start_field: &'static str,
    pub end_field: &'static str,
    pub patterns: Vec<&'static Regex>,
}

impl RangeRule {
    pub fn new(start_field: &'static str, end_field: &'static str, patterns: Vec<&'static Regex>) -> Self {
        Self {
            start_field,
            end_field,
            patterns,
        }
    }
}

impl FieldExtractor for RangeRule {
    type Output = (FieldMatch, FieldMatch);

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.patterns
            .iter()
            .enumerate()
            .find_map(|(i, re)| range_match(re, text, i))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.patterns
            .iter()
            .enumerate()
            .filter_map(|(i, re)| range_match(re, text, i))
            .collect()
    }
}

fn range_match(re: &Regex, text: &str, index: usize) -> Option<(FieldMatch, FieldMatch)> {
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let start = caps.get(1)?;
    let end = caps.get(2)?;

    Some((
        FieldMatch::new(start.as_str(), index, whole.as_str())
            .with_position(whole.start(), whole.end()),
        FieldMatch::new(end.as_str(), index, whole.as_str())
            .with_position(whole.start(), whole.end()),
    ))
}

/// A structural heuristic bound to an output field.
#[derive(Debug, Clone)]
pub struct StructuralRule {
    pub field: &'static str,
    pub heuristic: Heuristic,
}

impl FieldExtractor for StructuralRule {
    type Output = FieldMatch;

    fn extract(&self, text: &str) -> Option<FieldMatch> {
        self.heuristic.apply(text)
    }

    fn extract_all(&self, text: &str) -> Vec<FieldMatch> {
        self.extract(text).into_iter().collect()
    }
}

/// One entry of a document profile's rule table.
#[derive(Debug, Clone)]
pub enum Rule {
    Field(FieldRule),
    Range(RangeRule),
    Structural(StructuralRule),
}

impl Rule {
    /// Shorthand for a single-field pattern rule.
    pub fn field(field: &'static str, patterns: Vec<PatternRule>) -> Self {
        Rule::Field(FieldRule::new(field, patterns))
    }

    /// Shorthand for a two-field range rule.
    pub fn range(start_field: &'static str, end_field: &'static str, patterns: Vec<&'static Regex>) -> Self {
        Rule::Range(RangeRule::new(start_field, end_field, patterns))
    }

    /// Shorthand for a structural heuristic.
    pub fn structural(field: &'static str, heuristic: Heuristic) -> Self {
        Rule::Structural(StructuralRule { field, heuristic })
    }

    /// Output fields this rule can populate.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Rule::Field(r) => vec![r.field],
            Rule::Range(r) => vec![r.start_field, r.end_field],
            Rule::Structural(r) => vec![r.field],
        }
    }

    /// Evaluate the rule; empty when nothing matched.
    pub fn apply(&self, text: &str) -> Vec<(&'static str, FieldMatch)> {
        let found = match self {
            Rule::Field(r) => r.extract(text).map(|m| vec![(r.field, m)]),
            Rule::Range(r) => r
                .extract(text)
                .map(|(start, end)| vec![(r.start_field, start), (r.end_field, end)]),
            Rule::Structural(r) => r.extract(text).map(|m| vec![(r.field, m)]),
        }
        .unwrap_or_default();

        for (field, m) in &found {
            trace!(field = *field, pattern = m.pattern_index, value = %m.value, "field matched");
        }

        found
    }

    /// All candidates per field, including those shadowed by an earlier pattern.
    pub fn candidates(&self, text: &str) -> Vec<(&'static str, FieldMatch)> {
        match self {
            Rule::Field(r) => r.extract_all(text).into_iter().map(|m| (r.field, m)).collect(),
            Rule::Range(r) => r
                .extract_all(text)
                .into_iter()
                .flat_map(|(start, end)| [(r.start_field, start), (r.end_field, end)])
                .collect(),
            Rule::Structural(r) => r.extract_all(text).into_iter().map(|m| (r.field, m)).collect(),
        }
    }
}
