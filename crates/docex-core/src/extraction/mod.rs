//! Document-type-aware field extraction.

mod dispatcher;
pub mod profiles;
pub mod rules;

pub use dispatcher::{extract, extract_tagged, Dispatcher, FieldExplanation};
pub use profiles::{DocumentProfile, FactureProfile, ReleveProfile, TicketProfile};
pub use rules::{FieldExtractor, FieldMatch, FieldRule, Normalizer, PatternRule, Rule};
