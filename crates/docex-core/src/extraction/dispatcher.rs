//! Extraction dispatcher: selects a profile by document type and runs it.

use tracing::{info, warn};

use crate::error::ExtractionError;
use crate::models::document::DocumentType;
use crate::models::record::ExtractedRecord;

use super::profiles::{DocumentProfile, FactureProfile, ReleveProfile, TicketProfile};
use super::rules::FieldMatch;

static TICKET: TicketProfile = TicketProfile;
static FACTURE: FactureProfile = FactureProfile;
static RELEVE: ReleveProfile = ReleveProfile;

/// A field match reported by [`Dispatcher::explain`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldExplanation {
    pub field: &'static str,
    /// The value that lands in the record.
    pub chosen: FieldMatch,
    /// Matches from later patterns that were not used.
    pub shadowed: Vec<FieldMatch>,
}

/// Routes extraction calls to the profile for a document type.
///
/// Stateless: every call is independent and may run on any thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Profile for a document type.
    pub fn profile(&self, document_type: DocumentType) -> &'static dyn DocumentProfile {
        match document_type {
            DocumentType::Ticket => &TICKET,
            DocumentType::Facture => &FACTURE,
            DocumentType::Releve => &RELEVE,
        }
    }

    /// Extract a record from OCR text.
    pub fn extract(&self, text: &str, document_type: DocumentType) -> ExtractedRecord {
        info!(
            document_type = %document_type,
            chars = text.chars().count(),
            "extracting fields"
        );
        self.profile(document_type).extract(text)
    }

    /// Extract using a string tag. Unknown tags fail without producing a record.
    pub fn extract_tagged(&self, text: &str, tag: &str) -> Result<ExtractedRecord, ExtractionError> {
        let document_type = tag.parse::<DocumentType>().inspect_err(|e| {
            warn!(tag = e.tag(), "unsupported document type");
        })?;
        Ok(self.extract(text, document_type))
    }

    /// Winning match per field plus the candidates it shadowed.
    pub fn explain(&self, text: &str, document_type: DocumentType) -> Vec<FieldExplanation> {
        let profile = self.profile(document_type);
        let mut explanations = Vec::new();

        for rule in profile.rules() {
            let candidates = rule.candidates(text);
            for (field, chosen) in rule.apply(text) {
                let shadowed = candidates
                    .iter()
                    .filter(|(f, m)| *f == field && m.pattern_index != chosen.pattern_index)
                    .map(|(_, m)| m.clone())
                    .collect();
                explanations.push(FieldExplanation {
                    field,
                    chosen,
                    shadowed,
                });
            }
        }

        explanations
    }
}

/// Extract a record with the default dispatcher.
pub fn extract(text: &str, document_type: DocumentType) -> ExtractedRecord {
    Dispatcher::new().extract(text, document_type)
}

/// Extract a record for a string document-type tag.
pub fn extract_tagged(text: &str, tag: &str) -> Result<ExtractedRecord, ExtractionError> {
    Dispatcher::new().extract_tagged(text, tag)
}
