//! Document profiles: one table of field rules per document type.

mod facture;
mod releve;
mod ticket;

pub use facture::FactureProfile;
pub use releve::ReleveProfile;
pub use ticket::TicketProfile;

use tracing::debug;

use crate::models::document::DocumentType;
use crate::models::record::{fields, ExtractedRecord};

use super::rules::{FieldMatch, Rule};

/// Field extraction rules for one document type.
///
/// Rules run in table order and independently of each other. A profile never
/// fails: a field whose rule finds nothing is left out of the record.
pub trait DocumentProfile: Send + Sync {
    /// Document type this profile handles.
    fn document_type(&self) -> DocumentType;

    /// Ordered rule table.
    fn rules(&self) -> &[Rule];

    /// Winning match for every field found, in rule order.
    fn extract_matches(&self, text: &str) -> Vec<(&'static str, FieldMatch)> {
        self.rules().iter().flat_map(|rule| rule.apply(text)).collect()
    }

    /// Build the record for `text`.
    fn extract(&self, text: &str) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();
        record.insert(fields::TYPE_DOCUMENT, self.document_type().as_str());
        record.insert(fields::TEXTE_BRUT, text);

        let matches = self.extract_matches(text);
        debug!(
            document_type = %self.document_type(),
            fields_found = matches.len(),
            "profile applied"
        );

        for (field, m) in matches {
            record.insert(field, m.value);
        }

        record
    }

    /// Every output field this profile can populate, in rule order.
    fn field_names(&self) -> Vec<&'static str> {
        self.rules().iter().flat_map(|rule| rule.fields()).collect()
    }
}
