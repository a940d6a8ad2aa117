//! Document type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Class of scanned document, selecting which extraction profile runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Till receipt (ticket de caisse).
    #[default]
    Ticket,
    /// Invoice (facture).
    Facture,
    /// Bank statement (relevé bancaire).
    Releve,
}

impl DocumentType {
    /// All supported document types, in declaration order.
    pub const ALL: [DocumentType; 3] = [Self::Ticket, Self::Facture, Self::Releve];

    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Facture => "facture",
            Self::Releve => "releve",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ExtractionError;

    /// Tags are matched exactly: no case folding, no trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ticket" => Ok(Self::Ticket),
            "facture" => Ok(Self::Facture),
            "releve" => Ok(Self::Releve),
            _ => Err(ExtractionError::UnsupportedDocumentType(s.to_string())),
        }
    }
}
