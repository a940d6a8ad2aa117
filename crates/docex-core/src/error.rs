//! Error types for the docex-core library.

use thiserror::Error;

/// Main error type for the docex library.
#[derive(Error, Debug)]
pub enum DocexError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the extraction dispatcher.
///
/// Missing fields are never errors: a field that cannot be found is simply
/// absent from the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The requested document type has no extraction profile.
    #[error("unsupported document type: {0:?}")]
    UnsupportedDocumentType(String),
}

impl ExtractionError {
    /// The offending document-type tag.
    pub fn tag(&self) -> &str {
        match self {
            ExtractionError::UnsupportedDocumentType(tag) => tag,
        }
    }
}

impl From<serde_json::Error> for DocexError {
    fn from(err: serde_json::Error) -> Self {
        DocexError::Config(err.to_string())
    }
}

/// Result type for the docex library.
pub type Result<T> = std::result::Result<T, DocexError>;
