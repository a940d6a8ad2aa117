//! Data models: document types, extracted records and configuration.

pub mod config;
pub mod document;
pub mod record;

pub use config::{DocexConfig, ExtractionConfig, OutputConfig, OutputFormatKind};
pub use document::DocumentType;
pub use record::{fields, ExtractedRecord};
