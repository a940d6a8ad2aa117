//! Core library for extracting structured fields from OCR text.
//!
//! This crate provides:
//! - Document types for receipts (`ticket`), invoices (`facture`) and bank
//!   statements (`releve`)
//! - Ordered, table-driven field rules with normalization
//! - A dispatcher returning one [`ExtractedRecord`] per call
//!
//! Image preprocessing and OCR happen upstream; this crate only sees text.

pub mod error;
pub mod extraction;
pub mod models;

pub use error::{DocexError, ExtractionError, Result};
pub use extraction::{extract, extract_tagged, Dispatcher, DocumentProfile, FieldExplanation};
pub use models::config::DocexConfig;
pub use models::document::DocumentType;
pub use models::record::{fields, ExtractedRecord};
