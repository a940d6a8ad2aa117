//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DocexError, Result};
use crate::models::document::DocumentType;

/// Main configuration for docex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Record serialization configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Document type used when none is given on the command line.
    pub default_document_type: DocumentType,

    /// File extensions accepted as OCR text input.
    pub input_extensions: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_document_type: DocumentType::Ticket,
            input_extensions: vec!["txt".to_string()],
        }
    }
}

impl ExtractionConfig {
    /// Whether a file extension is accepted as input (case-insensitive).
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.input_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

/// Serialized output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormatKind {
    #[default]
    Json,
    Csv,
    /// `.xlsx` workbook.
    Excel,
}

/// Record serialization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormatKind,

    /// Directory receiving batch output files.
    pub output_dir: PathBuf,

    /// Keep `texte_brut` in serialized records.
    pub include_raw_text: bool,

    /// Prefix CSV files with a UTF-8 byte order mark (spreadsheet friendly).
    pub csv_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormatKind::Json,
            output_dir: PathBuf::from("output"),
            include_raw_text: true,
            csv_bom: true,
        }
    }
}

impl DocexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DocexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
