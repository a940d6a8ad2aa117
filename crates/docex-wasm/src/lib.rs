//! WASM bindings for OCR text field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! OCR itself runs on the JavaScript side; these bindings take its text.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use docex_core::{Dispatcher, DocumentType, ExtractedRecord};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Records become plain JS objects rather than `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_type(tag: &str) -> Result<DocumentType, JsValue> {
    tag.parse::<DocumentType>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn record_json(record: &ExtractedRecord) -> Result<String, JsValue> {
    serde_json::to_string(record).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract fields from OCR text.
///
/// `document_type` is one of `ticket`, `facture` or `releve`.
#[wasm_bindgen]
pub fn extract_document(text: &str, document_type: &str) -> Result<JsValue, JsValue> {
    let document_type = parse_type(document_type)?;
    to_js(&Dispatcher::new().extract(text, document_type))
}

/// Same as [`extract_document`] but returns the record as a JSON string.
#[wasm_bindgen]
pub fn extract_document_json(text: &str, document_type: &str) -> Result<String, JsValue> {
    let document_type = parse_type(document_type)?;
    record_json(&Dispatcher::new().extract(text, document_type))
}

/// Tags accepted as document type.
#[wasm_bindgen]
pub fn supported_document_types() -> Vec<String> {
    DocumentType::ALL
        .iter()
        .map(|t| t.as_str().to_string())
        .collect()
}

/// Extractor bound to one document type.
#[wasm_bindgen]
pub struct DocumentExtractor {
    dispatcher: Dispatcher,
    document_type: DocumentType,
}

#[wasm_bindgen]
impl DocumentExtractor {
    /// Create an extractor for a document type.
    #[wasm_bindgen(constructor)]
    pub fn new(document_type: &str) -> Result<DocumentExtractor, JsValue> {
        Ok(Self {
            dispatcher: Dispatcher::new(),
            document_type: parse_type(document_type)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn document_type(&self) -> String {
        self.document_type.as_str().to_string()
    }

    /// Field names this extractor can fill, in output order.
    #[wasm_bindgen]
    pub fn field_names(&self) -> Vec<String> {
        self.dispatcher
            .profile(self.document_type)
            .field_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.dispatcher.extract(text, self.document_type))
    }

    /// Winning pattern per field plus the matches it shadowed.
    #[wasm_bindgen]
    pub fn explain(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.dispatcher.explain(text, self.document_type))
    }
}

/// Lines recognized by browser-side OCR, in reading order.
#[wasm_bindgen]
pub struct OcrLines {
    lines: Vec<OcrLine>,
}

struct OcrLine {
    text: String,
    confidence: f32,
}

#[wasm_bindgen]
impl OcrLines {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a recognized line.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str, confidence: f32) {
        self.lines.push(OcrLine {
            text: text.to_string(),
            confidence,
        });
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Mean confidence of all lines, 0 when empty.
    #[wasm_bindgen]
    pub fn mean_confidence(&self) -> f32 {
        if self.lines.is_empty() {
            return 0.0;
        }
        self.lines.iter().map(|l| l.confidence).sum::<f32>() / self.lines.len() as f32
    }

    /// Lines joined with newlines.
    #[wasm_bindgen]
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Extract fields from the joined text.
    #[wasm_bindgen]
    pub fn extract(&self, document_type: &str) -> Result<JsValue, JsValue> {
        extract_document(&self.text(), document_type)
    }
}

impl Default for OcrLines {
    fn default() -> Self {
        Self::new()
    }
}
