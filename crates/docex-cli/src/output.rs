//! Record serialization: JSON and CSV files, output directory listing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use tracing::warn;

use docex_core::models::config::OutputConfig;
use docex_core::{fields, ExtractedRecord};

/// Field appended by the CLI naming the input file of a record.
pub const SOURCE_FIELD: &str = "fichier_source";

const UTF8_BOM: &str = "\u{feff}";

/// Longest string a worksheet cell can hold.
const XLSX_MAX_CELL_CHARS: usize = 32_767;

/// Apply output settings to a record before it is serialized.
pub fn prepare(record: &mut ExtractedRecord, config: &OutputConfig) {
    if !config.include_raw_text {
        record.remove(fields::TEXTE_BRUT);
    }
}

/// Number of fields the extraction actually found.
pub fn extracted_field_count(record: &ExtractedRecord) -> usize {
    record
        .keys()
        .filter(|k| ![fields::TYPE_DOCUMENT, fields::TEXTE_BRUT, SOURCE_FIELD].contains(k))
        .count()
}

/// Pretty JSON with four-space indentation; non-ASCII is written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Column set for a group of records: union of keys in first-seen order.
pub fn csv_columns(records: &[ExtractedRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// CSV with one row per record; absent fields are empty cells.
pub fn records_to_csv(records: &[ExtractedRecord], bom: bool) -> anyhow::Result<String> {
    let columns = csv_columns(records);
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(&columns)?;
    for record in records {
        wtr.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    if bom {
        Ok(format!("{UTF8_BOM}{data}"))
    } else {
        Ok(data)
    }
}

/// Single-sheet workbook with the same columns as [`records_to_csv`].
pub fn records_to_xlsx(records: &[ExtractedRecord]) -> anyhow::Result<Vec<u8>> {
    let columns = csv_columns(records);
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (row, record) in records.iter().enumerate() {
        for (col, name) in columns.iter().enumerate() {
            if let Some(value) = record.get(name) {
                sheet.write_string(row as u32 + 1, col as u16, cell_text(name, value))?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn cell_text<'a>(field: &str, value: &'a str) -> &'a str {
    match value.char_indices().nth(XLSX_MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(field, "value truncated to fit a worksheet cell");
            &value[..cut]
        }
        None => value,
    }
}

/// `<prefix>_<YYYYmmdd_HHMMSS>.<extension>`
pub fn timestamped_filename(prefix: &str, extension: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), extension)
}

/// A file found in the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct OutputFile {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub kind: &'static str,
}

fn output_kind(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => "csv",
        Some("json") => "json",
        Some("xlsx") => "excel",
        _ => "unknown",
    }
}

/// Files in `dir`, most recently modified first. A missing directory is empty.
pub fn list_outputs(dir: &Path) -> std::io::Result<Vec<OutputFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let path = entry.path();
        let modified: DateTime<Local> = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();
        files.push(OutputFile {
            filename: entry.file_name().to_string_lossy().into_owned(),
            kind: output_kind(&path),
            path,
            size: metadata.len(),
            modified,
        });
    }

    files.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(files)
}
