//! Process command - extract fields from a single OCR text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use tracing::{debug, info};

use docex_core::{fields, Dispatcher, DocexConfig, DocumentType, ExtractedRecord};

use super::load_config;
use crate::output::{self, SOURCE_FIELD};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file produced by OCR ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Document type: ticket, facture or releve (default from config)
    #[arg(short = 't', long = "type")]
    document_type: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Save to the output directory as extracted_data_<timestamp>.<ext>
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Show which pattern produced each field
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Excel workbook (file output only)
    Xlsx,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn from_config(config: &DocexConfig) -> Self {
        match config.output.format {
            docex_core::models::OutputFormatKind::Json => OutputFormat::Json,
            docex_core::models::OutputFormatKind::Csv => OutputFormat::Csv,
            docex_core::models::OutputFormatKind::Excel => OutputFormat::Xlsx,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Text => "txt",
        }
    }
}

/// Document type from the command line, else the configured default.
pub fn resolve_document_type(
    arg: Option<&str>,
    config: &DocexConfig,
) -> anyhow::Result<DocumentType> {
    match arg {
        Some(tag) => Ok(tag.parse::<DocumentType>()?),
        None => Ok(config.extraction.default_document_type),
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let document_type = resolve_document_type(args.document_type.as_deref(), &config)?;

    let from_stdin = args.input.as_os_str() == "-";
    let text = if from_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Processing file: {}", args.input.display());
        fs::read_to_string(&args.input)?
    };

    let dispatcher = Dispatcher::new();
    let mut record = dispatcher.extract(&text, document_type);
    if !from_stdin {
        record.insert(SOURCE_FIELD, args.input.display().to_string());
    }
    output::prepare(&mut record, &config.output);

    let format = args.format.unwrap_or_else(|| OutputFormat::from_config(&config));
    let output_path = if args.save {
        fs::create_dir_all(&config.output.output_dir)?;
        let filename = output::timestamped_filename("extracted_data", format.extension(), Local::now());
        Some(config.output.output_dir.join(filename))
    } else {
        args.output.clone()
    };

    if let Some(output_path) = &output_path {
        let content = format_file(&record, format, config.output.csv_bom)?;
        fs::write(output_path, &content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", format_stdout(&record, format)?);
    }

    if args.explain {
        print_explanation(&dispatcher, &text, document_type);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// File content. JSON files hold an array, like batch output.
fn format_file(
    record: &ExtractedRecord,
    format: OutputFormat,
    csv_bom: bool,
) -> anyhow::Result<Vec<u8>> {
    let records = std::slice::from_ref(record);
    match format {
        OutputFormat::Json => Ok(output::to_json(records)?.into_bytes()),
        OutputFormat::Csv => Ok(output::records_to_csv(records, csv_bom)?.into_bytes()),
        OutputFormat::Xlsx => output::records_to_xlsx(records),
        OutputFormat::Text => Ok(format_text(record).into_bytes()),
    }
}

fn format_stdout(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => output::to_json(record),
        OutputFormat::Csv => output::records_to_csv(std::slice::from_ref(record), false),
        OutputFormat::Xlsx => anyhow::bail!("xlsx output needs a file: use --output or --save"),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Document: {}\n",
        record.document_type().unwrap_or("?")
    ));

    let mut found = 0;
    for (field, value) in record {
        if field == fields::TYPE_DOCUMENT || field == fields::TEXTE_BRUT {
            continue;
        }
        out.push_str(&format!("  {:<15} {}\n", field, value));
        found += 1;
    }

    if found == 0 {
        out.push_str("  (no fields found)\n");
    }

    out
}

fn print_explanation(dispatcher: &Dispatcher, text: &str, document_type: DocumentType) {
    let explanations = dispatcher.explain(text, document_type);
    let profile = dispatcher.profile(document_type);

    eprintln!();
    eprintln!("{}", style("Field matches:").bold());
    for field in profile.field_names() {
        match explanations.iter().find(|e| e.field == field) {
            Some(e) => {
                eprintln!(
                    "  {} {:<15} pattern #{} {:?}",
                    style("✓").green(),
                    field,
                    e.chosen.pattern_index,
                    e.chosen.source
                );
                for s in &e.shadowed {
                    eprintln!(
                        "      {} pattern #{} would give {:?}",
                        style("↳").dim(),
                        s.pattern_index,
                        s.value
                    );
                }
            }
            None => eprintln!("  {} {:<15} not found", style("✗").red(), field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_document_type() {
        let config = DocexConfig::default();
        assert_eq!(resolve_document_type(None, &config).unwrap(), DocumentType::Ticket);
        assert_eq!(
            resolve_document_type(Some("releve"), &config).unwrap(),
            DocumentType::Releve
        );

        let err = resolve_document_type(Some("contrat"), &config).unwrap_err();
        assert!(err.to_string().contains("contrat"));
    }

    #[test]
    fn test_format_text() {
        let mut record = ExtractedRecord::new();
        record.insert(fields::TYPE_DOCUMENT, "ticket");
        record.insert(fields::TEXTE_BRUT, "TOTAL 1,00");
        record.insert(fields::MONTANT_TOTAL, "1.00");

        let text = format_text(&record);
        assert!(text.starts_with("Document: ticket\n"));
        assert!(text.contains("montant_total"));
        assert!(!text.contains("TOTAL 1,00"));
    }

    #[test]
    fn test_json_file_is_an_array() {
        let mut record = ExtractedRecord::new();
        record.insert(fields::TYPE_DOCUMENT, "ticket");

        let bytes = format_file(&record, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!([{"type_document": "ticket"}]));
    }

    #[test]
    fn test_xlsx_needs_a_file() {
        let record = ExtractedRecord::new();
        assert!(format_stdout(&record, OutputFormat::Xlsx).is_err());
        assert!(format_file(&record, OutputFormat::Xlsx, false).is_ok());
    }

    #[test]
    fn test_format_text_empty() {
        let mut record = ExtractedRecord::new();
        record.insert(fields::TYPE_DOCUMENT, "facture");
        assert!(format_text(&record).contains("(no fields found)"));
    }
}
