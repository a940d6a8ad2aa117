//! Batch processing command for multiple OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use docex_core::{Dispatcher, DocumentType, ExtractedRecord};

use super::load_config;
use super::process::resolve_document_type;
use crate::output::{self, SOURCE_FIELD};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Document type of every file: ticket, facture or releve (default from config)
    #[arg(short = 't', long = "type")]
    document_type: Option<String>,

    /// Output directory (default from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format of the combined file
    #[arg(short, long, value_enum)]
    format: Option<BatchFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BatchFormat {
    Json,
    Csv,
    Xlsx,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<ExtractedRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let document_type = resolve_document_type(args.document_type.as_deref(), &config)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            config.extraction.accepts_extension(ext)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process as {}",
        style("ℹ").blue(),
        files.len(),
        document_type
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.output_dir.clone());
    fs::create_dir_all(&output_dir)?;

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let results = process_files(&files, document_type, args.jobs, &progress);
    progress.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if !args.continue_on_error {
        if let Some(first) = failed.first() {
            let error_msg = first.error.as_deref().unwrap_or("unknown error");
            error!("Failed to process {}: {}", first.path.display(), error_msg);
            anyhow::bail!("Processing failed: {}", error_msg);
        }
    }

    // Write the combined output
    if !successful.is_empty() {
        let records: Vec<ExtractedRecord> = successful
            .iter()
            .filter_map(|r| r.record.clone())
            .map(|mut record| {
                output::prepare(&mut record, &config.output);
                record
            })
            .collect();

        let format = args.format.unwrap_or(match config.output.format {
            docex_core::models::OutputFormatKind::Json => BatchFormat::Json,
            docex_core::models::OutputFormatKind::Csv => BatchFormat::Csv,
            docex_core::models::OutputFormatKind::Excel => BatchFormat::Xlsx,
        });

        let (extension, content) = match format {
            BatchFormat::Json => ("json", output::to_json(&records)?.into_bytes()),
            BatchFormat::Csv => (
                "csv",
                output::records_to_csv(&records, config.output.csv_bom)?.into_bytes(),
            ),
            BatchFormat::Xlsx => ("xlsx", output::records_to_xlsx(&records)?),
        };

        let output_path = output_dir.join(output::timestamped_filename("batch", extension, Local::now()));
        fs::write(&output_path, content)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    }

    if args.summary {
        let summary_path = output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Extract every file across `jobs` worker threads. Results keep input order.
fn process_files(
    files: &[PathBuf],
    document_type: DocumentType,
    jobs: usize,
    progress: &ProgressBar,
) -> Vec<ProcessResult> {
    let dispatcher = Dispatcher::new();
    let chunk_size = files.len().div_ceil(jobs.max(1)).max(1);

    thread::scope(|scope| {
        let workers: Vec<_> = files
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| {
                            let result = process_timed(path, &dispatcher, document_type);
                            progress.inc(1);
                            result
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        workers
            .into_iter()
            .flat_map(|worker| match worker.join() {
                Ok(results) => results,
                Err(_) => {
                    warn!("Worker thread panicked");
                    Vec::new()
                }
            })
            .collect()
    })
}

fn process_timed(path: &Path, dispatcher: &Dispatcher, document_type: DocumentType) -> ProcessResult {
    let file_start = Instant::now();
    let result = process_single_file(path, dispatcher, document_type);
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match result {
        Ok(record) => {
            debug!("Extracted {} fields from {}", output::extracted_field_count(&record), path.display());
            ProcessResult {
                path: path.to_path_buf(),
                record: Some(record),
                error: None,
                processing_time_ms,
            }
        }
        Err(e) => {
            warn!("Failed to process {}: {}", path.display(), e);
            ProcessResult {
                path: path.to_path_buf(),
                record: None,
                error: Some(e.to_string()),
                processing_time_ms,
            }
        }
    }
}

fn process_single_file(
    path: &Path,
    dispatcher: &Dispatcher,
    document_type: DocumentType,
) -> anyhow::Result<ExtractedRecord> {
    let text = fs::read_to_string(path)?;
    let mut record = dispatcher.extract(&text, document_type);
    record.insert(SOURCE_FIELD, path.display().to_string());
    Ok(record)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "fields_found",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                &output::extracted_field_count(record).to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
