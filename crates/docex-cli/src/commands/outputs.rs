//! Outputs command - list generated files.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::load_config;
use crate::output::{list_outputs, OutputFile};

/// Arguments for the outputs command.
#[derive(Args)]
pub struct OutputsArgs {
    /// Directory to list (default from config)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: OutputsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let dir = args.dir.unwrap_or(config.output.output_dir);
    let files = list_outputs(&dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.is_empty() {
        println!(
            "{} No output files in {}",
            style("ℹ").blue(),
            dir.display()
        );
        return Ok(());
    }

    println!("{}", style(format!("Output files in {}:", dir.display())).bold());
    for file in &files {
        println!("{}", format_entry(file));
    }

    Ok(())
}

fn format_entry(file: &OutputFile) -> String {
    format!(
        "  {:<40} {:<7} {:>10}  {}",
        file.filename,
        file.kind,
        human_size(file.size),
        file.modified.format("%Y-%m-%d %H:%M:%S")
    )
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
    }
}
