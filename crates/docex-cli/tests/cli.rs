use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const RECEIPT: &str = "SUPERMARCHE ABC\n12/05/2023 14:30\nTOTAL: 45,67\n";

fn docex() -> Command {
    Command::cargo_bin("docex").unwrap()
}

/// Write a config file sending output to `output_dir`.
fn write_config(dir: &Path, output_dir: &Path, include_raw_text: bool) -> PathBuf {
    let path = dir.join("config.json");
    let config = serde_json::json!({
        "output": {
            "output_dir": output_dir,
            "include_raw_text": include_raw_text,
        }
    });
    fs::write(&path, config.to_string()).unwrap();
    path
}

fn files_with_prefix(dir: &Path, prefix: &str, extension: &str) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_string_lossy();
            name.starts_with(prefix) && name.ends_with(extension)
        })
        .collect();
    found.sort();
    found
}

#[test]
fn process_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .args(["process", "-t", "ticket", "-f", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"montant_total\": \"45.67\""))
        .stdout(predicate::str::contains("\"commerce\": \"SUPERMARCHE ABC\""))
        .stdout(predicate::str::contains("\"fichier_source\""));
}

#[test]
fn process_reads_stdin() {
    docex()
        .args(["process", "-t", "releve", "-f", "json", "-"])
        .write_stdin("Relevé du 01/01/2023 au 31/01/2023\nNouveau solde: -50,00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date_debut\": \"01/01/2023\""))
        .stdout(predicate::str::contains("\"solde\": \"-50.00\""))
        .stdout(predicate::str::contains("fichier_source").not());
}

#[test]
fn process_writes_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("facture.txt");
    let output = dir.path().join("out.csv");
    fs::write(&input, "Garage Lefebvre\nFacture n° F-2023-001\nTotal TTC: 120,00\n").unwrap();

    docex()
        .args(["process", "-t", "facture", "-f", "csv", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    let content = content.trim_start_matches('\u{feff}');
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("type_document,texte_brut"));
    assert!(header.contains("num_facture"));
    assert!(content.contains("F-2023-001"));
    assert!(content.contains("120.00"));
}

#[test]
fn process_rejects_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.txt");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .args(["process", "-t", "contrat"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("contrat"));
}

#[test]
fn process_missing_file_fails() {
    docex()
        .args(["process", "-t", "ticket", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_combined_output_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RECEIPT).unwrap();
    fs::write(inputs.join("b.txt"), "BOULANGERIE\nTOTAL 3,10\n").unwrap();
    fs::write(inputs.join("ignored.md"), "TOTAL 9,99").unwrap();

    let pattern = format!("{}/*", inputs.display());
    docex()
        .args(["batch", &pattern, "-t", "ticket", "-f", "json", "--summary", "-j", "2", "-o"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records written"));

    let batch_file = fs::read_dir(&outputs)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with("batch_") && name.ends_with(".json"))
        .expect("combined output file");

    let content = fs::read_to_string(outputs.join(batch_file)).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["montant_total"], "45.67");
    assert_eq!(records[1]["montant_total"], "3.10");

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,fields_found,processing_time_ms,error\n"));
    assert!(summary.contains("a.txt,success,4,"));
    assert!(!summary.contains("ignored.md"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = format!("{}/*.txt", dir.path().display());

    docex()
        .args(["batch", &pattern])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn outputs_lists_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("batch_20240101_000000.json"), "[]").unwrap();

    docex()
        .args(["outputs", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("batch_20240101_000000.json"));
}

#[test]
fn config_init_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let path_str = path.to_str().unwrap();

    docex()
        .args(["config", "-c", path_str, "init"])
        .assert()
        .success();
    assert!(path.exists());

    docex()
        .args(["config", "-c", path_str, "set", "output.csv_bom", "false"])
        .assert()
        .success();

    docex()
        .args(["config", "-c", path_str, "get", "output.csv_bom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn process_save_writes_default_filename_as_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let outputs = dir.path().join("out");
    let config = write_config(dir.path(), &outputs, true);
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .arg("--config")
        .arg(&config)
        .args(["process", "-t", "ticket", "-f", "json", "--save"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let saved = files_with_prefix(&outputs, "extracted_data_", ".json");
    assert_eq!(saved.len(), 1);

    let name = saved[0].file_name().unwrap().to_string_lossy().into_owned();
    let stamp = name.trim_start_matches("extracted_data_").trim_end_matches(".json");
    assert_eq!(stamp.len(), "YYYYmmdd_HHMMSS".len());
    assert_eq!(stamp.as_bytes()[8], b'_');

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&saved[0]).unwrap()).unwrap();
    let records = value.as_array().expect("JSON file holds an array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["montant_total"], "45.67");
}

#[test]
fn process_output_file_is_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("record.json");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .args(["process", "-t", "ticket", "-f", "json", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value[0]["commerce"], "SUPERMARCHE ABC");
}

#[test]
fn process_xlsx_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("record.xlsx");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .args(["process", "-t", "ticket", "-f", "xlsx", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();

    assert!(fs::read(&output).unwrap().starts_with(b"PK"));

    docex()
        .args(["process", "-t", "ticket", "-f", "xlsx"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlsx output needs a file"));
}

#[test]
fn process_explain_reports_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .args(["process", "-t", "ticket", "-f", "json", "--explain"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Field matches").not())
        .stderr(predicate::str::contains("Field matches:"))
        .stderr(predicate::str::contains("montant_total"))
        .stderr(predicate::str::contains("numero_tva"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_without_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &dir.path().join("out"), false);
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    docex()
        .arg("--config")
        .arg(&config)
        .args(["process", "-t", "ticket", "-f", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("texte_brut").not())
        .stdout(predicate::str::contains("\"montant_total\": \"45.67\""));
}

#[test]
fn batch_aborts_on_failure_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RECEIPT).unwrap();
    fs::write(inputs.join("b.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    docex()
        .args(["batch", &pattern, "-t", "ticket", "-f", "json", "-o"])
        .arg(&outputs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    assert!(files_with_prefix(&outputs, "batch_", ".json").is_empty());
}

#[test]
fn batch_continue_on_error_writes_good_records() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RECEIPT).unwrap();
    fs::write(inputs.join("b.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    docex()
        .args(["batch", &pattern, "-t", "ticket", "-f", "json", "--summary", "--continue-on-error", "-o"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records written"))
        .stdout(predicate::str::contains("Failed files:"))
        .stdout(predicate::str::contains("b.txt"));

    let written = files_with_prefix(&outputs, "batch_", ".json");
    assert_eq!(written.len(), 1);
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["montant_total"], "45.67");

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,"));
    assert!(summary.contains("b.txt,error,"));
}

#[test]
fn batch_xlsx_output_is_listed_as_excel() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), RECEIPT).unwrap();

    let pattern = format!("{}/*.txt", inputs.display());
    docex()
        .args(["batch", &pattern, "-t", "ticket", "-f", "xlsx", "-o"])
        .arg(&outputs)
        .assert()
        .success();

    assert_eq!(files_with_prefix(&outputs, "batch_", ".xlsx").len(), 1);

    docex()
        .args(["outputs", "--json", "-d"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"excel\""));
}
