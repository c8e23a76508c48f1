//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `heartstat` binary against local CSV
//! files only, so no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;

const HEART_CSV: &str = "\
age,sex,cp,chol,thalach,num
63,1,1,233,150,0
67,1,4,286,108,2
67,1,4,229,129,1
37,1,3,250,187,0
41,0,2,204,172,0
";

fn cmd() -> Command {
    Command::cargo_bin("heartstat").unwrap()
}

fn write_input(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("heart.csv");
    std::fs::write(&path, HEART_CSV).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("heartstat"));
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

#[test]
fn report_nonexistent_input_errors() {
    cmd()
        .args(["report", "--input", "/nonexistent/heart.csv"])
        .assert()
        .failure();
}

#[test]
fn report_nonexistent_config_errors() {
    cmd()
        .args(["report", "/nonexistent/config.json"])
        .assert()
        .failure();
}

#[test]
fn report_target_rejected_for_uci_source() {
    // The default source is UCI, so this fails before any download.
    cmd()
        .args(["report", "--target", "num"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--target only applies to a local CSV input"));
}

#[test]
fn report_input_accepts_uci_id() {
    cmd()
        .args(["report", "--input", "uci:45", "--target", "num"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--target only applies to a local CSV input"));
}

#[test]
fn report_input_rejects_bad_uci_id() {
    cmd()
        .args(["report", "--input", "uci:heart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid UCI dataset id"));
}

#[test]
fn report_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("results.txt");

    cmd()
        .arg("report")
        .arg("--input")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No config provided"));

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("1. DATASET OVERVIEW"));
    assert!(text.contains("Number of instances: 5"));
    assert!(text.contains("10. SKEWNESS AND KURTOSIS"));
}

#[test]
fn report_echoes_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("results.txt");

    cmd()
        .arg("report")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--target", "sex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Target variable: sex"))
        .stdout(predicate::str::contains("FEATURE CORRELATIONS WITH TARGET"));
}

#[test]
fn report_bad_target_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    cmd()
        .arg("report")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("results.txt"))
        .args(["-t", "outcome"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Report generation failed"));
    assert!(!dir.path().join("results.txt").exists());
}

#[test]
fn report_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("from_config.txt");
    let config = dir.path().join("config.json");
    let json = serde_json::json!({
        "source": { "csv": { "path": input, "target": "num" } },
        "output_file": output,
    });
    std::fs::write(&config, json.to_string()).unwrap();

    cmd()
        .arg("report")
        .arg(&config)
        .arg("-q")
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn report_target_overrides_config_csv_source() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("from_config.txt");
    let config = dir.path().join("config.json");
    let json = serde_json::json!({
        "source": { "csv": { "path": input, "target": "num" } },
        "output_file": output,
    });
    std::fs::write(&config, json.to_string()).unwrap();

    cmd()
        .arg("report")
        .arg(&config)
        .args(["--target", "sex", "--quiet"])
        .assert()
        .success();
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Target variable: sex"));
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_prints_shape_and_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(&dir);

    cmd()
        .arg("inspect")
        .arg(&input)
        .args(["-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shape: (5, 6)"))
        .stdout(predicate::str::contains("\"thalach\""))
        .stdout(predicate::str::contains("63"))
        .stdout(predicate::str::contains("37").not());
}

#[test]
fn inspect_missing_file_errors() {
    cmd()
        .args(["inspect", "/nonexistent/heart.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inspect failed"));
}
