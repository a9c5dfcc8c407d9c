// Integration tests for the incidence-report binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FIXTURE: &str = "tests/fixtures/owid_sample.csv";

fn command() -> Command {
    Command::cargo_bin("incidence-report").unwrap()
}

#[test]
fn test_generates_report_from_fixture() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("output");
    let report = dir.path().join("covid_report.html");

    command()
        .arg(FIXTURE)
        .arg("-o")
        .arg(&output_dir)
        .arg("-r")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranked 4 countries"))
        .stdout(predicate::str::contains("scatter.svg"))
        .stdout(predicate::str::contains("top_entities.csv"));

    assert!(report.exists());
    for name in [
        "bar_charts.svg",
        "scatter.svg",
        "linear_fit.svg",
        "residuals.svg",
        "top_entities.csv",
    ] {
        assert!(output_dir.join(name).exists(), "missing {}", name);
    }

    let html = fs::read_to_string(&report).unwrap();
    assert!(html.contains("output/linear_fit.svg"));
    assert!(html.contains("Andorra"));
}

#[test]
fn test_config_file_sets_paths() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("report.toml");
    fs::write(
        &config,
        format!(
            "output_dir = {:?}\nreport_path = {:?}\ntop_n = 3\n\n[analysis]\nhistogram_bins = 4\n",
            dir.path().join("charts").to_string_lossy(),
            dir.path().join("index.html").to_string_lossy(),
        ),
    )
    .unwrap();

    command()
        .arg("--config")
        .arg(&config)
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranked 3 countries"));

    assert!(dir.path().join("index.html").exists());
    assert!(dir.path().join("charts").join("residuals.svg").exists());

    let table = fs::read_to_string(dir.path().join("charts").join("top_entities.csv")).unwrap();
    assert_eq!(table.lines().count(), 4);
}

#[test]
fn test_debug_flag_emits_trace_logs() {
    let dir = TempDir::new().unwrap();

    command()
        .arg("--debug")
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg("-r")
        .arg(dir.path().join("report.html"))
        .arg(FIXTURE)
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"))
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    command()
        .arg(dir.path().join("does-not-exist.csv"))
        .arg("-o")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to ingest"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_column_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cases.csv");
    fs::write(&input, "iso_code,location,date,new_cases\nFRA,France,2023-01-01,10\n").unwrap();

    command()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg("-r")
        .arg(dir.path().join("report.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("population"));

    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_single_country_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("cases.csv");
    let mut csv = String::from("iso_code,location,date,new_cases,population\n");
    for day in 1..=7 {
        csv.push_str(&format!("FRA,France,2023-01-0{day},1000,68000000\n"));
    }
    fs::write(&input, csv).unwrap();

    command()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out"))
        .arg("-r")
        .arg(dir.path().join("report.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2"));

    assert!(!dir.path().join("out").exists());
    assert!(!dir.path().join("report.html").exists());
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("report.toml");
    fs::write(&config, "top_n = 1\n").unwrap();

    command()
        .arg("-c")
        .arg(&config)
        .arg(FIXTURE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_requires_input_argument() {
    command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT"));
}
