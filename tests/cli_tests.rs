//! CLI-level tests driving the `cutlist` binary end to end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cutlist() -> Command {
    Command::cargo_bin("cutlist").unwrap()
}

#[test]
fn example_json_prints_a_loadable_request() {
    cutlist()
        .args(["example", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stock_panels"));
}

#[test]
fn example_rejects_unknown_format() {
    cutlist()
        .args(["example", "--format", "xml"])
        .assert()
        .failure();
}

#[test]
fn validate_reports_panel_and_material_counts() {
    let mut input = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        input,
        r#"{{
            "panels": [{{ "id": 1, "width": "100", "height": "50", "count": 2 }}],
            "stock_panels": [{{ "id": 10, "width": "200", "height": "100", "count": 1 }}]
        }}"#
    )
    .unwrap();

    cutlist()
        .args(["validate", "-i"])
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 demand panel(s)"))
        .stdout(predicate::str::contains("1 stock panel(s)"));
}

#[test]
fn validate_rejects_a_csv_demand_file_without_stock() {
    let mut input = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(input, "width,height,quantity,label").unwrap();
    writeln!(input, "100,50,1,Panel A").unwrap();

    cutlist()
        .args(["validate", "-i"])
        .arg(input.path())
        .assert()
        .failure();
}

#[test]
fn optimize_runs_a_tiny_perfect_fit_job_end_to_end() {
    let mut input = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        input,
        r#"{{
            "panels": [{{ "id": 1, "width": "100", "height": "50", "count": 1 }}],
            "stock_panels": [{{ "id": 10, "width": "100", "height": "50", "count": 1 }}]
        }}"#
    )
    .unwrap();
    let output = tempfile::Builder::new().suffix(".json").tempfile().unwrap();

    cutlist()
        .args(["--threads", "1", "optimize", "-i"])
        .arg(input.path())
        .args(["-o"])
        .arg(output.path())
        .assert()
        .success();

    let body = std::fs::read_to_string(output.path()).unwrap();
    let response: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["mosaics"].as_array().unwrap().len(), 1);
    assert!((response["total_used_area_ratio"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}
