use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

// Nothing listens here; any request that does go out fails as a network error.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("postcodes").unwrap();
    cmd.args(["--base-url", UNREACHABLE]);
    cmd
}

#[test]
fn bulk_over_limit_reports_cap() {
    let postcodes: Vec<String> = (0..101).map(|i| format!("AB{} 1CD", i)).collect();
    cmd()
        .arg("bulk")
        .arg(postcodes.join(","))
        .assert()
        .success()
        .stdout(contains("== Error"))
        .stdout(contains("Bulk lookup is limited to 100 postcodes (got 101)"))
        .stdout(contains("Network error").not());
}

#[test]
fn bulk_reverse_rejects_invalid_json() {
    cmd()
        .args(["bulk-reverse", "not json"])
        .assert()
        .success()
        .stdout(contains("Invalid JSON for geolocations"))
        .stdout(contains("Network error").not());
}

#[test]
fn bulk_reverse_reads_file_and_rejects_non_array() {
    let tmp = TempDir::new().expect("create temp dir");
    let input = tmp.path().join("geo.json");
    fs::write(&input, r#"{"latitude": 51.5, "longitude": -0.1}"#).expect("write input");

    let out = cmd()
        .args(["--format", "json", "bulk-reverse", "--file"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let cards: serde_json::Value = serde_json::from_slice(&out).expect("valid json output");
    assert_eq!(
        cards,
        serde_json::json!([{
            "title": "Error",
            "value": {"error": "Geolocations must be a JSON array"}
        }])
    );
}

#[test]
fn blank_input_prints_nothing() {
    cmd()
        .args(["lookup", "   "])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn unreachable_api_becomes_error_card() {
    cmd()
        .args(["lookup", "SW1A 1AA"])
        .assert()
        .success()
        .stdout(contains("== Error"))
        .stdout(contains("Network error"));
}

#[test]
fn html_format_escapes_error_text() {
    cmd()
        .args(["--format", "html", "bulk-reverse", "<oops>"])
        .assert()
        .success()
        .stdout(contains(r#"<div class="card"><h3>Error</h3>"#))
        .stdout(contains("<oops>").not());
}

#[test]
fn out_writes_standalone_page() {
    let tmp = TempDir::new().expect("create temp dir");
    let page = tmp.path().join("results.html");

    cmd()
        .args(["bulk-reverse", "[1,"])
        .arg("--out")
        .arg(&page)
        .assert()
        .success()
        .stdout(contains("Wrote"));

    let html = fs::read_to_string(&page).expect("read page");
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("1 result(s)"));
    assert!(html.contains("Invalid JSON for geolocations"));
}

#[test]
fn bulk_reverse_rejects_inline_json_together_with_file() {
    let tmp = TempDir::new().expect("create temp dir");
    let input = tmp.path().join("geo.json");
    fs::write(&input, "[]").expect("write input");

    cmd()
        .args(["bulk-reverse", "[]", "--file"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn out_failure_names_the_page_path() {
    let tmp = TempDir::new().expect("create temp dir");
    let page = tmp.path().join("missing-dir").join("results.html");

    cmd()
        .args(["bulk-reverse", "not json", "--out"])
        .arg(&page)
        .assert()
        .failure()
        .stderr(contains("write page"))
        .stderr(contains("results.html"));
}
