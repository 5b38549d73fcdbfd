//! CLI end-to-end tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("cms-audit").unwrap()
}

#[test]
fn test_scan_flags_vulnerable_tree() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("page.php"),
        "<?php\neval($_GET['code']);\n",
    )
    .unwrap();

    cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("EXE-002"))
        .stdout(predicate::str::contains("CRITICAL"));
}

#[test]
fn test_scan_clean_tree_succeeds() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page.php"), "<?php\necho 'hello';\n").unwrap();

    cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No findings."));
}

#[test]
fn test_scan_missing_path_fails_with_error() {
    cmd()
        .arg("/no/such/site")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn test_json_format_emits_valid_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("page.php"), "<?php\n$id = $_GET['id'];\n").unwrap();

    let output = cmd()
        .args(["--format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["files_scanned"], 1);
    assert_eq!(parsed["findings"][0]["rule_id"], "INP-001");
}

#[test]
fn test_list_rules() {
    cmd()
        .arg("--list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("INP-001"))
        .stdout(predicate::str::contains("CSR-001"));
}

#[test]
fn test_list_rules_category_filter() {
    cmd()
        .args(["--list-rules", "--category", "secret-leak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEC-001"))
        .stdout(predicate::str::contains("INP-001").not());
}

#[test]
fn test_audit_with_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("state.json");
    fs::write(&snapshot, r#"{"tls_active": true}"#).unwrap();

    cmd()
        .args(["--audit", "--snapshot"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score"))
        .stdout(predicate::str::contains("grade"));
}

#[test]
fn test_audit_cleartext_site_fails() {
    // Default snapshot has TLS off, which is a critical check.
    cmd()
        .arg("--audit")
        .assert()
        .failure()
        .stdout(predicate::str::contains("cleartext"));
}

#[test]
fn test_audit_json_format() {
    let output = cmd()
        .args(["--audit", "--format", "json"])
        .assert()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(parsed["score"].is_u64());
    assert!(!parsed["recommendations"].as_array().unwrap().is_empty());
}
