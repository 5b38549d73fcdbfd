//! End-to-end tests over real directory trees and snapshot files.

use cms_audit::audit::{CheckStatus, Grade, HostSnapshot, run_live_audit};
use cms_audit::rules::{Category, Severity, list_rules};
use cms_audit::scanner::{DEFAULT_FILE_CAP, scan_file, scan_path};
use cms_audit::AuditError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn fixture_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "index.php",
        "<?php\n$id = $_GET['id'];\necho $name;\n",
    );
    write(
        dir.path(),
        "admin/save.php",
        "<?php\n$wpdb->query(\"DELETE FROM items WHERE id = \" . $_POST['id']);\n",
    );
    write(
        dir.path(),
        "lib/safe.php",
        "<?php\n$id = absint($_GET['id']);\necho esc_html($name);\n",
    );
    write(dir.path(), "vendor/dep/bad.php", "<?php\neval($x);\n");
    write(dir.path(), "notes.txt", "eval($x);");
    dir
}

#[test]
fn scan_reports_expected_findings() {
    let dir = fixture_site();
    let report = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();

    assert_eq!(report.files_scanned, 3);
    assert!(report.total_findings >= 3);

    let ids: Vec<&str> = report.findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert!(ids.contains(&"INP-001"));
    assert!(ids.contains(&"OUT-002"));
    assert!(ids.contains(&"SQL-001"));
    // Vendor code is pruned, so its eval never surfaces.
    assert!(!ids.contains(&"EXE-002"));
    // The sanitized file contributes nothing.
    assert!(!report.findings.iter().any(|f| f.file.contains("safe.php")));
}

#[test]
fn scan_is_idempotent() {
    let dir = fixture_site();
    let first = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();
    let second = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();

    assert_eq!(first.files_scanned, second.files_scanned);
    assert_eq!(first.total_findings, second.total_findings);
    let first_keys: Vec<_> = first
        .findings
        .iter()
        .map(|f| (f.rule_id.clone(), f.file.clone(), f.line))
        .collect();
    let second_keys: Vec<_> = second
        .findings
        .iter()
        .map(|f| (f.rule_id.clone(), f.file.clone(), f.line))
        .collect();
    assert_eq!(first_keys, second_keys);
}

#[test]
fn findings_are_sorted_by_severity() {
    let dir = fixture_site();
    let report = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();

    let ranks: Vec<Severity> = report.findings.iter().map(|f| f.severity).collect();
    assert!(
        ranks.windows(2).all(|w| w[0] >= w[1]),
        "findings not in severity order: {:?}",
        ranks
    );
}

#[test]
fn file_cap_bounds_large_trees() {
    let dir = TempDir::new().unwrap();
    for i in 0..600 {
        write(dir.path(), &format!("gen/f{:04}.php", i), "<?php\n");
    }

    let report = scan_path(dir.path(), None, 500).unwrap();
    assert_eq!(report.files_scanned, 500);
}

#[test]
fn unreadable_tree_entries_lower_files_scanned() {
    let dir = fixture_site();
    // A dangling symlink is discovered but cannot be read; the scan still
    // completes and simply reports fewer findings.
    #[cfg(unix)]
    std::os::unix::fs::symlink(
        dir.path().join("missing.php"),
        dir.path().join("broken.php"),
    )
    .unwrap();

    let report = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();
    assert!(report.total_findings >= 3);
}

#[test]
fn scan_missing_path_is_a_hard_error() {
    let err = scan_path(Path::new("/no/such/site"), None, DEFAULT_FILE_CAP).unwrap_err();
    assert!(matches!(err, AuditError::PathNotFound(_)));
}

#[test]
fn category_filter_narrows_findings() {
    let dir = fixture_site();
    let report = scan_path(dir.path(), Some(Category::SqlInjection), DEFAULT_FILE_CAP).unwrap();
    assert!(!report.findings.is_empty());
    assert!(
        report
            .findings
            .iter()
            .all(|f| f.category == Category::SqlInjection)
    );
}

#[test]
fn scan_file_single_target() {
    let dir = fixture_site();
    let report = scan_file(&dir.path().join("index.php")).unwrap();
    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.total_findings, 2);
    assert_eq!(report.findings[0].file, "index.php");
}

#[test]
fn comment_only_matches_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "commented.php",
        "<?php\n// eval($x);\n# system($cmd);\n * echo $_GET['q'];\n",
    );
    let report = scan_path(dir.path(), None, DEFAULT_FILE_CAP).unwrap();
    assert_eq!(report.total_findings, 0);
}

#[test]
fn list_rules_exposes_metadata() {
    let all = list_rules(None);
    assert!(all.len() >= 20);
    assert!(all.iter().any(|r| r.id == "INP-001"));

    let secrets = list_rules(Some(Category::SecretLeak));
    assert!(secrets.iter().all(|r| r.category == Category::SecretLeak));
}

#[test]
fn audit_from_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let snapshot_path = dir.path().join("state.json");
    fs::write(
        &snapshot_path,
        r#"{
            "tls_active": true,
            "tls_forced_for_admin": true,
            "file_edit_locked": true,
            "user_enumeration_blocked": true,
            "version_fingerprint_suppressed": true,
            "uploads_listing_guarded": true,
            "config_file_mode": 384,
            "secret_keys": [
                {"name": "AUTH_KEY", "present": true, "is_default": false}
            ],
            "core_version": "6.4.2",
            "latest_core_version": "6.4.2",
            "users": [{"id": 2, "login": "site-owner", "is_admin": true}]
        }"#,
    )
    .unwrap();

    let snapshot = HostSnapshot::from_file(&snapshot_path).unwrap();
    let report = run_live_audit(&snapshot);

    // Headers are unreachable (no site URL) but the battery still completes.
    assert!(report.summary.total() > 20);
    assert!(report.score > 50);
    assert_eq!(report.summary.critical, 0);
}

#[test]
fn audit_snapshot_parse_failure_is_typed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    let err = HostSnapshot::from_file(&path).unwrap_err();
    assert!(matches!(err, AuditError::SnapshotParse { .. }));
}

#[test]
fn degrading_a_check_lowers_score_and_grade_never_improves() {
    let healthy = HostSnapshot {
        tls_active: true,
        ..Default::default()
    };
    let degraded = HostSnapshot {
        tls_active: true,
        debug_log_public: true,
        ..Default::default()
    };

    let healthy_report = run_live_audit(&healthy);
    let degraded_report = run_live_audit(&degraded);

    assert!(degraded_report.score < healthy_report.score);
    assert!(degraded_report.grade >= healthy_report.grade);
}

#[test]
fn audit_recommendations_are_priority_sorted() {
    let report = run_live_audit(&HostSnapshot::default());
    assert!(!report.recommendations.is_empty());
    assert!(
        report
            .recommendations
            .windows(2)
            .all(|w| w[0].priority <= w[1].priority)
    );
}

#[test]
fn audit_passed_checks_have_no_remediation() {
    let snapshot = HostSnapshot {
        tls_active: true,
        file_edit_locked: true,
        ..Default::default()
    };
    let report = run_live_audit(&snapshot);
    for category in &report.categories {
        for check in &category.checks {
            match check.status {
                CheckStatus::Passed => assert!(check.remediation.is_none()),
                _ => assert!(check.remediation.is_some()),
            }
        }
    }
}

#[test]
fn empty_snapshot_audit_grades_poorly() {
    let report = run_live_audit(&HostSnapshot::default());
    assert!(report.grade >= Grade::C, "grade was {}", report.grade);
}
