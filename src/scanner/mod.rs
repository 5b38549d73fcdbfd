//! Static source scanning: per-file rule application, bounded tree walking,
//! and finding aggregation.

pub mod aggregate;
pub mod file;
pub mod walker;

pub use aggregate::{MAX_REPORTED_FINDINGS, build_report};
pub use file::{FileScanner, SCANNABLE_EXTENSIONS};
pub use walker::{DEFAULT_FILE_CAP, TreeWalker};

use crate::error::{AuditError, Result};
use crate::rules::types::{Category, ScanReport};
use std::path::Path;

/// Scan a file or directory tree with the full rule set, optionally
/// restricted to one category. The only hard error is a missing top-level
/// path; unreadable files inside the tree are skipped silently and show up
/// as a lower `files_scanned`.
pub fn scan_path(path: &Path, category: Option<Category>, file_cap: usize) -> Result<ScanReport> {
    if !path.exists() {
        return Err(AuditError::PathNotFound(path.display().to_string()));
    }

    let scanner = FileScanner::new().with_category(category);
    let display = path.display().to_string();

    if path.is_file() {
        let findings = scanner.scan_file(path, &file_name_display(path));
        return Ok(build_report(&display, 1, findings));
    }

    let walker = TreeWalker::new().with_file_cap(file_cap);
    let (files_scanned, findings) = walker.scan(path, &scanner);
    Ok(build_report(&display, files_scanned, findings))
}

/// Single-file variant of `scan_path`; always runs the full rule set.
pub fn scan_file(path: &Path) -> Result<ScanReport> {
    if !path.is_file() {
        return Err(AuditError::PathNotFound(path.display().to_string()));
    }

    let scanner = FileScanner::new();
    let findings = scanner.scan_file(path, &file_name_display(path));
    Ok(build_report(&path.display().to_string(), 1, findings))
}

/// Scan a content string under a virtual file name. Used by the dispatcher
/// for not-yet-written content; never fails.
pub fn scan_content(content: &str, filename: &str) -> ScanReport {
    let findings = FileScanner::new().scan_content(content, filename);
    build_report(filename, 1, findings)
}

fn file_name_display(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
