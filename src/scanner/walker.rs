//! Bounded recursive file discovery.

use super::file::FileScanner;
use crate::rules::types::Finding;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Hard cap on files per scan, bounding worst-case latency on large trees.
/// The report's `files_scanned` reflects the actual number scanned, so a
/// caller can tell the cap was hit.
pub const DEFAULT_FILE_CAP: usize = 500;

/// Dependency and VCS directories are pruned without descent.
const EXCLUDED_DIR_SEGMENTS: &[&str] = &[
    "vendor",
    "node_modules",
    "bower_components",
    ".git",
    ".svn",
    ".hg",
];

pub struct TreeWalker {
    file_cap: usize,
}

impl TreeWalker {
    pub fn new() -> Self {
        Self {
            file_cap: DEFAULT_FILE_CAP,
        }
    }

    pub fn with_file_cap(mut self, cap: usize) -> Self {
        self.file_cap = cap;
        self
    }

    fn is_excluded_dir(entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| EXCLUDED_DIR_SEGMENTS.contains(&name))
    }

    /// Enumerate scannable files below `root` in a deterministic order,
    /// stopping once the file cap is reached.
    pub fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_excluded_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| FileScanner::is_scannable(e.path()))
            .map(|e| e.path().to_path_buf())
            .take(self.file_cap)
            .collect()
    }

    /// Scan every eligible file below `root`, fanning the per-file work out
    /// across the thread pool. Rules and heuristics are immutable, so files
    /// share no state; aggregation happens only after the joins complete.
    /// Returns the number of files scanned and the concatenated findings.
    pub fn scan(&self, root: &Path, scanner: &FileScanner) -> (usize, Vec<Finding>) {
        let files = self.collect_files(root);
        if files.len() == self.file_cap {
            info!(cap = self.file_cap, "File cap reached; scan is truncated");
        }
        debug!(root = %root.display(), files = files.len(), "Scanning tree");

        let findings: Vec<Finding> = files
            .par_iter()
            .flat_map(|path| scanner.scan_file(path, &Self::relative_display(root, path)))
            .collect();

        (files.len(), findings)
    }

    fn relative_display(root: &Path, path: &Path) -> String {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Default for TreeWalker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_skips_vendor_trees() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.php", "<?php");
        write(dir.path(), "vendor/lib/evil.php", "<?php eval($x);");
        write(dir.path(), "node_modules/pkg/index.php", "<?php");

        let files = TreeWalker::new().collect_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("index.php"));
    }

    #[test]
    fn test_collect_skips_unrecognized_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.php", "<?php");
        write(dir.path(), "b.js", "let x = 1;");
        write(dir.path(), "c.css", "body {}");

        let files = TreeWalker::new().collect_files(dir.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_file_cap_enforced() {
        let dir = TempDir::new().unwrap();
        for i in 0..12 {
            write(dir.path(), &format!("f{:02}.php", i), "<?php");
        }

        let walker = TreeWalker::new().with_file_cap(5);
        let files = walker.collect_files(dir.path());
        assert_eq!(files.len(), 5);

        let (scanned, _) = walker.scan(dir.path(), &FileScanner::new());
        assert_eq!(scanned, 5);
    }

    #[test]
    fn test_collect_order_is_deterministic() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.php", "<?php");
        write(dir.path(), "a.php", "<?php");
        write(dir.path(), "sub/c.php", "<?php");

        let first = TreeWalker::new().collect_files(dir.path());
        let second = TreeWalker::new().collect_files(dir.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_scan_reports_relative_paths() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sub/page.php", "$id = $_GET['id'];");

        let (scanned, findings) = TreeWalker::new().scan(dir.path(), &FileScanner::new());
        assert_eq!(scanned, 1);
        assert!(!findings.is_empty());
        let expected = Path::new("sub").join("page.php").display().to_string();
        assert_eq!(findings[0].file, expected);
    }
}
