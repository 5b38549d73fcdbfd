//! Per-file rule application.

use crate::rules::mitigation;
use crate::rules::types::{Category, Finding, Rule, ScanMode};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Source extensions the scanner recognizes. Anything else is a cheap no-op.
pub const SCANNABLE_EXTENSIONS: &[&str] = &["php", "phtml", "inc", "php5", "php7"];

pub struct FileScanner {
    rules: &'static [Rule],
    category: Option<Category>,
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            rules: crate::rules::all_rules(),
            category: None,
        }
    }

    /// Restrict scanning to a single rule category.
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    fn active_rules(&self) -> impl Iterator<Item = &'static Rule> + '_ {
        let category = self.category;
        self.rules
            .iter()
            .filter(move |rule| category.is_none_or(|c| rule.category == c))
    }

    pub fn is_scannable(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }

    /// Scan one file, reporting findings under `display` (the path relative
    /// to the scan root). Unrecognized extensions and unreadable files yield
    /// an empty list; a permissions problem on one file must not abort a
    /// directory scan.
    pub fn scan_file(&self, path: &Path, display: &str) -> Vec<Finding> {
        let display_path = display;
        if !Self::is_scannable(path) {
            trace!(file = %display_path, "Skipping unrecognized extension");
            return Vec::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => self.scan_content(&content, display),
            Err(e) => {
                debug!(file = %display_path, error = %e, "Skipping unreadable file");
                Vec::new()
            }
        }
    }

    /// Apply every active rule to `content`. Single-line rules run per line
    /// with comment skipping and the mitigation heuristic; whole-content
    /// rules run against the full text with match offsets converted to line
    /// numbers. Output order is not significant.
    pub fn scan_content(&self, content: &str, file: &str) -> Vec<Finding> {
        trace!(
            file,
            lines = content.lines().count(),
            "Scanning content against rules"
        );

        let mut findings = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if Self::is_comment_line(line) {
                continue;
            }
            for rule in self
                .active_rules()
                .filter(|r| r.scan_mode == ScanMode::SingleLine)
            {
                if let Some(finding) = Self::check_line(rule, line, file, idx + 1) {
                    findings.push(finding);
                }
            }
        }

        for rule in self
            .active_rules()
            .filter(|r| r.scan_mode == ScanMode::WholeContent)
        {
            for pattern in &rule.patterns {
                for m in pattern.find_iter(content) {
                    if rule.exclusions.iter().any(|e| e.is_match(m.as_str())) {
                        continue;
                    }
                    let line = Self::line_of_offset(content, m.start());
                    let excerpt = m.as_str().lines().next().unwrap_or_default();
                    findings.push(Finding::new(rule, file, line, excerpt));
                }
            }
        }

        findings
    }

    fn check_line(rule: &Rule, line: &str, file: &str, line_num: usize) -> Option<Finding> {
        if !rule.patterns.iter().any(|p| p.is_match(line)) {
            return None;
        }
        if rule.exclusions.iter().any(|e| e.is_match(line)) {
            return None;
        }
        if mitigation::is_mitigated(rule.category, line) {
            return None;
        }
        Some(Finding::new(rule, file, line_num, line))
    }

    /// A line whose first non-whitespace token opens a comment: `//`, `#`,
    /// or the `*` continuation of a block comment.
    pub fn is_comment_line(line: &str) -> bool {
        let trimmed = line.trim_start();
        trimmed.starts_with("//") || trimmed.starts_with('#') || trimmed.starts_with('*')
    }

    /// 1-based line number of a byte offset, by counting preceding newlines.
    fn line_of_offset(content: &str, offset: usize) -> usize {
        content.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
