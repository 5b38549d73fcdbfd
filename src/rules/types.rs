use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RawInput,
    UnsafeOutput,
    SqlInjection,
    FileInclusion,
    CommandExecution,
    Deserialization,
    SecretLeak,
    Csrf,
    DebugExposure,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RawInput => "raw_input",
            Category::UnsafeOutput => "unsafe_output",
            Category::SqlInjection => "sql_injection",
            Category::FileInclusion => "file_inclusion",
            Category::CommandExecution => "command_execution",
            Category::Deserialization => "deserialization",
            Category::SecretLeak => "secret_leak",
            Category::Csrf => "csrf",
            Category::DebugExposure => "debug_exposure",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a rule's patterns are applied to a file.
///
/// `SingleLine` rules run against each line independently and honor the
/// comment-skip and mitigation heuristics. `WholeContent` rules run against
/// the full file text because the shape they detect spans multiple lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    SingleLine,
    WholeContent,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub scan_mode: ScanMode,
    pub patterns: Vec<regex::Regex>,
    /// Patterns that clear a match when they also hit the matched line
    /// (single-line rules) or the matched span (whole-content rules).
    pub exclusions: Vec<regex::Regex>,
    pub message: &'static str,
    pub remediation: &'static str,
}

/// Serializable rule metadata for `list_rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub category: Category,
    pub scan_mode: ScanMode,
    pub message: String,
}

impl From<&Rule> for RuleInfo {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            name: rule.name.to_string(),
            severity: rule.severity,
            category: rule.category,
            scan_mode: rule.scan_mode,
            message: rule.message.to_string(),
        }
    }
}

/// One reported occurrence of a suspicious pattern. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub category: Category,
    /// Path relative to the scanned root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    pub message: String,
    pub remediation: String,
    pub matched_text: String,
}

impl Finding {
    pub fn new(rule: &Rule, file: &str, line: usize, matched_text: &str) -> Self {
        Self {
            rule_id: rule.id.to_string(),
            severity: rule.severity,
            category: rule.category,
            file: file.to_string(),
            line,
            message: rule.message.to_string(),
            remediation: rule.remediation.to_string(),
            matched_text: matched_text.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut counts, f| {
            match f.severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCount {
    pub rule_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub by_severity: SeverityCounts,
    /// Per-rule match counts, descending, top ten retained.
    pub by_rule: Vec<RuleCount>,
    pub files_with_findings: usize,
}

/// Report for one scan invocation. Summary counts reflect the untruncated
/// finding set even when the `findings` list is capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub path_scanned: String,
    pub generated_at: String,
    pub files_scanned: usize,
    pub total_findings: usize,
    pub summary: ScanSummary,
    pub findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Critical), "CRITICAL");
        assert_eq!(format!("{}", Severity::Low), "LOW");
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::High);
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::RawInput.as_str(), "raw_input");
        assert_eq!(Category::UnsafeOutput.as_str(), "unsafe_output");
        assert_eq!(Category::SqlInjection.as_str(), "sql_injection");
        assert_eq!(Category::Csrf.as_str(), "csrf");
    }

    #[test]
    fn test_scan_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&ScanMode::SingleLine).unwrap(),
            "\"single-line\""
        );
        assert_eq!(
            serde_json::to_string(&ScanMode::WholeContent).unwrap(),
            "\"whole-content\""
        );
    }

    #[test]
    fn test_finding_new_trims_matched_text() {
        let rule = Rule {
            id: "TST-001",
            name: "Test rule",
            severity: Severity::High,
            category: Category::RawInput,
            scan_mode: ScanMode::SingleLine,
            patterns: vec![],
            exclusions: vec![],
            message: "test message",
            remediation: "test remediation",
        };
        let finding = Finding::new(&rule, "index.php", 7, "  $_GET['id'];  ");
        assert_eq!(finding.rule_id, "TST-001");
        assert_eq!(finding.file, "index.php");
        assert_eq!(finding.line, 7);
        assert_eq!(finding.matched_text, "$_GET['id'];");
    }

    #[test]
    fn test_severity_counts_from_findings() {
        let rule = Rule {
            id: "TST-001",
            name: "Test rule",
            severity: Severity::Medium,
            category: Category::RawInput,
            scan_mode: ScanMode::SingleLine,
            patterns: vec![],
            exclusions: vec![],
            message: "m",
            remediation: "r",
        };
        let findings = vec![
            Finding::new(&rule, "a.php", 1, "x"),
            Finding::new(&rule, "a.php", 2, "y"),
        ];
        let counts = SeverityCounts::from_findings(&findings);
        assert_eq!(counts.medium, 2);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_severity_counts_empty() {
        let counts = SeverityCounts::from_findings(&[]);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn test_rule_info_from_rule() {
        let rule = Rule {
            id: "OUT-001",
            name: "Unescaped request output",
            severity: Severity::High,
            category: Category::UnsafeOutput,
            scan_mode: ScanMode::SingleLine,
            patterns: vec![],
            exclusions: vec![],
            message: "msg",
            remediation: "rem",
        };
        let info = RuleInfo::from(&rule);
        assert_eq!(info.id, "OUT-001");
        assert_eq!(info.category, Category::UnsafeOutput);
        assert_eq!(info.scan_mode, ScanMode::SingleLine);
    }
}
