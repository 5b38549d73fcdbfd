//! Finding aggregation and report assembly.

use crate::rules::types::{Finding, RuleCount, ScanReport, ScanSummary, SeverityCounts};
use chrono::Utc;
use std::collections::{HashMap, HashSet};

/// Reported findings are capped to keep responses bounded; summary counts
/// always reflect the untruncated totals.
pub const MAX_REPORTED_FINDINGS: usize = 100;

pub const TOP_RULE_COUNT: usize = 10;

/// Build a report from raw findings: stable severity sort (critical first),
/// summary statistics, then truncation of the returned list.
pub fn build_report(path_scanned: &str, files_scanned: usize, mut findings: Vec<Finding>) -> ScanReport {
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));

    let total_findings = findings.len();
    let by_severity = SeverityCounts::from_findings(&findings);
    let by_rule = top_rules(&findings);
    let files_with_findings = findings
        .iter()
        .map(|f| f.file.as_str())
        .collect::<HashSet<_>>()
        .len();

    findings.truncate(MAX_REPORTED_FINDINGS);

    ScanReport {
        path_scanned: path_scanned.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        files_scanned,
        total_findings,
        summary: ScanSummary {
            by_severity,
            by_rule,
            files_with_findings,
        },
        findings,
    }
}

fn top_rules(findings: &[Finding]) -> Vec<RuleCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for finding in findings {
        *counts.entry(finding.rule_id.as_str()).or_default() += 1;
    }

    let mut by_rule: Vec<RuleCount> = counts
        .into_iter()
        .map(|(rule_id, count)| RuleCount {
            rule_id: rule_id.to_string(),
            count,
        })
        .collect();

    // Descending by count, then by id so equal counts order deterministically.
    by_rule.sort_by(|a, b| b.count.cmp(&a.count).then(a.rule_id.cmp(&b.rule_id)));
    by_rule.truncate(TOP_RULE_COUNT);
    by_rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::Severity;

    fn finding(rule_id: &str, severity: Severity, file: &str, line: usize) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            severity,
            category: crate::rules::types::Category::RawInput,
            file: file.to_string(),
            line,
            message: "m".to_string(),
            remediation: "r".to_string(),
            matched_text: "x".to_string(),
        }
    }

    #[test]
    fn test_findings_sorted_by_severity() {
        let findings = vec![
            finding("A", Severity::Low, "a.php", 1),
            finding("B", Severity::Critical, "a.php", 2),
            finding("C", Severity::Medium, "b.php", 3),
            finding("D", Severity::High, "b.php", 4),
        ];
        let report = build_report("site", 2, findings);
        let severities: Vec<Severity> = report.findings.iter().map(|f| f.severity).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Critical,
                Severity::High,
                Severity::Medium,
                Severity::Low
            ]
        );
    }

    #[test]
    fn test_sort_is_stable_within_severity() {
        let findings = vec![
            finding("A", Severity::High, "a.php", 1),
            finding("B", Severity::High, "a.php", 5),
            finding("C", Severity::High, "b.php", 2),
        ];
        let report = build_report("site", 2, findings);
        let ids: Vec<&str> = report.findings.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_summary_counts_untruncated() {
        let findings: Vec<Finding> = (0..250)
            .map(|i| finding("INP-001", Severity::Medium, &format!("f{}.php", i % 7), i))
            .collect();
        let report = build_report("site", 7, findings);

        assert_eq!(report.findings.len(), MAX_REPORTED_FINDINGS);
        assert_eq!(report.total_findings, 250);
        assert_eq!(report.summary.by_severity.medium, 250);
        assert_eq!(report.summary.files_with_findings, 7);
    }

    #[test]
    fn test_top_rules_sorted_and_capped() {
        let mut findings = Vec::new();
        for i in 0..12 {
            let id = format!("R-{:03}", i);
            for _ in 0..=i {
                findings.push(finding(&id, Severity::Low, "a.php", 1));
            }
        }
        let report = build_report("site", 1, findings);

        assert_eq!(report.summary.by_rule.len(), TOP_RULE_COUNT);
        assert_eq!(report.summary.by_rule[0].rule_id, "R-011");
        assert_eq!(report.summary.by_rule[0].count, 12);
        assert!(
            report
                .summary
                .by_rule
                .windows(2)
                .all(|w| w[0].count >= w[1].count)
        );
    }

    #[test]
    fn test_empty_findings() {
        let report = build_report("site", 3, Vec::new());
        assert_eq!(report.total_findings, 0);
        assert_eq!(report.files_scanned, 3);
        assert!(report.findings.is_empty());
        assert!(report.summary.by_rule.is_empty());
        assert_eq!(report.summary.files_with_findings, 0);
    }
}
