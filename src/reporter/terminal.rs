use crate::audit::scoring::score_bar;
use crate::audit::{AuditReport, CheckStatus, Grade};
use crate::reporter::Reporter;
use crate::rules::{ScanReport, Severity};
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn severity_label(severity: Severity) -> colored::ColoredString {
        let label = format!("[{}]", severity);
        match severity {
            Severity::Critical => label.red().bold(),
            Severity::High => label.yellow().bold(),
            Severity::Medium => label.cyan(),
            Severity::Low => label.white(),
        }
    }

    fn status_label(status: CheckStatus) -> colored::ColoredString {
        match status {
            CheckStatus::Passed => "PASS".green().bold(),
            CheckStatus::Info => "INFO".cyan(),
            CheckStatus::Warning => "WARN".yellow().bold(),
            CheckStatus::Critical => "CRIT".red().bold(),
        }
    }

    fn grade_label(grade: Grade) -> colored::ColoredString {
        let label = grade.as_str();
        match grade {
            Grade::A => label.green().bold(),
            Grade::B => label.green(),
            Grade::C => label.yellow().bold(),
            Grade::D => label.yellow(),
            Grade::F => label.red().bold(),
        }
    }
}

impl Reporter for TerminalReporter {
    fn scan_report(&self, report: &ScanReport) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n{} {} ({} file(s) scanned)\n\n",
            "Scanned".bold(),
            report.path_scanned,
            report.files_scanned
        ));

        if report.findings.is_empty() {
            out.push_str(&format!("{}\n", "No findings.".green().bold()));
            return out;
        }

        for finding in &report.findings {
            out.push_str(&format!(
                "{}:{}: {} {} {}\n",
                finding.file,
                finding.line,
                Self::severity_label(finding.severity),
                finding.rule_id.bold(),
                finding.message
            ));
            if self.verbose {
                out.push_str(&format!("    {} {}\n", ">".dimmed(), finding.matched_text));
                out.push_str(&format!("    fix: {}\n", finding.remediation.dimmed()));
            }
        }

        let counts = &report.summary.by_severity;
        out.push_str(&format!(
            "\n{}: {} total ({} critical, {} high, {} medium, {} low) in {} file(s)\n",
            "Summary".bold(),
            report.total_findings,
            counts.critical,
            counts.high,
            counts.medium,
            counts.low,
            report.summary.files_with_findings
        ));

        if report.total_findings > report.findings.len() {
            out.push_str(&format!(
                "{}\n",
                format!(
                    "Showing first {} of {} findings.",
                    report.findings.len(),
                    report.total_findings
                )
                .dimmed()
            ));
        }

        if self.verbose && !report.summary.by_rule.is_empty() {
            out.push_str(&format!("\n{}:\n", "Top rules".bold()));
            for rule in &report.summary.by_rule {
                out.push_str(&format!("  {:>4}  {}\n", rule.count, rule.rule_id));
            }
        }

        out
    }

    fn audit_report(&self, report: &AuditReport) -> String {
        let mut out = String::new();

        for category in &report.categories {
            out.push_str(&format!("\n{}\n", category.label.bold().underline()));
            for check in &category.checks {
                out.push_str(&format!(
                    "  {} {}\n",
                    Self::status_label(check.status),
                    check.message
                ));
                if self.verbose
                    && let Some(remediation) = &check.remediation
                {
                    out.push_str(&format!("       fix: {}\n", remediation.dimmed()));
                }
            }
        }

        out.push_str(&format!(
            "\n{}: {} {}/100  grade {}\n",
            "Score".bold(),
            score_bar(report.score, 100),
            report.score,
            Self::grade_label(report.grade)
        ));
        out.push_str(&format!(
            "{} passed, {} info, {} warning, {} critical\n",
            report.summary.passed,
            report.summary.info,
            report.summary.warning,
            report.summary.critical
        ));

        if !report.recommendations.is_empty() {
            out.push_str(&format!("\n{}:\n", "Recommendations".bold()));
            for rec in &report.recommendations {
                out.push_str(&format!(
                    "  [{:?}] {}: {}\n",
                    rec.priority, rec.category, rec.action
                ));
            }
        }

        out
    }
}
