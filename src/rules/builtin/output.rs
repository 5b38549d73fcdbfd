use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![out_001(), out_002(), out_003()]
}

fn out_001() -> Rule {
    Rule {
        id: "OUT-001",
        name: "Request input echoed to response",
        severity: Severity::High,
        category: Category::UnsafeOutput,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"(?:\becho\b|\bprint\b)[^;]*\$_(?:GET|POST|REQUEST|COOKIE|SERVER)")
                .expect("OUT-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Request input is written to the response without escaping, a reflected XSS shape.",
        remediation: "Escape at output with esc_html(), esc_attr(), or esc_url() as appropriate for the context.",
    }
}

fn out_002() -> Rule {
    Rule {
        id: "OUT-002",
        name: "Unescaped variable output",
        severity: Severity::Medium,
        category: Category::UnsafeOutput,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"(?:\becho\b|\bprint\b)\s+\$\w+").expect("OUT-002: invalid regex"),
        ],
        exclusions: vec![],
        message: "Variable is echoed without a visible escaping call.",
        remediation: "Escape the value with esc_html() or a context-appropriate escaper before printing.",
    }
}

fn out_003() -> Rule {
    Rule {
        id: "OUT-003",
        name: "Unescaped formatted output",
        severity: Severity::Medium,
        category: Category::UnsafeOutput,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\bprintf\s*\(\s*\$\w+").expect("OUT-003: invalid regex"),
            Regex::new(r"\bvprintf\s*\(\s*\$\w+").expect("OUT-003: invalid regex"),
        ],
        exclusions: vec![],
        message: "Format string taken from a variable is printed without escaping.",
        remediation: "Use a literal format string and escape interpolated values with esc_html().",
    }
}
