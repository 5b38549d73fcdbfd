use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![inp_001()]
}

fn inp_001() -> Rule {
    Rule {
        id: "INP-001",
        name: "Raw request input access",
        severity: Severity::Medium,
        category: Category::RawInput,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\$_(?:GET|POST|REQUEST|COOKIE)\s*\[").expect("INP-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Request superglobal read without visible sanitization.",
        remediation: "Sanitize the value with sanitize_text_field(), absint(), or filter_input() before use.",
    }
}
