//! Whole-content CSRF rules.
//!
//! These shapes span multiple lines, so the patterns run against the full
//! file text and exclusions run against the matched span rather than a
//! single line.

use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![csr_001(), csr_002()]
}

fn csr_001() -> Rule {
    Rule {
        id: "CSR-001",
        name: "POST form without a token field",
        severity: Severity::High,
        category: Category::Csrf,
        scan_mode: ScanMode::WholeContent,
        patterns: vec![
            Regex::new(r#"(?is)<form[^>]*method\s*=\s*["']?post["']?[^>]*>.*?</form>"#)
                .expect("CSR-001: invalid regex"),
        ],
        exclusions: vec![
            Regex::new(r"(?i)nonce|csrf|_token|authenticity").expect("CSR-001: invalid regex"),
        ],
        message: "A POST form carries no nonce or token field anywhere in its body.",
        remediation: "Emit a token with wp_nonce_field() inside the form and verify it in the handler.",
    }
}

fn csr_002() -> Rule {
    Rule {
        id: "CSR-002",
        name: "POST handler without verification",
        severity: Severity::High,
        category: Category::Csrf,
        scan_mode: ScanMode::WholeContent,
        patterns: vec![
            Regex::new(r"(?is)function\s+\w+\s*\([^)]*\)\s*\{[^{}]*\$_POST[^{}]*\}")
                .expect("CSR-002: invalid regex"),
        ],
        exclusions: vec![
            Regex::new(r"(?i)wp_verify_nonce|check_admin_referer|check_ajax_referer")
                .expect("CSR-002: invalid regex"),
        ],
        message: "A function consumes POST data without a nonce verification call in its body.",
        remediation: "Call check_admin_referer() or wp_verify_nonce() before acting on the request.",
    }
}
