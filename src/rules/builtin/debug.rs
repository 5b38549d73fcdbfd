use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![dbg_001(), dbg_002(), dbg_003(), dbg_004()]
}

fn dbg_001() -> Rule {
    Rule {
        id: "DBG-001",
        name: "Debug mode enabled",
        severity: Severity::Medium,
        category: Category::DebugExposure,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r#"define\s*\(\s*["']WP_DEBUG["']\s*,\s*true"#)
                .expect("DBG-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Debug mode is switched on in configuration.",
        remediation: "Set WP_DEBUG to false in production; use WP_DEBUG_LOG on staging instead.",
    }
}

fn dbg_002() -> Rule {
    Rule {
        id: "DBG-002",
        name: "Error display enabled",
        severity: Severity::Medium,
        category: Category::DebugExposure,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r#"ini_set\s*\(\s*["']display_errors["']\s*,\s*["']?(?:1|[Oo]n|true)"#)
                .expect("DBG-002: invalid regex"),
        ],
        exclusions: vec![],
        message: "PHP errors are displayed in responses, leaking paths and query fragments.",
        remediation: "Disable display_errors and route diagnostics to a private log file.",
    }
}

fn dbg_003() -> Rule {
    Rule {
        id: "DBG-003",
        name: "Full error reporting",
        severity: Severity::Low,
        category: Category::DebugExposure,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"error_reporting\s*\(\s*E_ALL").expect("DBG-003: invalid regex"),
        ],
        exclusions: vec![],
        message: "error_reporting(E_ALL) in code that may ship to production.",
        remediation: "Scope full reporting to development configuration only.",
    }
}

fn dbg_004() -> Rule {
    Rule {
        id: "DBG-004",
        name: "Request data dumped to output",
        severity: Severity::Medium,
        category: Category::DebugExposure,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\b(?:var_dump|print_r|var_export)\s*\(\s*\$_(?:GET|POST|REQUEST|SERVER|COOKIE)")
                .expect("DBG-004: invalid regex"),
        ],
        exclusions: vec![],
        message: "Request superglobal is dumped to the response.",
        remediation: "Remove the dump call; log the specific fields needed at debug level instead.",
    }
}
