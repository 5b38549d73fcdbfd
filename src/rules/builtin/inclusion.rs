use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![inc_001(), inc_002()]
}

fn inc_001() -> Rule {
    Rule {
        id: "INC-001",
        name: "Request input in include path",
        severity: Severity::Critical,
        category: Category::FileInclusion,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(
                r"\b(?:include|require)(?:_once)?\s*\(?\s*[^;]*\$_(?:GET|POST|REQUEST|COOKIE)",
            )
            .expect("INC-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Request input controls an include/require path, a remote or local file inclusion shape.",
        remediation: "Map request values to a fixed allowlist of template names; never pass them to include directly.",
    }
}

fn inc_002() -> Rule {
    Rule {
        id: "INC-002",
        name: "Variable include path",
        severity: Severity::High,
        category: Category::FileInclusion,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\b(?:include|require)(?:_once)?\s*\(?\s*\$\w+")
                .expect("INC-002: invalid regex"),
        ],
        exclusions: vec![
            // Concatenation onto a constant base dir is the common safe idiom.
            Regex::new(r"\b(?:include|require)(?:_once)?\s*\(?\s*(?:__DIR__|ABSPATH|dirname\()")
                .expect("INC-002: invalid regex"),
        ],
        message: "Include path is taken from a variable; the file loaded cannot be determined statically.",
        remediation: "Anchor the path to a constant base directory and validate the remainder against an allowlist.",
    }
}
