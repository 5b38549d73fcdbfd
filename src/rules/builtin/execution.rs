use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![exe_001(), exe_002(), exe_003()]
}

fn exe_001() -> Rule {
    Rule {
        id: "EXE-001",
        name: "Shell command invocation",
        severity: Severity::High,
        category: Category::CommandExecution,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\b(?:exec|system|shell_exec|passthru|popen|proc_open|pcntl_exec)\s*\(")
                .expect("EXE-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Shell execution function call; command injection risk if any argument is attacker-influenced.",
        remediation: "Avoid shelling out; if unavoidable, pass a fixed command and wrap every argument in escapeshellarg().",
    }
}

fn exe_002() -> Rule {
    Rule {
        id: "EXE-002",
        name: "Dynamic code evaluation",
        severity: Severity::Critical,
        category: Category::CommandExecution,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\b(?:eval|assert|create_function)\s*\(").expect("EXE-002: invalid regex"),
        ],
        exclusions: vec![],
        message: "Runtime code evaluation; any tainted input reaching this call is remote code execution.",
        remediation: "Replace eval/assert/create_function with first-class functions or closures.",
    }
}

fn exe_003() -> Rule {
    Rule {
        id: "EXE-003",
        name: "Evaluating regex replacement",
        severity: Severity::Critical,
        category: Category::CommandExecution,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            // The deprecated /e modifier evaluates the replacement as code.
            Regex::new(r#"preg_replace\s*\(\s*["'][^"']*/[a-zA-Z]*e[a-zA-Z]*["']"#)
                .expect("EXE-003: invalid regex"),
        ],
        exclusions: vec![],
        message: "preg_replace() with the /e modifier evaluates its replacement string as code.",
        remediation: "Use preg_replace_callback() with a closure instead of the /e modifier.",
    }
}
