use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![des_001(), des_002()]
}

fn des_001() -> Rule {
    Rule {
        id: "DES-001",
        name: "Deserialization of request input",
        severity: Severity::Critical,
        category: Category::Deserialization,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r"\bunserialize\s*\(\s*[^)]*\$_(?:GET|POST|REQUEST|COOKIE)")
                .expect("DES-001: invalid regex"),
        ],
        exclusions: vec![],
        message: "Request input is unserialized directly; crafted payloads can instantiate arbitrary objects.",
        remediation: "Exchange structured data as JSON (json_decode) or pass ['allowed_classes' => false] to unserialize().",
    }
}

fn des_002() -> Rule {
    Rule {
        id: "DES-002",
        name: "Native deserialization call",
        severity: Severity::Medium,
        category: Category::Deserialization,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![Regex::new(r"\bunserialize\s*\(").expect("DES-002: invalid regex")],
        exclusions: vec![
            Regex::new(r"allowed_classes").expect("DES-002: invalid regex"),
        ],
        message: "unserialize() on data whose provenance is not visible on this line.",
        remediation: "Verify the serialized data is trusted, or restrict instantiation with ['allowed_classes' => false].",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_des_001_detects_request_unserialize() {
        let rule = des_001();
        assert!(
            rule.patterns
                .iter()
                .any(|p| p.is_match("$data = unserialize($_COOKIE['cart']);"))
        );
    }

    #[test]
    fn test_des_002_skips_restricted_calls() {
        let rule = des_002();
        let line = "$data = unserialize($raw, ['allowed_classes' => false]);";
        let hit = rule.patterns.iter().any(|p| p.is_match(line));
        let excluded = rule.exclusions.iter().any(|e| e.is_match(line));
        assert!(hit && excluded);
    }
}
