use crate::rules::types::{Category, Rule, ScanMode, Severity};
use regex::Regex;

pub fn rules() -> Vec<Rule> {
    vec![sql_001(), sql_002(), sql_003()]
}

fn sql_001() -> Rule {
    Rule {
        id: "SQL-001",
        name: "Request input inside a query call",
        severity: Severity::Critical,
        category: Category::SqlInjection,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(
                r"(?:->query|->get_results|->get_row|->get_col|->get_var|mysqli_query|mysql_query)\s*\([^)]*\$_(?:GET|POST|REQUEST|COOKIE)",
            )
            .expect("SQL-001: invalid regex"),
        ],
        exclusions: vec![
            // Placeholder-style calls route through prepare() on the same line.
            Regex::new(r"->prepare\s*\(").expect("SQL-001: invalid regex"),
        ],
        message: "Request input flows into a database query call without preparation.",
        remediation: "Build the statement with $wpdb->prepare() and bound placeholders instead of interpolating request data.",
    }
}

fn sql_002() -> Rule {
    Rule {
        id: "SQL-002",
        name: "SQL string concatenated with a variable",
        severity: Severity::High,
        category: Category::SqlInjection,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r#"["'](?:SELECT|INSERT|UPDATE|DELETE|REPLACE)\b[^"']*["']\s*\.\s*\$"#)
                .expect("SQL-002: invalid regex"),
        ],
        exclusions: vec![
            Regex::new(r"->prepare\s*\(").expect("SQL-002: invalid regex"),
        ],
        message: "A SQL statement is assembled by string concatenation with a variable.",
        remediation: "Use $wpdb->prepare() with %s/%d placeholders; never splice variables into SQL text.",
    }
}

fn sql_003() -> Rule {
    Rule {
        id: "SQL-003",
        name: "SQL string with interpolated variable",
        severity: Severity::High,
        category: Category::SqlInjection,
        scan_mode: ScanMode::SingleLine,
        patterns: vec![
            Regex::new(r#""(?:SELECT|INSERT|UPDATE|DELETE|REPLACE)\b[^"]*\$\w+"#)
                .expect("SQL-003: invalid regex"),
        ],
        exclusions: vec![
            Regex::new(r"->prepare\s*\(").expect("SQL-003: invalid regex"),
            // %s/%d placeholder strings are prepare() format arguments.
            Regex::new(r"%[sdf]").expect("SQL-003: invalid regex"),
        ],
        message: "A double-quoted SQL statement interpolates a variable directly.",
        remediation: "Move the statement into $wpdb->prepare() and pass the variable as a bound argument.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(rule: &Rule, line: &str) -> bool {
        let hit = rule.patterns.iter().any(|p| p.is_match(line));
        let excluded = rule.exclusions.iter().any(|e| e.is_match(line));
        hit && !excluded
    }

    #[test]
    fn test_sql_001_detects_request_input_in_query() {
        let rule = sql_001();
        assert!(matches(
            &rule,
            r#"$wpdb->query("DELETE FROM t WHERE id = " . $_GET['id']);"#
        ));
        assert!(matches(
            &rule,
            r#"mysqli_query($db, "SELECT * FROM u WHERE n = '" . $_POST['n'] . "'");"#
        ));
    }

    #[test]
    fn test_sql_001_skips_prepared_calls() {
        let rule = sql_001();
        assert!(!matches(
            &rule,
            r#"$wpdb->query($wpdb->prepare("SELECT * FROM t WHERE id = %d", $_GET['id']));"#
        ));
    }

    #[test]
    fn test_sql_002_detects_concatenation() {
        let rule = sql_002();
        assert!(matches(
            &rule,
            r#"$sql = "SELECT * FROM posts WHERE author = " . $author;"#
        ));
        assert!(!matches(&rule, r#"$sql = "SELECT * FROM posts";"#));
    }

    #[test]
    fn test_sql_003_detects_interpolation() {
        let rule = sql_003();
        assert!(matches(
            &rule,
            r#"$sql = "SELECT * FROM users WHERE login = '$login'";"#
        ));
        assert!(!matches(
            &rule,
            r#"$sql = $wpdb->prepare("SELECT * FROM users WHERE id = %d", $id);"#
        ));
    }
}
