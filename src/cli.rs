use crate::rules::Category;
use crate::scanner::DEFAULT_FILE_CAP;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "cms-audit",
    version,
    about = "Security auditor for content-management installations",
    long_about = "cms-audit scans installation source trees for vulnerability-shaped code patterns and audits a live instance's configuration into a scored report."
)]
pub struct Cli {
    /// Paths to scan (files or directories)
    #[arg(required_unless_present_any = ["audit", "list_rules", "mcp_server"])]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Run the live configuration audit instead of a source scan
    #[arg(long)]
    pub audit: bool,

    /// Host snapshot JSON file for the live audit
    #[arg(long, value_name = "FILE", requires = "audit")]
    pub snapshot: Option<PathBuf>,

    /// List registered rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Restrict scanning or rule listing to one category
    #[arg(short, long, value_enum)]
    pub category: Option<Category>,

    /// Maximum number of files scanned per invocation
    #[arg(long, default_value_t = DEFAULT_FILE_CAP)]
    pub max_files: usize,

    /// Run as a JSON-RPC stdio server
    #[arg(long)]
    pub mcp_server: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_basic_scan() {
        let cli = Cli::try_parse_from(["cms-audit", "./site/"]).unwrap();
        assert_eq!(cli.paths.len(), 1);
        assert!(!cli.audit);
        assert_eq!(cli.max_files, DEFAULT_FILE_CAP);
    }

    #[test]
    fn test_paths_required_for_scan() {
        assert!(Cli::try_parse_from(["cms-audit"]).is_err());
    }

    #[test]
    fn test_audit_without_paths() {
        let cli = Cli::try_parse_from(["cms-audit", "--audit"]).unwrap();
        assert!(cli.audit);
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn test_snapshot_requires_audit() {
        assert!(Cli::try_parse_from(["cms-audit", "--snapshot", "state.json", "."]).is_err());
        let cli =
            Cli::try_parse_from(["cms-audit", "--audit", "--snapshot", "state.json"]).unwrap();
        assert_eq!(cli.snapshot.unwrap(), PathBuf::from("state.json"));
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["cms-audit", "--format", "json", "./site/"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_category() {
        let cli = Cli::try_parse_from(["cms-audit", "--category", "sql-injection", "./site/"])
            .unwrap();
        assert_eq!(cli.category, Some(Category::SqlInjection));
    }

    #[test]
    fn test_parse_max_files() {
        let cli = Cli::try_parse_from(["cms-audit", "--max-files", "50", "./site/"]).unwrap();
        assert_eq!(cli.max_files, 50);
    }

    #[test]
    fn test_list_rules_without_paths() {
        let cli = Cli::try_parse_from(["cms-audit", "--list-rules"]).unwrap();
        assert!(cli.list_rules);
    }

    #[test]
    fn test_mcp_server_flag() {
        let cli = Cli::try_parse_from(["cms-audit", "--mcp-server"]).unwrap();
        assert!(cli.mcp_server);
    }
}
