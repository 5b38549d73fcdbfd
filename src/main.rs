use clap::Parser;
use cms_audit::{
    Cli, HostSnapshot, JsonReporter, OutputFormat, Reporter, Severity, TerminalReporter,
    mcp_server::McpServer, run_live_audit,
    rules::list_rules,
    scanner::scan_path,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.mcp_server {
        McpServer::new().run();
        return ExitCode::SUCCESS;
    }

    if cli.list_rules {
        return handle_list_rules(&cli);
    }

    if cli.audit {
        return handle_audit(&cli);
    }

    handle_scan(&cli)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "cms_audit=debug"
    } else {
        "cms_audit=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn reporter_for(cli: &Cli) -> Box<dyn Reporter> {
    match cli.format {
        OutputFormat::Terminal => Box::new(TerminalReporter::new(cli.verbose)),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    }
}

fn handle_scan(cli: &Cli) -> ExitCode {
    let reporter = reporter_for(cli);
    let mut failed = false;

    for path in &cli.paths {
        match scan_path(path, cli.category, cli.max_files) {
            Ok(report) => {
                println!("{}", reporter.scan_report(&report));
                if report
                    .findings
                    .iter()
                    .any(|f| f.severity >= Severity::High)
                {
                    failed = true;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn handle_audit(cli: &Cli) -> ExitCode {
    let snapshot = match &cli.snapshot {
        Some(path) => match HostSnapshot::from_file(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => HostSnapshot::default(),
    };

    let report = run_live_audit(&snapshot);
    println!("{}", reporter_for(cli).audit_report(&report));

    if report.summary.critical > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn handle_list_rules(cli: &Cli) -> ExitCode {
    let rules = list_rules(cli.category);

    match cli.format {
        OutputFormat::Json => {
            match serde_json::to_string_pretty(&rules) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        OutputFormat::Terminal => {
            for rule in &rules {
                println!(
                    "{:<8} {:<9} {:<18} {}",
                    rule.id,
                    rule.severity.as_str(),
                    rule.category.as_str(),
                    rule.name
                );
            }
        }
    }

    ExitCode::SUCCESS
}
