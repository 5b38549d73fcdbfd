//! Live configuration auditing: a fixed battery of runtime checks over a
//! host snapshot, scored into a graded report.

pub mod checks;
pub mod host;
pub mod probe;
pub mod scoring;

pub use checks::{CheckResult, CheckStatus};
pub use host::{AutoUpdatePolicy, HostSnapshot, SecretKeyStatus, UserAccount};
pub use probe::ProbeOutcome;
pub use scoring::{AuditCategory, AuditReport, AuditSummary, Grade, Priority, Recommendation};

/// Run the full audit battery against a snapshot of the live instance.
/// The response-header probe is the only network access; it carries its own
/// timeout and degrades to warning checks on failure, so this call never
/// fails.
pub fn run_live_audit(snapshot: &HostSnapshot) -> AuditReport {
    let probe = match &snapshot.site_url {
        Some(url) => probe::fetch_headers(url),
        None => ProbeOutcome::Unavailable("no site URL in snapshot".to_string()),
    };
    scoring::build_report(checks::run_checks(snapshot, &probe))
}
