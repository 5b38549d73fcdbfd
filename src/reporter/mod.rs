pub mod json;
pub mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::audit::AuditReport;
use crate::rules::ScanReport;

pub trait Reporter {
    fn scan_report(&self, report: &ScanReport) -> String;
    fn audit_report(&self, report: &AuditReport) -> String;
}
