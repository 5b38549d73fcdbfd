use crate::audit::AuditReport;
use crate::reporter::Reporter;
use crate::rules::ScanReport;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn serialize<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize report: {}"}}"#, e))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn scan_report(&self, report: &ScanReport) -> String {
        Self::serialize(report)
    }

    fn audit_report(&self, report: &AuditReport) -> String {
        Self::serialize(report)
    }
}
