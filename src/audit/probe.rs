//! Live HTTP probe of the site's front door.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// The probe carries its own timeout so a dead site cannot stall the rest
/// of the audit battery.
pub const PROBE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// Response header map with lowercased names.
    Headers(HashMap<String, String>),
    /// The probe could not complete; header checks degrade to warnings.
    Unavailable(String),
}

pub fn fetch_headers(url: &str) -> ProbeOutcome {
    debug!(url, "Probing front door for response headers");

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .user_agent(concat!("cms-audit/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client");
            return ProbeOutcome::Unavailable(e.to_string());
        }
    };

    match client.get(url).send() {
        Ok(response) => {
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_ascii_lowercase(),
                        value.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect();
            ProbeOutcome::Headers(headers)
        }
        Err(e) => {
            warn!(url, error = %e, "Front-door probe failed");
            ProbeOutcome::Unavailable(e.to_string())
        }
    }
}
