//! The live configuration check battery.
//!
//! Each check reads one or two facts from the snapshot, never mutates
//! anything, and yields a single `CheckResult`. The battery is fixed;
//! category order and check order are stable across invocations.

use super::host::{AutoUpdatePolicy, HostSnapshot};
use super::probe::ProbeOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Info,
    Warning,
    Critical,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Info => "info",
            CheckStatus::Warning => "warning",
            CheckStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one live-state probe. `remediation` is `None` exactly when
/// the check passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl CheckResult {
    fn passed(check_id: &str, message: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Passed,
            message: message.into(),
            remediation: None,
        }
    }

    fn info(check_id: &str, message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Info,
            message: message.into(),
            remediation: Some(remediation.into()),
        }
    }

    fn warning(check_id: &str, message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Warning,
            message: message.into(),
            remediation: Some(remediation.into()),
        }
    }

    fn critical(
        check_id: &str,
        message: impl Into<String>,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            check_id: check_id.to_string(),
            status: CheckStatus::Critical,
            message: message.into(),
            remediation: Some(remediation.into()),
        }
    }
}

/// Run the full battery. Returns category label and results per category,
/// in fixed order.
pub fn run_checks(
    snapshot: &HostSnapshot,
    probe: &ProbeOutcome,
) -> Vec<(&'static str, Vec<CheckResult>)> {
    vec![
        ("Information exposure", information_exposure(snapshot)),
        ("Remote-procedure surface", rpc_surface(snapshot)),
        ("Account hygiene", account_hygiene(snapshot)),
        ("Configuration", configuration(snapshot)),
        ("Update currency", update_currency(snapshot)),
        ("File permissions", file_permissions(snapshot)),
        ("Response headers", response_headers(probe)),
    ]
}

fn information_exposure(s: &HostSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    checks.push(if s.installer_present {
        CheckResult::warning(
            "installer_artifact",
            "The installation script is still reachable.",
            "Delete the installer artifact now that setup is complete.",
        )
    } else {
        CheckResult::passed("installer_artifact", "No installation script found.")
    });

    checks.push(if s.sample_config_present {
        CheckResult::warning(
            "sample_config_artifact",
            "A sample configuration file is present in the web root.",
            "Remove the sample configuration; it documents your layout to attackers.",
        )
    } else {
        CheckResult::passed("sample_config_artifact", "No sample configuration present.")
    });

    checks.push(if s.debug_log_public {
        CheckResult::critical(
            "debug_log_exposure",
            "The debug log is readable from the web; it leaks paths, queries, and occasionally credentials.",
            "Move the log outside the web root or deny HTTP access to it.",
        )
    } else {
        CheckResult::passed("debug_log_exposure", "Debug log is not publicly readable.")
    });

    checks.push(if s.version_fingerprint_suppressed {
        CheckResult::passed(
            "version_fingerprint",
            "Version fingerprint is suppressed in generated pages.",
        )
    } else {
        CheckResult::info(
            "version_fingerprint",
            "Generated pages advertise the exact core version.",
            "Remove the generator field from pages and feeds.",
        )
    });

    checks.push(if s.user_enumeration_blocked {
        CheckResult::passed("user_enumeration", "User enumeration endpoints are guarded.")
    } else {
        CheckResult::warning(
            "user_enumeration",
            "Login names can be enumerated through author archives or the user listing endpoint.",
            "Block author-archive redirects and unauthenticated user listings.",
        )
    });

    checks
}

fn rpc_surface(s: &HostSnapshot) -> Vec<CheckResult> {
    vec![
        if s.legacy_rpc_enabled {
            CheckResult::warning(
                "legacy_rpc",
                "The legacy remote-procedure endpoint is enabled; it accepts credential-stuffing and amplification calls.",
                "Disable the endpoint or restrict it to known consumers.",
            )
        } else {
            CheckResult::passed("legacy_rpc", "Legacy remote-procedure endpoint is disabled.")
        },
        if s.linkback_enabled {
            CheckResult::warning(
                "linkback_amplification",
                "Link-back/trackback processing is enabled and can be abused for request amplification.",
                "Disable link-back and trackback processing.",
            )
        } else {
            CheckResult::passed("linkback_amplification", "Link-back processing is disabled.")
        },
    ]
}

const PREDICTABLE_ADMIN_LOGINS: &[&str] = &["admin", "administrator", "root", "webmaster"];

const ADMIN_COUNT_THRESHOLD: usize = 3;

fn account_hygiene(s: &HostSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let predictable = s.users.iter().find(|u| {
        u.is_admin && PREDICTABLE_ADMIN_LOGINS.contains(&u.login.to_lowercase().as_str())
    });
    checks.push(match predictable {
        Some(user) => CheckResult::warning(
            "predictable_admin_login",
            format!(
                "Administrator account '{}' uses a predictable login name.",
                user.login
            ),
            "Create a new administrator with a unique login and remove the predictable one.",
        ),
        None => CheckResult::passed(
            "predictable_admin_login",
            "No administrator uses a predictable login name.",
        ),
    });

    checks.push(match s.first_account() {
        Some(first) if first.is_admin => CheckResult::info(
            "first_account_admin",
            "The first-created account still holds administrative privilege; its identifier is guessable.",
            "Create a fresh administrator and demote the original first account.",
        ),
        _ => CheckResult::passed(
            "first_account_admin",
            "The first-created account is not an administrator.",
        ),
    });

    let admins = s.admin_count();
    checks.push(if admins > ADMIN_COUNT_THRESHOLD {
        CheckResult::warning(
            "administrator_count",
            format!(
                "{} accounts hold administrative privilege (threshold {}).",
                admins, ADMIN_COUNT_THRESHOLD
            ),
            "Demote accounts that do not need full administrative access.",
        )
    } else {
        CheckResult::passed(
            "administrator_count",
            format!("{} administrator account(s).", admins),
        )
    });

    checks
}

fn configuration(s: &HostSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    checks.push(if s.debug_enabled {
        CheckResult::warning(
            "debug_mode",
            "Debug mode is enabled on a live instance.",
            "Disable debug mode in production configuration.",
        )
    } else {
        CheckResult::passed("debug_mode", "Debug mode is disabled.")
    });

    checks.push(if s.debug_enabled && s.display_errors_enabled {
        CheckResult::critical(
            "error_display",
            "Errors are rendered into responses, exposing paths and query fragments to visitors.",
            "Disable error display and route diagnostics to a private log.",
        )
    } else if s.display_errors_enabled {
        CheckResult::warning(
            "error_display",
            "Error display is enabled; failures would be rendered into responses.",
            "Disable error display in production.",
        )
    } else {
        CheckResult::passed("error_display", "Error display is disabled.")
    });

    checks.push(if s.file_edit_locked {
        CheckResult::passed("file_editing", "Dashboard file editing is locked down.")
    } else {
        CheckResult::warning(
            "file_editing",
            "The dashboard can edit extension and theme code; a compromised session becomes code execution.",
            "Disable dashboard file editing in configuration.",
        )
    });

    checks.push(if s.file_mods_locked {
        CheckResult::passed("file_modifications", "Runtime file modification is locked down.")
    } else {
        CheckResult::info(
            "file_modifications",
            "Runtime installs and updates can modify code on disk.",
            "Lock down runtime file modification once deploys are automated.",
        )
    });

    checks.push(if s.tls_forced_for_admin {
        CheckResult::passed(
            "forced_transport_security",
            "Transport security is forced for authenticated sessions.",
        )
    } else {
        CheckResult::warning(
            "forced_transport_security",
            "Transport security is not forced for login and dashboard traffic.",
            "Force TLS for authenticated sessions in configuration.",
        )
    });

    checks.push(if s.tls_active {
        CheckResult::passed("transport_security", "The site is served over TLS.")
    } else {
        CheckResult::critical(
            "transport_security",
            "The site is served in cleartext; credentials and cookies transit unprotected.",
            "Serve the site over HTTPS and redirect plain HTTP.",
        )
    });

    checks.push(secret_keys_check(s));

    checks.push(if s.default_state_prefix {
        CheckResult::info(
            "state_prefix",
            "Persisted state uses the stock identifier prefix.",
            "Use a non-default prefix to blunt canned injection payloads.",
        )
    } else {
        CheckResult::passed("state_prefix", "Persisted state uses a custom prefix.")
    });

    checks.push(match s.auto_updates {
        AutoUpdatePolicy::Disabled => CheckResult::warning(
            "auto_updates",
            "Automatic updates are disabled; security releases require manual action.",
            "Re-enable at least minor automatic updates.",
        ),
        AutoUpdatePolicy::Minor => {
            CheckResult::passed("auto_updates", "Minor releases install automatically.")
        }
        AutoUpdatePolicy::All => {
            CheckResult::passed("auto_updates", "All releases install automatically.")
        }
    });

    checks
}

fn secret_keys_check(s: &HostSnapshot) -> CheckResult {
    if s.secret_keys.is_empty() {
        return CheckResult::warning(
            "secret_keys",
            "No secret key material was reported for this instance.",
            "Verify that all authentication keys and salts are defined.",
        );
    }

    let missing = s.secret_keys.iter().filter(|k| !k.present).count();
    let default = s.secret_keys.iter().filter(|k| k.is_default).count();

    if missing == 0 && default == 0 {
        CheckResult::passed(
            "secret_keys",
            format!("All {} secret keys are set and unique.", s.secret_keys.len()),
        )
    } else {
        CheckResult::critical(
            "secret_keys",
            format!(
                "{} secret key(s) missing and {} still at their default value; session material is forgeable.",
                missing, default
            ),
            "Regenerate the full key set from the official generator and deploy it.",
        )
    }
}

fn update_currency(s: &HostSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    checks.push(match (&s.core_version, &s.latest_core_version) {
        (Some(current), Some(latest)) if current == latest => CheckResult::passed(
            "core_currency",
            format!("Core platform {} is current.", current),
        ),
        (Some(current), Some(latest)) => CheckResult::critical(
            "core_currency",
            format!("Core platform {} is behind the latest release {}.", current, latest),
            format!("Update the core platform to {}.", latest),
        ),
        _ => CheckResult::warning(
            "core_currency",
            "Core version currency could not be determined.",
            "Check for core updates manually.",
        ),
    });

    checks.push(if s.outdated_extensions == 0 {
        CheckResult::passed("extension_currency", "All extensions are current.")
    } else {
        CheckResult::warning(
            "extension_currency",
            format!("{} extension(s) have pending updates.", s.outdated_extensions),
            "Update outdated extensions; stale extensions are the most common entry point.",
        )
    });

    checks.push(if s.inactive_extensions == 0 {
        CheckResult::passed("inactive_extensions", "No inactive extensions installed.")
    } else {
        CheckResult::info(
            "inactive_extensions",
            format!(
                "{} extension(s) are installed but inactive and still reachable on disk.",
                s.inactive_extensions
            ),
            "Remove extensions that are not in use to shrink the attack surface.",
        )
    });

    checks
}

fn file_permissions(s: &HostSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    checks.push(match s.config_file_mode {
        None => CheckResult::warning(
            "config_file_mode",
            "Configuration file permissions were not reported.",
            "Verify the configuration artifact is not group- or world-accessible.",
        ),
        Some(mode) if mode & 0o002 != 0 => CheckResult::critical(
            "config_file_mode",
            format!(
                "Configuration file is world-writable (mode {:o}).",
                mode & 0o777
            ),
            "Restrict the configuration artifact to the service account (0600).",
        ),
        Some(mode) if mode & 0o044 != 0 => CheckResult::warning(
            "config_file_mode",
            format!(
                "Configuration file is readable beyond its owner (mode {:o}).",
                mode & 0o777
            ),
            "Tighten the configuration artifact to 0600.",
        ),
        Some(mode) => CheckResult::passed(
            "config_file_mode",
            format!("Configuration file mode {:o} is restrictive.", mode & 0o777),
        ),
    });

    checks.push(if s.uploads_listing_guarded {
        CheckResult::passed(
            "uploads_listing_guard",
            "Upload storage has a directory-listing guard.",
        )
    } else {
        CheckResult::warning(
            "uploads_listing_guard",
            "Upload storage can be listed; filenames alone often leak private material.",
            "Drop an index file into upload storage or disable autoindexing.",
        )
    });

    checks.push(if s.uploads_world_writable {
        CheckResult::critical(
            "uploads_writability",
            "Upload storage is world-writable.",
            "Restrict upload storage to the service account (0755).",
        )
    } else {
        CheckResult::passed("uploads_writability", "Upload storage permissions are sane.")
    });

    checks
}

/// Presence checks for protective response headers, plus one inverted check
/// for the framework fingerprint header.
const HEADER_CHECKS: &[(&str, &str, CheckStatus, &str)] = &[
    (
        "header_content_type_options",
        "x-content-type-options",
        CheckStatus::Warning,
        "Send X-Content-Type-Options: nosniff.",
    ),
    (
        "header_transport_security",
        "strict-transport-security",
        CheckStatus::Warning,
        "Send Strict-Transport-Security with a max-age of at least six months.",
    ),
    (
        "header_content_security_policy",
        "content-security-policy",
        CheckStatus::Warning,
        "Define a Content-Security-Policy, starting from default-src 'self'.",
    ),
    (
        "header_xss_protection",
        "x-xss-protection",
        CheckStatus::Info,
        "Send X-XSS-Protection: 1; mode=block for legacy browsers.",
    ),
    (
        "header_referrer_policy",
        "referrer-policy",
        CheckStatus::Info,
        "Send Referrer-Policy: strict-origin-when-cross-origin.",
    ),
];

fn response_headers(probe: &ProbeOutcome) -> Vec<CheckResult> {
    let headers = match probe {
        ProbeOutcome::Headers(headers) => headers,
        ProbeOutcome::Unavailable(reason) => {
            let message = format!("Front-door probe failed: {}.", reason);
            let mut checks: Vec<CheckResult> = vec![CheckResult::warning(
                "header_frame_options",
                message.clone(),
                "Re-run the audit when the site is reachable.",
            )];
            for (id, _, _, _) in HEADER_CHECKS {
                checks.push(CheckResult::warning(
                    id,
                    message.clone(),
                    "Re-run the audit when the site is reachable.",
                ));
            }
            checks.push(CheckResult::warning(
                "header_powered_by",
                message,
                "Re-run the audit when the site is reachable.",
            ));
            return checks;
        }
    };

    let mut checks = Vec::new();

    // Clickjacking protection can come from either header.
    let frame_guarded = headers.contains_key("x-frame-options")
        || headers
            .get("content-security-policy")
            .is_some_and(|v| v.contains("frame-ancestors"));
    checks.push(if frame_guarded {
        CheckResult::passed("header_frame_options", "Clickjacking protection is present.")
    } else {
        CheckResult::warning(
            "header_frame_options",
            "No clickjacking protection header on the front door.",
            "Send X-Frame-Options: SAMEORIGIN or a frame-ancestors CSP directive.",
        )
    });

    for (id, header, missing_status, remediation) in HEADER_CHECKS {
        checks.push(if headers.contains_key(*header) {
            CheckResult::passed(id, format!("{} header is present.", header))
        } else {
            let message = format!("{} header is missing.", header);
            match missing_status {
                CheckStatus::Info => CheckResult::info(id, message, *remediation),
                _ => CheckResult::warning(id, message, *remediation),
            }
        });
    }

    checks.push(match headers.get("x-powered-by") {
        Some(value) => CheckResult::warning(
            "header_powered_by",
            format!("X-Powered-By advertises the stack: {}.", value),
            "Suppress the X-Powered-By header at the server or runtime level.",
        ),
        None => CheckResult::passed(
            "header_powered_by",
            "No framework fingerprint header is sent.",
        ),
    });

    checks
}
