//! The live-state query surface.
//!
//! The auditor does not talk to the host platform directly; the surrounding
//! dispatcher materializes the discrete runtime facts it needs into a
//! `HostSnapshot` and hands it over. Every field defaults, so a partial
//! snapshot still audits, with absent facts reported at their conservative
//! default.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoUpdatePolicy {
    Disabled,
    #[default]
    Minor,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Presence and hygiene of one required secret/key constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretKeyStatus {
    pub name: String,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSnapshot {
    /// Front-door URL for the response-header probe. Without it the header
    /// checks degrade to warnings.
    pub site_url: Option<String>,

    // Information exposure
    pub installer_present: bool,
    pub sample_config_present: bool,
    pub debug_log_public: bool,
    pub version_fingerprint_suppressed: bool,
    pub user_enumeration_blocked: bool,

    // Remote-procedure surface
    pub legacy_rpc_enabled: bool,
    pub linkback_enabled: bool,

    // Account hygiene
    pub users: Vec<UserAccount>,

    // Configuration
    pub debug_enabled: bool,
    pub display_errors_enabled: bool,
    pub file_edit_locked: bool,
    pub file_mods_locked: bool,
    pub tls_forced_for_admin: bool,
    pub tls_active: bool,
    pub secret_keys: Vec<SecretKeyStatus>,
    /// True while persisted state still uses the stock identifier prefix.
    pub default_state_prefix: bool,
    pub auto_updates: AutoUpdatePolicy,

    // Update currency
    pub core_version: Option<String>,
    pub latest_core_version: Option<String>,
    pub outdated_extensions: usize,
    pub inactive_extensions: usize,

    // File permissions
    /// Unix permission bits of the main configuration artifact.
    pub config_file_mode: Option<u32>,
    pub uploads_listing_guarded: bool,
    pub uploads_world_writable: bool,
}

impl HostSnapshot {
    /// Load a snapshot serialized by the dispatcher.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AuditError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| AuditError::SnapshotParse {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_admin).count()
    }

    /// The account created first, by lowest id.
    pub fn first_account(&self) -> Option<&UserAccount> {
        self.users.iter().min_by_key(|u| u.id)
    }
}
