// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Portico portal.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, producing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Portico configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PorticoConfig {
    /// Portal identity and logging settings.
    #[serde(default)]
    pub portal: PortalConfig,

    /// Credential vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Module registry settings.
    #[serde(default)]
    pub modules: ModulesConfig,
}

/// Portal identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PortalConfig {
    /// Display name of the portal.
    #[serde(default = "default_portal_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            name: default_portal_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_portal_name() -> String {
    "portico".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Credential vault configuration.
///
/// The timer values are UX constants carried over from the portal: they are
/// tunable, not invariants.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// PBKDF2-HMAC-SHA256 iteration count (default: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Seconds of inactivity before an unlocked session force-locks
    /// (default: 600, i.e. 10 minutes). A dirty session is warned and
    /// deferred instead of locked.
    #[serde(default = "default_idle_lock_secs")]
    pub idle_lock_secs: u64,

    /// Seconds a revealed password stays visible before auto-hiding
    /// (default: 5).
    #[serde(default = "default_reveal_hide_secs")]
    pub reveal_hide_secs: u64,

    /// Length of generated passwords (default: 20).
    #[serde(default = "default_generated_password_length")]
    pub generated_password_length: usize,

    /// Default vault container file opened when none is given on the
    /// command line.
    #[serde(default)]
    pub default_file: Option<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
            idle_lock_secs: default_idle_lock_secs(),
            reveal_hide_secs: default_reveal_hide_secs(),
            generated_password_length: default_generated_password_length(),
            default_file: None,
        }
    }
}

fn default_kdf_iterations() -> u32 {
    100_000
}

fn default_idle_lock_secs() -> u64 {
    600
}

fn default_reveal_hide_secs() -> u64 {
    5
}

fn default_generated_password_length() -> usize {
    20
}

/// Module registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModulesConfig {
    /// Module names the user has explicitly disabled.
    #[serde(default)]
    pub disabled: Vec<String>,
}
