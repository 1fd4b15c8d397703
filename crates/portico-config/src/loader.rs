// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./portico.toml` > `~/.config/portico/portico.toml`
//! > `/etc/portico/portico.toml` with environment variable overrides via the
//! `PORTICO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PorticoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/portico/portico.toml` (system-wide)
/// 3. `~/.config/portico/portico.toml` (user XDG config)
/// 4. `./portico.toml` (local directory)
/// 5. `PORTICO_*` environment variables
pub fn load_config() -> Result<PorticoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::file("/etc/portico/portico.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("portico/portico.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("portico.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PorticoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PorticoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys that themselves
/// contain underscores survive: `PORTICO_VAULT_KDF_ITERATIONS` must map to
/// `vault.kdf_iterations`, not `vault.kdf.iterations`.
fn env_provider() -> Env {
    // PORTICO_VAULT_KEY is the passphrase channel, not a config key.
    Env::prefixed("PORTICO_").ignore(&["vault_key"]).map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PORTICO_VAULT_IDLE_LOCK_SECS -> "vault_idle_lock_secs"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("portal_", "portal.", 1)
            .replacen("vault_", "vault.", 1)
            .replacen("modules_", "modules.", 1);
        mapped.into()
    })
}
