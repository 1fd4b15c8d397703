// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module manifest parsing from `module.toml` files.
//!
//! Each portal module ships a manifest describing its metadata, the
//! capabilities it exposes on the dashboard, and the config keys it reads.

use portico_core::types::ModuleKind;
use portico_core::PorticoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parsed module manifest describing a portal module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Unique name of the module (e.g., "vault", "tracker").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Which portal surface this module provides.
    pub kind: ModuleKind,
    /// Optional author identifier.
    pub author: Option<String>,
    /// Capabilities the module provides (e.g., ["encryption", "csv_export"]).
    pub capabilities: Vec<String>,
    /// Config keys the module reads (e.g., ["vault.idle_lock_secs"]).
    pub config_keys: Vec<String>,
}

/// Intermediate TOML deserialization struct for `module.toml`.
#[derive(Debug, Deserialize)]
struct ModuleManifestFile {
    module: ModuleSection,
}

/// The `[module]` section of a `module.toml` file.
#[derive(Debug, Deserialize)]
struct ModuleSection {
    name: String,
    version: String,
    description: String,
    kind: String,
    author: Option<String>,
    #[serde(default)]
    capabilities: Vec<String>,
    #[serde(default)]
    config_keys: Vec<String>,
}

/// Parse a module manifest from TOML content.
///
/// Validates that `kind` is a valid `ModuleKind` variant and that name
/// and version are non-empty.
pub fn parse_module_manifest(toml_content: &str) -> Result<ModuleManifest, PorticoError> {
    let file: ModuleManifestFile = toml::from_str(toml_content)
        .map_err(|e| PorticoError::Config(format!("invalid module manifest: {e}")))?;

    let section = file.module;

    if section.name.is_empty() {
        return Err(PorticoError::Config(
            "module manifest: name must not be empty".to_string(),
        ));
    }

    if section.version.is_empty() {
        return Err(PorticoError::Config(
            "module manifest: version must not be empty".to_string(),
        ));
    }

    let kind = ModuleKind::from_str(&section.kind).map_err(|_| {
        PorticoError::Config(format!(
            "module manifest: invalid kind '{}'. Expected one of: Vault, Tracker, Lister, Focus, Property",
            section.kind
        ))
    })?;

    Ok(ModuleManifest {
        name: section.name,
        version: section.version,
        description: section.description,
        kind,
        author: section.author,
        capabilities: section.capabilities,
        config_keys: section.config_keys,
    })
}
