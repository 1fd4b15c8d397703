// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the built-in module catalog into a registry and renders the
//! `portico modules` listing.

use colored::Colorize;
use portico_config::model::{PorticoConfig, VaultConfig};
use portico_core::traits::module::Module;
use portico_core::types::ModuleKind;
use portico_core::PorticoError;
use portico_module::{builtin_catalog, ModuleFactory, ModuleRegistry, ModuleStatus};

/// The vault is the only module with a runnable implementation.
struct VaultModule {
    config: VaultConfig,
}

impl Module for VaultModule {
    fn name(&self) -> &str {
        "vault"
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Vault
    }

    fn run(&self) -> Result<(), PorticoError> {
        let config = PorticoConfig {
            vault: self.config.clone(),
            ..PorticoConfig::default()
        };
        crate::shell::run_vault_shell(&config, None)
    }
}

struct VaultModuleFactory;

impl ModuleFactory for VaultModuleFactory {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Vault
    }

    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn Module>, PorticoError> {
        let config: VaultConfig = serde_json::from_value(config.clone())
            .map_err(|e| PorticoError::Config(format!("invalid vault module config: {e}")))?;
        Ok(Box::new(VaultModule { config }))
    }
}

/// Build the registry from the built-in catalog.
///
/// Modules named in `modules.disabled` are registered disabled; modules
/// without a runnable implementation are marked as such.
pub fn build_registry(config: &PorticoConfig) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    for manifest in builtin_catalog() {
        let disabled = config.modules.disabled.contains(&manifest.name);
        let (factory, status): (Option<Box<dyn ModuleFactory>>, ModuleStatus) =
            match manifest.kind {
                ModuleKind::Vault => (Some(Box::new(VaultModuleFactory)), ModuleStatus::Enabled),
                _ => (None, ModuleStatus::NotImplemented),
            };
        let status = if disabled { ModuleStatus::Disabled } else { status };
        registry.register_with_status(manifest, factory, status);
    }
    registry
}

/// Render the module listing, optionally filtered by a query string.
pub fn print_modules(config: &PorticoConfig, query: Option<&str>) -> Result<(), PorticoError> {
    let registry = build_registry(config);
    let matched = portico_module::search_catalog(query.unwrap_or(""));

    if matched.is_empty() {
        println!("no modules match '{}'", query.unwrap_or(""));
        return Ok(());
    }

    for manifest in &matched {
        // Every catalog entry is registered above.
        let status = registry
            .get(&manifest.name)
            .map(|e| e.status.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let status_colored = match status.as_str() {
            "enabled" => status.green(),
            "disabled" => status.red(),
            _ => status.yellow(),
        };
        println!(
            "{:<10} {:<9} {:<8} [{}] {}",
            manifest.name.bold(),
            manifest.kind,
            manifest.version,
            status_colored,
            manifest.description
        );
    }
    Ok(())
}
