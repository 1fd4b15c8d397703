// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module registry for the compiled-in portal modules.
//!
//! The `ModuleRegistry` stores `ModuleEntry` records keyed by module name.
//! Each entry carries a manifest, a status, and an optional factory for
//! creating a runnable module instance.

use portico_core::traits::module::Module;
use portico_core::types::ModuleKind;
use portico_core::PorticoError;
use std::collections::HashMap;
use tracing::debug;

use crate::manifest::ModuleManifest;

/// Status of a module in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Module is active and launchable from the portal.
    Enabled,
    /// Module is explicitly disabled by the user.
    Disabled,
    /// Module is compiled in but has no runnable implementation yet.
    NotImplemented,
}

impl std::fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleStatus::Enabled => write!(f, "enabled"),
            ModuleStatus::Disabled => write!(f, "disabled"),
            ModuleStatus::NotImplemented => write!(f, "not-implemented"),
        }
    }
}

/// Factory trait for creating module instances from configuration.
///
/// Factories are optional -- the registry can hold manifests without
/// factories for catalog display purposes (module list/search).
pub trait ModuleFactory: Send + Sync {
    /// The module kind this factory produces.
    fn kind(&self) -> ModuleKind;

    /// Create a new module instance from the given configuration.
    fn create(&self, config: &serde_json::Value) -> Result<Box<dyn Module>, PorticoError>;
}

/// A single entry in the module registry.
pub struct ModuleEntry {
    /// Module manifest with metadata.
    pub manifest: ModuleManifest,
    /// Current status of the module.
    pub status: ModuleStatus,
    /// Optional factory for creating module instances.
    pub factory: Option<Box<dyn ModuleFactory>>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("manifest", &self.manifest)
            .field("status", &self.status)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

/// Registry of compiled-in portal modules.
///
/// Stores module entries keyed by name, supporting registration, lookup,
/// filtering by kind, and status toggling. Re-registering a name replaces
/// the previous entry.
pub struct ModuleRegistry {
    entries: HashMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a module with default status `Enabled`.
    pub fn register(&mut self, manifest: ModuleManifest, factory: Option<Box<dyn ModuleFactory>>) {
        self.register_with_status(manifest, factory, ModuleStatus::Enabled);
    }

    /// Register a module with an explicit status.
    pub fn register_with_status(
        &mut self,
        manifest: ModuleManifest,
        factory: Option<Box<dyn ModuleFactory>>,
        status: ModuleStatus,
    ) {
        let name = manifest.name.clone();
        debug!(module = %name, status = %status, "registering module");
        self.entries.insert(
            name,
            ModuleEntry {
                manifest,
                status,
                factory,
            },
        );
    }

    /// Get a module entry by name.
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    /// Get all enabled modules matching the given kind.
    pub fn get_enabled(&self, kind: ModuleKind) -> Vec<&ModuleEntry> {
        self.entries
            .values()
            .filter(|e| e.status == ModuleStatus::Enabled && e.manifest.kind == kind)
            .collect()
    }

    /// List all module entries, sorted by name.
    pub fn list_all(&self) -> Vec<&ModuleEntry> {
        let mut entries: Vec<&ModuleEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.manifest.name.cmp(&b.manifest.name));
        entries
    }

    /// Toggle a module's enabled status.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), PorticoError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| PorticoError::ModuleNotFound {
                name: name.to_string(),
            })?;
        entry.status = if enabled {
            ModuleStatus::Enabled
        } else {
            ModuleStatus::Disabled
        };
        Ok(())
    }

    /// Launch the named module: the entry must be enabled and carry a
    /// factory.
    pub fn launch(
        &self,
        name: &str,
        config: &serde_json::Value,
    ) -> Result<Box<dyn Module>, PorticoError> {
        let entry = self.get(name).ok_or_else(|| PorticoError::ModuleNotFound {
            name: name.to_string(),
        })?;
        match entry.status {
            ModuleStatus::Enabled => {}
            ModuleStatus::Disabled => {
                return Err(PorticoError::Config(format!("module '{name}' is disabled")));
            }
            ModuleStatus::NotImplemented => {
                return Err(PorticoError::Config(format!(
                    "module '{name}' has no runnable implementation"
                )));
            }
        }
        let factory = entry.factory.as_deref().ok_or_else(|| {
            PorticoError::Config(format!("module '{name}' has no factory registered"))
        })?;
        factory.create(config)
    }

    /// Returns the number of registered modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manifest(name: &str, kind: ModuleKind) -> ModuleManifest {
        ModuleManifest {
            name: name.to_string(),
            version: "0.1.0".to_string(),
            description: format!("Test module {name}"),
            kind,
            author: None,
            capabilities: vec![],
            config_keys: vec![],
        }
    }

    #[test]
    fn register_and_get_roundtrip() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);

        let entry = registry.get("vault").unwrap();
        assert_eq!(entry.manifest.name, "vault");
        assert_eq!(entry.status, ModuleStatus::Enabled);
    }

    #[test]
    fn reregister_replaces_entry() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);
        let mut updated = test_manifest("vault", ModuleKind::Vault);
        updated.version = "0.2.0".to_string();
        registry.register(updated, None);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("vault").unwrap().manifest.version, "0.2.0");
    }

    #[test]
    fn get_enabled_filters_by_kind_and_status() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);
        registry.register(test_manifest("tracker", ModuleKind::Tracker), None);
        registry.register_with_status(
            test_manifest("other-vault", ModuleKind::Vault),
            None,
            ModuleStatus::Disabled,
        );

        let vaults = registry.get_enabled(ModuleKind::Vault);
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].manifest.name, "vault");

        let trackers = registry.get_enabled(ModuleKind::Tracker);
        assert_eq!(trackers.len(), 1);
    }

    #[test]
    fn set_enabled_toggles_status() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);

        registry.set_enabled("vault", false).unwrap();
        assert_eq!(registry.get("vault").unwrap().status, ModuleStatus::Disabled);

        registry.set_enabled("vault", true).unwrap();
        assert_eq!(registry.get("vault").unwrap().status, ModuleStatus::Enabled);
    }

    #[test]
    fn set_enabled_returns_error_for_unknown_module() {
        let mut registry = ModuleRegistry::new();
        assert!(registry.set_enabled("nonexistent", true).is_err());
    }

    // `Box<dyn Module>` has no Debug impl, so launch results are matched
    // rather than unwrapped.
    fn launch_err(registry: &ModuleRegistry, name: &str) -> PorticoError {
        match registry.launch(name, &serde_json::Value::Null) {
            Err(e) => e,
            Ok(_) => panic!("expected launch of '{name}' to fail"),
        }
    }

    #[test]
    fn launch_without_factory_fails() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);

        let err = launch_err(&registry, "vault").to_string();
        assert!(err.contains("no factory"));
    }

    #[test]
    fn launch_disabled_module_fails() {
        let mut registry = ModuleRegistry::new();
        registry.register_with_status(
            test_manifest("vault", ModuleKind::Vault),
            None,
            ModuleStatus::Disabled,
        );

        let err = launch_err(&registry, "vault").to_string();
        assert!(err.contains("disabled"));
    }

    #[test]
    fn launch_unknown_module_fails() {
        let registry = ModuleRegistry::new();

        let err = launch_err(&registry, "nonexistent").to_string();
        assert!(err.contains("module not found"));
    }

    #[test]
    fn list_all_returns_sorted() {
        let mut registry = ModuleRegistry::new();
        registry.register(test_manifest("vault", ModuleKind::Vault), None);
        registry.register(test_manifest("focus", ModuleKind::Focus), None);
        registry.register(test_manifest("tracker", ModuleKind::Tracker), None);

        let all = registry.list_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].manifest.name, "focus");
        assert_eq!(all[1].manifest.name, "tracker");
        assert_eq!(all[2].manifest.name, "vault");
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = ModuleRegistry::new();
        assert!(registry.is_empty());
        registry.register(test_manifest("vault", ModuleKind::Vault), None);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
