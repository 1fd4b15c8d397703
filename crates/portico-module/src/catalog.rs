// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in module catalog.
//!
//! Returns hardcoded `ModuleManifest` entries for the 5 portal modules
//! compiled into the Portico binary. No network calls are made.

use portico_core::types::ModuleKind;

use crate::manifest::ModuleManifest;

/// Returns manifests for all built-in modules.
///
/// The catalog contains 5 modules:
/// - vault (Vault)
/// - tracker (Tracker)
/// - lister (Lister)
/// - focus (Focus)
/// - property (Property)
pub fn builtin_catalog() -> Vec<ModuleManifest> {
    vec![
        ModuleManifest {
            name: "vault".to_string(),
            version: "0.1.0".to_string(),
            description: "Encrypted credential vault with CSV export".to_string(),
            kind: ModuleKind::Vault,
            author: Some("Portico Contributors".to_string()),
            capabilities: vec![
                "encryption".to_string(),
                "password_generation".to_string(),
                "csv_export".to_string(),
                "idle_lock".to_string(),
            ],
            config_keys: vec![
                "vault.kdf_iterations".to_string(),
                "vault.idle_lock_secs".to_string(),
                "vault.reveal_hide_secs".to_string(),
                "vault.generated_password_length".to_string(),
                "vault.default_file".to_string(),
            ],
        },
        ModuleManifest {
            name: "tracker".to_string(),
            version: "0.1.0".to_string(),
            description: "Billable-hours tracker with client and invoice records".to_string(),
            kind: ModuleKind::Tracker,
            author: Some("Portico Contributors".to_string()),
            capabilities: vec![
                "timer".to_string(),
                "clients".to_string(),
                "invoicing".to_string(),
            ],
            config_keys: vec![],
        },
        ModuleManifest {
            name: "lister".to_string(),
            version: "0.1.0".to_string(),
            description: "Marketplace listing drafts with image attachments".to_string(),
            kind: ModuleKind::Lister,
            author: Some("Portico Contributors".to_string()),
            capabilities: vec!["drafts".to_string(), "images".to_string()],
            config_keys: vec![],
        },
        ModuleManifest {
            name: "focus".to_string(),
            version: "0.1.0".to_string(),
            description: "Gamified task manager with focus timer".to_string(),
            kind: ModuleKind::Focus,
            author: Some("Portico Contributors".to_string()),
            capabilities: vec!["tasks".to_string(), "timer".to_string()],
            config_keys: vec![],
        },
        ModuleManifest {
            name: "property".to_string(),
            version: "0.1.0".to_string(),
            description: "Property-shopping tracker with inspection notes".to_string(),
            kind: ModuleKind::Property,
            author: Some("Portico Contributors".to_string()),
            capabilities: vec!["listings".to_string(), "filters".to_string()],
            config_keys: vec![],
        },
    ]
}

/// Search the built-in catalog by query string.
///
/// Filters entries whose name or description contains the query
/// (case-insensitive). If query is empty, returns all entries.
pub fn search_catalog(query: &str) -> Vec<ModuleManifest> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_returns_five_entries() {
        assert_eq!(builtin_catalog().len(), 5);
    }

    #[test]
    fn builtin_catalog_covers_all_module_kinds() {
        let kinds: std::collections::HashSet<ModuleKind> =
            builtin_catalog().iter().map(|m| m.kind).collect();

        assert!(kinds.contains(&ModuleKind::Vault));
        assert!(kinds.contains(&ModuleKind::Tracker));
        assert!(kinds.contains(&ModuleKind::Lister));
        assert!(kinds.contains(&ModuleKind::Focus));
        assert!(kinds.contains(&ModuleKind::Property));
    }

    #[test]
    fn search_catalog_finds_vault() {
        let results = search_catalog("vault");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "vault");
    }

    #[test]
    fn search_catalog_case_insensitive() {
        // "TRACKER" hits tracker by name and property by description
        // ("Property-shopping tracker ...").
        let results = search_catalog("TRACKER");
        let names: Vec<&str> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["tracker", "property"]);
    }

    #[test]
    fn search_catalog_by_description() {
        let results = search_catalog("credential");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "vault");
    }

    #[test]
    fn search_catalog_empty_returns_all() {
        assert_eq!(search_catalog("").len(), 5);
    }

    #[test]
    fn search_catalog_no_match() {
        assert!(search_catalog("xyz_nonexistent").is_empty());
    }
}
