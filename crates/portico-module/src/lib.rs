// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module registry, manifest parser, and built-in module catalog.
//!
//! The portal manages its compiled-in modules (Vault, Tracker, Lister,
//! Focus, Property) through a registry pattern. Each module has a manifest
//! describing its metadata, capabilities, and the config keys it reads.

pub mod catalog;
pub mod manifest;
pub mod registry;

pub use catalog::{builtin_catalog, search_catalog};
pub use manifest::{parse_module_manifest, ModuleManifest};
pub use registry::{ModuleEntry, ModuleFactory, ModuleRegistry, ModuleStatus};
