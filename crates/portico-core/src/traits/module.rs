// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that every portal module must implement.
//!
//! This is the Rust rendition of the portal's one-entry-point-per-module
//! contract: the shell injects a module and then calls its single
//! initialization function. Here the registry constructs the module once
//! and drives it through this trait.

use crate::error::PorticoError;
use crate::types::ModuleKind;

/// The base trait for all Portico portal modules.
///
/// Implementations must be safe to construct more than once within a
/// process: re-running a module must not duplicate any state it owns
/// (the registry replaces, never appends, on re-registration).
pub trait Module: Send + Sync + 'static {
    /// Returns the human-readable name of this module instance.
    fn name(&self) -> &str;

    /// Returns which portal module this is.
    fn kind(&self) -> ModuleKind;

    /// Runs the module until the user exits it.
    fn run(&self) -> Result<(), PorticoError>;
}
