// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Portico portal crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies which portal module a manifest or registry entry belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ModuleKind {
    /// Encrypted credential vault.
    Vault,
    /// Time and invoice tracker.
    Tracker,
    /// Reseller inventory lister.
    Lister,
    /// Gamified task manager.
    Focus,
    /// Property-shopping tracker.
    Property,
}
