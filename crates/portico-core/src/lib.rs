// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Portico personal-productivity portal.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Portico workspace. Portal modules
//! implement the [`Module`] trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PorticoError;
pub use traits::Module;
pub use types::ModuleKind;
