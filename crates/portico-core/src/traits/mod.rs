// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Portico module architecture.

pub mod module;

pub use module::Module;
