// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Portico portal.

use thiserror::Error;

/// The primary error type used across all Portico crates.
#[derive(Debug, Error)]
pub enum PorticoError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Vault errors (key derivation, encryption, container parsing, session state).
    #[error("vault error: {0}")]
    Vault(String),

    /// Requested module was not found in the registry.
    #[error("module not found: {name}")]
    ModuleNotFound { name: String },

    /// Module errors (bad manifest, failed initialization).
    #[error("module error: {message}")]
    Module {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Filesystem errors (reading or writing vault/export files).
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PorticoError {
    /// The one generic unlock failure.
    ///
    /// Malformed container JSON, bad base64, missing fields, and AEAD
    /// authentication failure all collapse into this same message so the
    /// caller cannot tell which check rejected the input.
    pub fn unlock_failed() -> Self {
        PorticoError::Vault("unlock failed: wrong passphrase or corrupted vault file".to_string())
    }
}
