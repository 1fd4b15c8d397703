// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as minimum KDF cost and non-zero timers.

use crate::diagnostic::ConfigError;
use crate::model::PorticoConfig;

/// Weak KDF settings are rejected outright; PBKDF2 below this is not a
/// meaningful work factor for an offline-attackable container.
const MIN_KDF_ITERATIONS: u32 = 1_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PorticoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.portal.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "portal.log_level `{}` is not one of: {}",
                config.portal.log_level,
                valid_levels.join(", ")
            ),
        });
    }

    if config.vault.kdf_iterations < MIN_KDF_ITERATIONS {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.kdf_iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
                config.vault.kdf_iterations
            ),
        });
    }

    if config.vault.idle_lock_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.idle_lock_secs must be greater than zero".to_string(),
        });
    }

    if config.vault.generated_password_length < 8 {
        errors.push(ConfigError::Validation {
            message: format!(
                "vault.generated_password_length must be at least 8, got {}",
                config.vault.generated_password_length
            ),
        });
    }

    if let Some(ref path) = config.vault.default_file
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "vault.default_file must not be empty when set".to_string(),
        });
    }

    for name in &config.modules.disabled {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "modules.disabled must not contain empty names".to_string(),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
