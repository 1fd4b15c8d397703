// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition via TTY prompt or the PORTICO_VAULT_KEY
//! environment variable.

use portico_core::PorticoError;
use secrecy::SecretString;

/// The environment variable name for providing the vault passphrase.
pub const VAULT_KEY_ENV_VAR: &str = "PORTICO_VAULT_KEY";

/// Non-empty passphrase from the environment, if one is set.
fn passphrase_from_env() -> Option<SecretString> {
    std::env::var(VAULT_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}

/// Read one hidden line from the TTY.
fn read_hidden(prompt: &str) -> Result<String, PorticoError> {
    eprint!("{prompt}");
    rpassword::read_password()
        .map_err(|e| PorticoError::Vault(format!("failed to read passphrase: {e}")))
}

fn no_passphrase_source() -> PorticoError {
    PorticoError::Vault(
        "No passphrase provided. Set PORTICO_VAULT_KEY environment variable or run interactively."
            .to_string(),
    )
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

/// Get the vault passphrase from the environment or an interactive TTY
/// prompt.
///
/// Priority:
/// 1. `PORTICO_VAULT_KEY` environment variable (for scripts/automation)
/// 2. Interactive TTY prompt via `rpassword`
///
/// Returns an error if neither source is available, or if the passphrase
/// is empty -- the empty check runs here, before any crypto.
pub fn get_vault_passphrase() -> Result<SecretString, PorticoError> {
    if let Some(passphrase) = passphrase_from_env() {
        return Ok(passphrase);
    }
    if !is_tty() {
        return Err(no_passphrase_source());
    }

    let passphrase = read_hidden("Master passphrase: ")?;
    if passphrase.is_empty() {
        return Err(PorticoError::Vault("master passphrase is required".to_string()));
    }
    Ok(SecretString::from(passphrase))
}

/// Get the vault passphrase with a confirmation prompt (for new vaults).
///
/// Prompts twice and verifies the passphrases match. The env var needs no
/// confirmation and wins when set.
pub fn get_vault_passphrase_with_confirm() -> Result<SecretString, PorticoError> {
    if let Some(passphrase) = passphrase_from_env() {
        return Ok(passphrase);
    }
    if !is_tty() {
        return Err(no_passphrase_source());
    }

    let pass1 = read_hidden("New master passphrase: ")?;
    let pass2 = read_hidden("Confirm master passphrase: ")?;

    if pass1 != pass2 {
        return Err(PorticoError::Vault("passphrases do not match".to_string()));
    }
    if pass1.is_empty() {
        return Err(PorticoError::Vault("master passphrase is required".to_string()));
    }
    Ok(SecretString::from(pass1))
}
