// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted vault envelope: `{ "salt": b64, "iv": b64, "ciphertext": b64 }`.
//!
//! Sealing generates a fresh salt AND a fresh nonce and derives a new key
//! on every save; no prior randomness is ever reused. Opening collapses
//! every failure mode -- malformed JSON, missing fields, bad base64, wrong
//! field lengths, AEAD authentication failure, bad plaintext -- into the
//! one generic unlock error so nothing leaks about which check rejected
//! the input.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use portico_core::PorticoError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::{self, NONCE_LEN};
use crate::kdf::{self, SALT_LEN};
use crate::migration::{self, MigrationReport};
use crate::model::Credential;

/// The on-disk vault container. All three fields are base64.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultContainer {
    /// KDF salt, stored unencrypted.
    pub salt: String,
    /// AEAD nonce, stored unencrypted, never reused with the same key.
    pub iv: String,
    /// Authenticated-encrypted serialized credential list (tag appended).
    pub ciphertext: String,
}

impl VaultContainer {
    /// Serialize the container as the pretty-printed JSON the vault file
    /// format uses.
    pub fn to_json(&self) -> Result<String, PorticoError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PorticoError::Vault(format!("failed to serialize vault container: {e}")))
    }
}

/// Encrypt a credential list into a fresh container.
///
/// Generates a new salt and nonce and derives a new key from the current
/// passphrase; the container written by the previous save shares none of
/// this randomness.
pub fn seal_records(
    passphrase: &SecretString,
    records: &[Credential],
    kdf_iterations: u32,
) -> Result<VaultContainer, PorticoError> {
    let salt = kdf::generate_salt()?;
    let key = kdf::derive_key(passphrase.expose_secret().as_bytes(), &salt, kdf_iterations)?;

    let plaintext = serde_json::to_vec(records)
        .map_err(|e| PorticoError::Vault(format!("failed to serialize credential list: {e}")))?;
    let (ciphertext, nonce) = crypto::seal(&key, &plaintext)?;

    debug!(records = records.len(), "sealed vault container");
    Ok(VaultContainer {
        salt: BASE64.encode(salt),
        iv: BASE64.encode(nonce),
        ciphertext: BASE64.encode(ciphertext),
    })
}

/// Decrypt a container file back into a credential list.
///
/// Runs the legacy-email schema migration on the decrypted records before
/// typed deserialization. Any failure is reported as
/// [`PorticoError::unlock_failed`]; the caller learns nothing more.
pub fn open_records(
    passphrase: &SecretString,
    container_json: &str,
    kdf_iterations: u32,
) -> Result<(Vec<Credential>, MigrationReport), PorticoError> {
    let container: VaultContainer =
        serde_json::from_str(container_json).map_err(|_| PorticoError::unlock_failed())?;

    let salt: [u8; SALT_LEN] = BASE64
        .decode(&container.salt)
        .map_err(|_| PorticoError::unlock_failed())?
        .try_into()
        .map_err(|_| PorticoError::unlock_failed())?;
    let nonce: [u8; NONCE_LEN] = BASE64
        .decode(&container.iv)
        .map_err(|_| PorticoError::unlock_failed())?
        .try_into()
        .map_err(|_| PorticoError::unlock_failed())?;
    let ciphertext = BASE64
        .decode(&container.ciphertext)
        .map_err(|_| PorticoError::unlock_failed())?;

    let key = kdf::derive_key(passphrase.expose_secret().as_bytes(), &salt, kdf_iterations)?;
    let plaintext =
        crypto::open(&key, &nonce, &ciphertext).map_err(|_| PorticoError::unlock_failed())?;

    let raw: Vec<serde_json::Value> =
        serde_json::from_slice(&plaintext).map_err(|_| PorticoError::unlock_failed())?;
    let (migrated, report) = migration::migrate_records(raw);

    let records = migrated
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Credential>, _>>()
        .map_err(|_| PorticoError::unlock_failed())?;

    debug!(records = records.len(), migrated = report.migrated, "opened vault container");
    Ok((records, report))
}
