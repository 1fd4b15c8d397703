// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a passphrase.
//!
//! Derives a 32-byte AES key from the master passphrase and a random
//! 16-byte salt. Derivation is deterministic for the same passphrase and
//! salt, which is why the salt is persisted in the container and
//! regenerated on every save. A wrong passphrase is NOT detectable here:
//! derivation always succeeds, and the mistake only surfaces when the
//! resulting key fails to authenticate the ciphertext.

use std::num::NonZeroU32;

use portico_core::PorticoError;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Derive a 32-byte key from a passphrase using PBKDF2-HMAC-SHA256.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory
/// zeroing on drop.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_LEN]>, PorticoError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| PorticoError::Vault("KDF iteration count must be non-zero".to_string()))?;

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        passphrase,
        output.as_mut(),
    );

    Ok(output)
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], PorticoError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt)
        .map_err(|_| PorticoError::Vault("failed to generate random salt".to_string()))?;
    Ok(salt)
}
