// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2 + AES-256-GCM encrypted credential vault for the Portico portal.
//!
//! The persisted form is a small JSON envelope (`salt`, `iv`,
//! `ciphertext`, all base64) whose ciphertext is the authenticated
//! encryption of the serialized credential list. The key is derived from
//! the master passphrase with PBKDF2-HMAC-SHA256; salt and nonce are
//! regenerated on every save. The [`Session`] type owns the
//! Locked/Unlocked lifecycle, the dirty flag, and the idle-lock timer.

pub mod container;
pub mod crypto;
pub mod export;
pub mod kdf;
pub mod migration;
pub mod model;
pub mod password;
pub mod prompt;
pub mod session;
pub mod store;

pub use container::{VaultContainer, open_records, seal_records};
pub use migration::MigrationReport;
pub use model::Credential;
pub use prompt::{get_vault_passphrase, get_vault_passphrase_with_confirm};
pub use session::{IdleOutcome, Session};
pub use store::CredentialStore;
