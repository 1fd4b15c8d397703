// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential record held in the decrypted, in-memory list.
//!
//! Records have no identity beyond their position in the list: edits and
//! deletes address the current index, and every mutation re-renders the
//! list so stale indices never survive a cycle.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One credential in the vault.
///
/// The password exists in plaintext only here, inside the unlocked
/// session; the whole record is zeroed when dropped. Debug output omits
/// the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    /// Display label, e.g. "example.com".
    pub website: String,

    /// Optional account identifier.
    #[serde(default)]
    pub username: Option<String>,

    /// Associated email addresses, zero or more, in entry order.
    #[serde(default)]
    pub emails: Vec<String>,

    /// The secret itself.
    #[serde(default)]
    pub password: String,

    /// Free-text annotation.
    #[serde(default)]
    pub note: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("website", &self.website)
            .field("username", &self.username)
            .field("emails", &self.emails)
            .field("password", &"[REDACTED]")
            .field("note", &self.note)
            .finish()
    }
}

impl Credential {
    /// Case-insensitive search across website, username, emails, and note.
    ///
    /// The password is deliberately not searchable.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        let haystack = format!(
            "{} {} {} {}",
            self.website,
            self.username.as_deref().unwrap_or_default(),
            self.emails.join(" "),
            self.note
        )
        .to_lowercase();
        haystack.contains(&term)
    }
}
