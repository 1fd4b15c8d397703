// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The ordered in-memory credential list.
//!
//! Records are addressed by their current index. Removing index `i`
//! shifts every later record down by one, so callers must re-list after
//! any mutation; search results therefore carry the record's index in the
//! full list, not its position among the matches.

use portico_core::PorticoError;

use crate::model::Credential;

/// The decrypted working copy of the vault.
#[derive(Debug, Default, Clone)]
pub struct CredentialStore {
    records: Vec<Credential>,
}

impl CredentialStore {
    /// An empty store (the new-vault path).
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-decrypted record list.
    pub fn from_records(records: Vec<Credential>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in order.
    pub fn records(&self) -> &[Credential] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Credential> {
        self.records.get(index)
    }

    /// Append a record at the end of the list.
    pub fn add(&mut self, credential: Credential) {
        self.records.push(credential);
    }

    /// Replace the record at `index`.
    pub fn update(&mut self, index: usize, credential: Credential) -> Result<(), PorticoError> {
        let slot = self
            .records
            .get_mut(index)
            .ok_or_else(|| PorticoError::Vault(format!("no credential at index {index}")))?;
        *slot = credential;
        Ok(())
    }

    /// Remove and return the record at `index`; later records shift down.
    pub fn remove(&mut self, index: usize) -> Result<Credential, PorticoError> {
        if index >= self.records.len() {
            return Err(PorticoError::Vault(format!("no credential at index {index}")));
        }
        Ok(self.records.remove(index))
    }

    /// Case-insensitive filter preserving original indices.
    ///
    /// An empty term returns every record.
    pub fn search(&self, term: &str) -> Vec<(usize, &Credential)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, c)| c.matches(term))
            .collect()
    }
}
