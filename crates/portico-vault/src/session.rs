// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault session state machine: `Locked` -> `Unlocked` -> `Locked`.
//!
//! While locked, no key material or plaintext exists in memory; the only
//! accepted inputs are a passphrase and an optional container file. A
//! successful decrypt (or the explicit new-vault path) moves to
//! `Unlocked`, where the credential list is mutable and every mutation
//! sets the dirty flag. Locking drops the passphrase and the plaintext
//! list, both of which zero themselves.
//!
//! Idle handling is pull-based: the caller reports activity via
//! [`Session::touch`] and polls [`Session::idle_check`]. A clean session
//! past the deadline force-locks; a dirty one is deferred and the caller
//! is told to warn the user, never silently discarded.

use std::time::{Duration, Instant};

use portico_config::model::VaultConfig;
use portico_core::PorticoError;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::container;
use crate::export;
use crate::migration::MigrationReport;
use crate::model::Credential;
use crate::store::CredentialStore;

/// What [`Session::idle_check`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleOutcome {
    /// Below the idle deadline (or already locked); nothing to do.
    Active,
    /// Past the deadline with unsaved changes: the deadline was pushed
    /// back and the user should be warned.
    DeferredDirty,
    /// Past the deadline with a clean session: the vault just locked.
    Locked,
}

/// The unlocked working state. Exists only between unlock and lock.
struct Unlocked {
    /// Needed again at save time: each save derives a new key from the
    /// current passphrase and a fresh salt.
    passphrase: SecretString,
    store: CredentialStore,
    dirty: bool,
    last_activity: Instant,
    /// Which record's password is currently shown, and until when.
    reveal: Option<(usize, Instant)>,
}

enum State {
    Locked,
    Unlocked(Box<Unlocked>),
}

/// A vault session. Starts locked.
pub struct Session {
    state: State,
    kdf_iterations: u32,
    idle_timeout: Duration,
    reveal_timeout: Duration,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &match self.state {
                State::Locked => "Locked",
                State::Unlocked(_) => "Unlocked",
            })
            .finish()
    }
}

impl Session {
    /// Create a locked session with the configured timers and KDF cost.
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            state: State::Locked,
            kdf_iterations: config.kdf_iterations,
            idle_timeout: Duration::from_secs(config.idle_lock_secs),
            reveal_timeout: Duration::from_secs(config.reveal_hide_secs),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self.state, State::Unlocked(_))
    }

    /// Start a new, empty vault (the unlock-without-file path).
    ///
    /// An empty passphrase is rejected before any cryptography runs.
    pub fn unlock_new(&mut self, passphrase: SecretString, now: Instant) -> Result<(), PorticoError> {
        self.check_can_unlock(&passphrase)?;
        self.state = State::Unlocked(Box::new(Unlocked {
            passphrase,
            store: CredentialStore::new(),
            dirty: false,
            last_activity: now,
            reveal: None,
        }));
        info!("new vault session started");
        Ok(())
    }

    /// Unlock an existing container file.
    ///
    /// On any failure the session stays locked and no partial state is
    /// applied; the error is the same for a wrong passphrase and a
    /// corrupted file.
    pub fn unlock_with_file(
        &mut self,
        passphrase: SecretString,
        container_json: &str,
        now: Instant,
    ) -> Result<MigrationReport, PorticoError> {
        self.check_can_unlock(&passphrase)?;
        let (records, report) =
            container::open_records(&passphrase, container_json, self.kdf_iterations)?;
        self.state = State::Unlocked(Box::new(Unlocked {
            passphrase,
            store: CredentialStore::from_records(records),
            dirty: false,
            last_activity: now,
            reveal: None,
        }));
        info!("vault unlocked");
        Ok(report)
    }

    fn check_can_unlock(&self, passphrase: &SecretString) -> Result<(), PorticoError> {
        if self.is_unlocked() {
            return Err(PorticoError::Vault("session is already unlocked".to_string()));
        }
        if passphrase.expose_secret().is_empty() {
            return Err(PorticoError::Vault("master passphrase is required".to_string()));
        }
        Ok(())
    }

    /// The decrypted credential list. Errors while locked.
    pub fn store(&self) -> Result<&CredentialStore, PorticoError> {
        match &self.state {
            State::Unlocked(u) => Ok(&u.store),
            State::Locked => Err(locked()),
        }
    }

    /// Unsaved changes exist.
    pub fn is_dirty(&self) -> bool {
        matches!(&self.state, State::Unlocked(u) if u.dirty)
    }

    /// Append a record; marks the session dirty.
    pub fn add(&mut self, credential: Credential, now: Instant) -> Result<(), PorticoError> {
        let unlocked = self.unlocked_mut()?;
        unlocked.store.add(credential);
        unlocked.dirty = true;
        unlocked.last_activity = now;
        unlocked.reveal = None;
        Ok(())
    }

    /// Replace the record at `index`; marks the session dirty.
    pub fn update(
        &mut self,
        index: usize,
        credential: Credential,
        now: Instant,
    ) -> Result<(), PorticoError> {
        let unlocked = self.unlocked_mut()?;
        unlocked.store.update(index, credential)?;
        unlocked.dirty = true;
        unlocked.last_activity = now;
        unlocked.reveal = None;
        Ok(())
    }

    /// Remove the record at `index`; marks the session dirty. Later
    /// records shift down by one.
    pub fn remove(&mut self, index: usize, now: Instant) -> Result<Credential, PorticoError> {
        let unlocked = self.unlocked_mut()?;
        let removed = unlocked.store.remove(index)?;
        unlocked.dirty = true;
        unlocked.last_activity = now;
        unlocked.reveal = None;
        Ok(removed)
    }

    /// Show the password at `index` until the reveal timer expires.
    pub fn reveal(&mut self, index: usize, now: Instant) -> Result<String, PorticoError> {
        let reveal_timeout = self.reveal_timeout;
        let unlocked = self.unlocked_mut()?;
        let credential = unlocked
            .store
            .get(index)
            .ok_or_else(|| PorticoError::Vault(format!("no credential at index {index}")))?;
        let password = credential.password.clone();
        unlocked.reveal = Some((index, now + reveal_timeout));
        unlocked.last_activity = now;
        Ok(password)
    }

    /// Which record is currently revealed, expiring it if the auto-hide
    /// timer has run out.
    pub fn current_reveal(&mut self, now: Instant) -> Option<usize> {
        let State::Unlocked(u) = &mut self.state else {
            return None;
        };
        match u.reveal {
            Some((index, expires)) if now < expires => Some(index),
            Some(_) => {
                u.reveal = None;
                None
            }
            None => None,
        }
    }

    /// Hide any revealed password immediately.
    pub fn hide(&mut self) {
        if let State::Unlocked(u) = &mut self.state {
            u.reveal = None;
        }
    }

    /// Record user activity, resetting the idle deadline.
    pub fn touch(&mut self, now: Instant) {
        if let State::Unlocked(u) = &mut self.state {
            u.last_activity = now;
        }
    }

    /// Poll the idle timer.
    ///
    /// Past the deadline, a dirty session gets its deadline pushed back
    /// (the caller warns the user); a clean one force-locks, discarding
    /// key material and plaintext exactly like navigating away.
    pub fn idle_check(&mut self, now: Instant) -> IdleOutcome {
        let State::Unlocked(u) = &mut self.state else {
            return IdleOutcome::Active;
        };
        if now.duration_since(u.last_activity) < self.idle_timeout {
            return IdleOutcome::Active;
        }
        if u.dirty {
            u.last_activity = now;
            debug!("idle deadline reached with unsaved changes; deferring lock");
            return IdleOutcome::DeferredDirty;
        }
        self.lock();
        IdleOutcome::Locked
    }

    /// Encrypt the current list into a fresh container (new salt, new
    /// nonce, new key).
    ///
    /// Does NOT clear the dirty flag: call [`Session::mark_saved`] once
    /// the container has actually been persisted, so a failed write keeps
    /// the unsaved-changes warning alive.
    pub fn seal(&self) -> Result<String, PorticoError> {
        match &self.state {
            State::Unlocked(u) => {
                let container =
                    container::seal_records(&u.passphrase, u.store.records(), self.kdf_iterations)?;
                container.to_json()
            }
            State::Locked => Err(locked()),
        }
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_saved(&mut self) -> Result<(), PorticoError> {
        let unlocked = self.unlocked_mut()?;
        unlocked.dirty = false;
        Ok(())
    }

    /// Export the list as plaintext CSV (passwords omitted).
    pub fn export_csv(&self) -> Result<String, PorticoError> {
        match &self.state {
            State::Unlocked(u) => export::to_csv(u.store.records()),
            State::Locked => Err(locked()),
        }
    }

    /// Drop key material and plaintext and return to `Locked`.
    pub fn lock(&mut self) {
        if self.is_unlocked() {
            info!("vault locked");
        }
        // SecretString and the zeroizing credential records clean up on drop.
        self.state = State::Locked;
    }

    fn unlocked_mut(&mut self) -> Result<&mut Unlocked, PorticoError> {
        match &mut self.state {
            State::Unlocked(u) => Ok(u),
            State::Locked => Err(locked()),
        }
    }
}

fn locked() -> PorticoError {
    PorticoError::Vault("vault is locked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> VaultConfig {
        VaultConfig {
            kdf_iterations: 1_000, // low cost for fast tests
            idle_lock_secs: 600,
            reveal_hide_secs: 5,
            ..VaultConfig::default()
        }
    }

    fn passphrase(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn credential(website: &str, password: &str) -> Credential {
        Credential {
            website: website.to_string(),
            username: None,
            emails: Vec::new(),
            password: password.to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn starts_locked_and_rejects_access() {
        let session = Session::new(&test_config());
        assert!(!session.is_unlocked());
        assert!(session.store().is_err());
        assert!(session.seal().is_err());
        assert!(session.export_csv().is_err());
    }

    #[test]
    fn empty_passphrase_rejected_before_any_crypto() {
        let mut session = Session::new(&test_config());
        let err = session.unlock_new(passphrase(""), Instant::now()).unwrap_err();
        assert!(err.to_string().contains("passphrase is required"));
        assert!(!session.is_unlocked());
    }

    #[test]
    fn unlock_new_starts_empty_and_clean() {
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), Instant::now()).unwrap();

        assert!(session.is_unlocked());
        assert!(session.store().unwrap().is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn mutations_set_dirty_flag() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();

        session.add(credential("a.com", "pw"), now).unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.store().unwrap().len(), 1);

        session.mark_saved().unwrap();
        assert!(!session.is_dirty());

        session.update(0, credential("b.com", "pw2"), now).unwrap();
        assert!(session.is_dirty());

        session.mark_saved().unwrap();
        session.remove(0, now).unwrap();
        assert!(session.is_dirty());
    }

    #[test]
    fn seal_alone_does_not_clear_dirty() {
        // A failed write after seal must keep the unsaved-changes warning.
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session.add(credential("a.com", "pw"), now).unwrap();

        let _json = session.seal().unwrap();
        assert!(session.is_dirty());

        session.mark_saved().unwrap();
        assert!(!session.is_dirty());
    }

    #[test]
    fn save_reload_cycle_reconstructs_list() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session
            .add(
                Credential {
                    website: "example.com".to_string(),
                    username: Some("bob".to_string()),
                    emails: vec!["bob@x.com".to_string()],
                    password: "abc".to_string(),
                    note: String::new(),
                },
                now,
            )
            .unwrap();

        let json = session.seal().unwrap();
        session.mark_saved().unwrap();
        session.lock();
        assert!(!session.is_unlocked());

        // Correct passphrase reconstructs the list identically.
        session.unlock_with_file(passphrase("test123"), &json, now).unwrap();
        let store = session.store().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().website, "example.com");
        assert_eq!(store.get(0).unwrap().password, "abc");
    }

    #[test]
    fn wrong_passphrase_stays_locked() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session.add(credential("a.com", "pw"), now).unwrap();
        let json = session.seal().unwrap();
        session.lock();

        let err = session.unlock_with_file(passphrase("wrong"), &json, now).unwrap_err();
        assert!(err.to_string().contains("unlock failed"));
        assert!(!session.is_unlocked());
        assert!(session.store().is_err());
    }

    #[test]
    fn idle_check_locks_clean_session() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();

        // Under the deadline: nothing happens.
        assert_eq!(session.idle_check(now + Duration::from_secs(599)), IdleOutcome::Active);
        assert!(session.is_unlocked());

        // Past the deadline and clean: force-lock.
        assert_eq!(session.idle_check(now + Duration::from_secs(601)), IdleOutcome::Locked);
        assert!(!session.is_unlocked());
    }

    #[test]
    fn idle_check_defers_dirty_session() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session.add(credential("a.com", "pw"), now).unwrap();

        let late = now + Duration::from_secs(601);
        assert_eq!(session.idle_check(late), IdleOutcome::DeferredDirty);
        // Still unlocked, and the deadline was pushed back from `late`.
        assert!(session.is_unlocked());
        assert_eq!(session.idle_check(late + Duration::from_secs(1)), IdleOutcome::Active);

        // Once saved, the next expiry locks.
        session.mark_saved().unwrap();
        assert_eq!(
            session.idle_check(late + Duration::from_secs(601)),
            IdleOutcome::Locked
        );
    }

    #[test]
    fn touch_resets_idle_deadline() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();

        session.touch(now + Duration::from_secs(500));
        assert_eq!(
            session.idle_check(now + Duration::from_secs(700)),
            IdleOutcome::Active
        );
    }

    #[test]
    fn reveal_expires_after_timeout() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session.add(credential("a.com", "hunter2"), now).unwrap();

        let shown = session.reveal(0, now).unwrap();
        assert_eq!(shown, "hunter2");
        assert_eq!(session.current_reveal(now + Duration::from_secs(4)), Some(0));
        assert_eq!(session.current_reveal(now + Duration::from_secs(5)), None);
    }

    #[test]
    fn mutation_clears_reveal() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        session.add(credential("a.com", "pw1"), now).unwrap();
        session.add(credential("b.com", "pw2"), now).unwrap();

        session.reveal(1, now).unwrap();
        session.remove(0, now).unwrap();
        // Index 1 now names a different record; the reveal is gone.
        assert_eq!(session.current_reveal(now), None);
    }

    #[test]
    fn double_unlock_rejected() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("test123"), now).unwrap();
        let err = session.unlock_new(passphrase("other"), now).unwrap_err();
        assert!(err.to_string().contains("already unlocked"));
    }

    #[test]
    fn debug_never_prints_secrets() {
        let now = Instant::now();
        let mut session = Session::new(&test_config());
        session.unlock_new(passphrase("top-secret-pass"), now).unwrap();
        session.add(credential("a.com", "hunter2"), now).unwrap();

        let debug = format!("{session:?}");
        assert!(debug.contains("Unlocked"));
        assert!(!debug.contains("top-secret-pass"));
        assert!(!debug.contains("hunter2"));
    }
}
