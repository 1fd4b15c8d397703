// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end walk through the vault lifecycle: new vault, add, save to a
//! file, reopen, fail with the wrong passphrase.

use std::time::Instant;

use portico_config::model::VaultConfig;
use portico_vault::{Credential, Session};
use secrecy::SecretString;

fn test_config() -> VaultConfig {
    VaultConfig {
        kdf_iterations: 1_000, // low cost for fast tests
        ..VaultConfig::default()
    }
}

fn passphrase(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

#[test]
fn full_vault_lifecycle() {
    let now = Instant::now();
    let dir = tempfile::tempdir().unwrap();
    let vault_path = dir.path().join("my-secure-vault.json");

    // Unlock with no file: empty list, unlocked, clean.
    let mut session = Session::new(&test_config());
    session.unlock_new(passphrase("test123"), now).unwrap();
    assert!(session.is_unlocked());
    assert!(session.store().unwrap().is_empty());
    assert!(!session.is_dirty());

    // Add one record: list length 1, dirty.
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
    assert_eq!(session.store().unwrap().len(), 1);
    assert!(session.is_dirty());

    // Save: a three-field JSON container lands on disk, dirty clears.
    let json = session.seal().unwrap();
    std::fs::write(&vault_path, &json).unwrap();
    session.mark_saved().unwrap();
    assert!(!session.is_dirty());

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&vault_path).unwrap()).unwrap();
    assert_eq!(on_disk.as_object().unwrap().len(), 3);

    // Save-and-lock ends the session.
    session.lock();
    assert!(!session.is_unlocked());

    // Reopen with the right passphrase: identical list.
    let contents = std::fs::read_to_string(&vault_path).unwrap();
    let mut reopened = Session::new(&test_config());
    reopened.unlock_with_file(passphrase("test123"), &contents, now).unwrap();
    let store = reopened.store().unwrap();
    assert_eq!(store.len(), 1);
    let record = store.get(0).unwrap();
    assert_eq!(record.website, "example.com");
    assert_eq!(record.username.as_deref(), Some("bob"));
    assert_eq!(record.emails, vec!["bob@x.com".to_string()]);
    assert_eq!(record.password, "abc");

    // Reopen with the wrong passphrase: unlock fails, still locked.
    let mut failed = Session::new(&test_config());
    let err = failed.unlock_with_file(passphrase("wrong"), &contents, now).unwrap_err();
    assert!(err.to_string().contains("unlock failed"));
    assert!(!failed.is_unlocked());
}

#[test]
fn two_saves_never_share_salt_or_nonce() {
    let now = Instant::now();
    let mut session = Session::new(&test_config());
    session.unlock_new(passphrase("test123"), now).unwrap();
    session
        .add(
            Credential {
                website: "a.com".to_string(),
                username: None,
                emails: Vec::new(),
                password: "pw".to_string(),
                note: String::new(),
            },
            now,
        )
        .unwrap();

    let first: serde_json::Value = serde_json::from_str(&session.seal().unwrap()).unwrap();
    let second: serde_json::Value = serde_json::from_str(&session.seal().unwrap()).unwrap();

    assert_ne!(first["salt"], second["salt"]);
    assert_ne!(first["iv"], second["iv"]);
}

#[test]
fn csv_export_of_unlocked_session_omits_passwords() {
    let now = Instant::now();
    let mut session = Session::new(&test_config());
    session.unlock_new(passphrase("test123"), now).unwrap();
    session
        .add(
            Credential {
                website: "example.com".to_string(),
                username: Some("bob".to_string()),
                emails: vec!["bob@x.com".to_string(), "bob@y.com".to_string()],
                password: "super-secret-pw".to_string(),
                note: "main".to_string(),
            },
            now,
        )
        .unwrap();

    let csv = session.export_csv().unwrap();
    assert!(csv.starts_with("Website,Username,Emails,Note\n"));
    assert!(csv.contains(r#""bob@x.com; bob@y.com""#));
    assert!(!csv.contains("super-secret-pw"));
}
