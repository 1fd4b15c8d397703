// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portico vault` command implementation.
//!
//! Launches an interactive REPL over an unlocked vault session with a
//! colored prompt and readline history. The passphrase is taken from the
//! `PORTICO_VAULT_KEY` environment variable or an interactive prompt, and
//! the session idle timer is polled before every command.

use std::path::PathBuf;
use std::time::Instant;

use colored::Colorize;
use portico_config::model::PorticoConfig;
use portico_core::PorticoError;
use portico_vault::{
    get_vault_passphrase, get_vault_passphrase_with_confirm, password, Credential, IdleOutcome,
    Session,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{info, warn};

/// Runs the `portico vault` interactive REPL.
///
/// Opens the container file if one exists (from the command line or
/// `vault.default_file`), otherwise starts a fresh vault. Returns once the
/// session is locked or the user quits.
pub fn run_vault_shell(config: &PorticoConfig, file: Option<PathBuf>) -> Result<(), PorticoError> {
    let path = file.or_else(|| config.vault.default_file.as_ref().map(PathBuf::from));

    let mut rl = DefaultEditor::new()
        .map_err(|e| PorticoError::Internal(format!("failed to initialize readline: {e}")))?;

    let mut session = Session::new(&config.vault);
    let now = Instant::now();

    match &path {
        Some(p) if p.exists() => {
            let contents = std::fs::read_to_string(p)?;
            let passphrase = get_vault_passphrase()?;
            let report = session.unlock_with_file(passphrase, &contents, now)?;
            if report.migrated > 0 {
                println!(
                    "{}",
                    format!("migrated {} legacy record(s) to the current format", report.migrated)
                        .yellow()
                );
            }
            println!("opened vault: {}", p.display());
        }
        _ => {
            if let Some(p) = &path {
                println!("{} does not exist; starting a new vault", p.display());
            }
            let passphrase = get_vault_passphrase_with_confirm()?;
            session.unlock_new(passphrase, now)?;
        }
    }

    println!("{}", "portico vault".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());

    let mut save_path = path;
    let prompt = format!("{}> ", "vault".green());
    loop {
        let now = Instant::now();
        match session.idle_check(now) {
            IdleOutcome::Active => {}
            IdleOutcome::DeferredDirty => {
                println!(
                    "{}",
                    "idle deadline reached with unsaved changes; save or lock soon".yellow()
                );
            }
            IdleOutcome::Locked => {
                println!("{}", "vault locked after inactivity".yellow());
                break;
            }
        }

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                if session.is_dirty() {
                    println!("{}", "unsaved changes discarded".yellow());
                }
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);
        session.touch(Instant::now());

        let (command, arg) = match trimmed.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (trimmed, ""),
        };

        let result = match command {
            "help" => {
                print_help();
                Ok(())
            }
            "list" => cmd_list(&session),
            "show" => cmd_show(&session, arg),
            "reveal" => cmd_reveal(&mut session, arg, config),
            "add" => cmd_add(&mut rl, &mut session, config),
            "edit" => cmd_edit(&mut rl, &mut session, arg),
            "delete" => cmd_delete(&mut rl, &mut session, arg),
            "search" => cmd_search(&session, arg),
            "generate" => {
                println!("{}", password::generate(config.vault.generated_password_length));
                Ok(())
            }
            "export" => cmd_export(&session, arg),
            "save" => cmd_save(&mut session, &mut save_path, arg),
            "lock" | "quit" | "exit" => {
                if session.is_dirty() {
                    let answer = read_field(&mut rl, "unsaved changes; discard? [y/N] ")?;
                    if !answer.eq_ignore_ascii_case("y") {
                        continue;
                    }
                    warn!("session closed with unsaved changes");
                }
                break;
            }
            other => Err(PorticoError::Config(format!(
                "unknown command '{other}'; type 'help'"
            ))),
        };

        if let Err(e) = result {
            eprintln!("{}: {e}", "error".red());
        }
    }

    session.lock();
    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn print_help() {
    println!("  list              list credentials");
    println!("  show N            show a credential (password hidden)");
    println!("  reveal N          print a credential's password");
    println!("  add               add a credential interactively");
    println!("  edit N            edit a credential interactively");
    println!("  delete N          delete a credential");
    println!("  search TERM       search websites, usernames, emails, notes");
    println!("  generate          print a generated password");
    println!("  export FILE       export to CSV (passwords omitted)");
    println!("  save [FILE]       encrypt and write the container");
    println!("  lock / quit       close the session");
}

fn cmd_list(session: &Session) -> Result<(), PorticoError> {
    let store = session.store()?;
    if store.is_empty() {
        println!("vault is empty");
        return Ok(());
    }
    for (i, c) in store.records().iter().enumerate() {
        print_row(i, c);
    }
    Ok(())
}

fn cmd_show(session: &Session, arg: &str) -> Result<(), PorticoError> {
    let index = parse_index(arg)?;
    let store = session.store()?;
    let c = store
        .get(index)
        .ok_or_else(|| PorticoError::Vault(format!("no credential at index {index}")))?;
    println!("website:  {}", c.website);
    println!("username: {}", c.username.as_deref().unwrap_or("-"));
    println!("emails:   {}", if c.emails.is_empty() { "-".to_string() } else { c.emails.join("; ") });
    println!("password: {}", "********".dimmed());
    println!("note:     {}", if c.note.is_empty() { "-" } else { &c.note });
    Ok(())
}

fn cmd_reveal(
    session: &mut Session,
    arg: &str,
    config: &PorticoConfig,
) -> Result<(), PorticoError> {
    let index = parse_index(arg)?;
    let shown = session.reveal(index, Instant::now())?;
    println!("{shown}");
    println!(
        "{}",
        format!("(treat as hidden after {} seconds)", config.vault.reveal_hide_secs).dimmed()
    );
    Ok(())
}

fn cmd_add(
    rl: &mut DefaultEditor,
    session: &mut Session,
    config: &PorticoConfig,
) -> Result<(), PorticoError> {
    let website = read_field(rl, "website: ")?;
    if website.is_empty() {
        return Err(PorticoError::Vault("website is required".to_string()));
    }
    let username = read_field(rl, "username (optional): ")?;
    let emails = read_field(rl, "emails (separate with ';'): ")?;
    let mut pw = read_field(rl, "password (empty to generate): ")?;
    if pw.is_empty() {
        pw = password::generate(config.vault.generated_password_length);
        println!("generated: {pw}");
    }
    let note = read_field(rl, "note (optional): ")?;

    session.add(
        Credential {
            website,
            username: if username.is_empty() { None } else { Some(username) },
            emails: split_emails(&emails),
            password: pw,
            note,
        },
        Instant::now(),
    )?;
    info!("credential added");
    Ok(())
}

fn cmd_edit(
    rl: &mut DefaultEditor,
    session: &mut Session,
    arg: &str,
) -> Result<(), PorticoError> {
    let index = parse_index(arg)?;
    let current = session
        .store()?
        .get(index)
        .ok_or_else(|| PorticoError::Vault(format!("no credential at index {index}")))?
        .clone();

    println!("press enter to keep the current value");
    let website = read_field(rl, &format!("website [{}]: ", current.website))?;
    let username = read_field(
        rl,
        &format!("username [{}]: ", current.username.as_deref().unwrap_or("-")),
    )?;
    let emails = read_field(rl, &format!("emails [{}]: ", current.emails.join("; ")))?;
    let pw = read_field(rl, "password [unchanged]: ")?;
    let note = read_field(rl, &format!("note [{}]: ", current.note))?;

    let updated = Credential {
        website: if website.is_empty() { current.website.clone() } else { website },
        username: if username.is_empty() { current.username.clone() } else { Some(username) },
        emails: if emails.is_empty() { current.emails.clone() } else { split_emails(&emails) },
        password: if pw.is_empty() { current.password.clone() } else { pw },
        note: if note.is_empty() { current.note.clone() } else { note },
    };
    session.update(index, updated, Instant::now())
}

fn cmd_delete(
    rl: &mut DefaultEditor,
    session: &mut Session,
    arg: &str,
) -> Result<(), PorticoError> {
    let index = parse_index(arg)?;
    let answer = read_field(rl, &format!("delete credential {index}? [y/N] "))?;
    if !answer.eq_ignore_ascii_case("y") {
        return Ok(());
    }
    let removed = session.remove(index, Instant::now())?;
    println!("deleted {}", removed.website);
    Ok(())
}

fn cmd_search(session: &Session, term: &str) -> Result<(), PorticoError> {
    if term.is_empty() {
        return Err(PorticoError::Config("usage: search TERM".to_string()));
    }
    let store = session.store()?;
    let matches = store.search(term);
    if matches.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for (i, c) in matches {
        print_row(i, c);
    }
    Ok(())
}

fn cmd_export(session: &Session, arg: &str) -> Result<(), PorticoError> {
    if arg.is_empty() {
        return Err(PorticoError::Config("usage: export FILE".to_string()));
    }
    let csv = session.export_csv()?;
    std::fs::write(arg, csv)?;
    println!("exported to {arg} (passwords omitted)");
    Ok(())
}

fn cmd_save(
    session: &mut Session,
    save_path: &mut Option<PathBuf>,
    arg: &str,
) -> Result<(), PorticoError> {
    if !arg.is_empty() {
        *save_path = Some(PathBuf::from(arg));
    }
    let path = save_path
        .as_ref()
        .ok_or_else(|| PorticoError::Config("no file set; use: save FILE".to_string()))?;

    // Dirty stays set until the container is actually on disk.
    let json = session.seal()?;
    std::fs::write(path, json)?;
    session.mark_saved()?;
    println!("saved {}", path.display());
    Ok(())
}

fn print_row(index: usize, c: &Credential) {
    println!(
        "{:>3}  {:<28} {:<20} {}",
        index,
        c.website,
        c.username.as_deref().unwrap_or("-"),
        c.emails.join("; ")
    );
}

fn read_field(rl: &mut DefaultEditor, prompt: &str) -> Result<String, PorticoError> {
    match rl.readline(prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(String::new()),
        Err(e) => Err(PorticoError::Internal(format!("readline failed: {e}"))),
    }
}

fn parse_index(arg: &str) -> Result<usize, PorticoError> {
    arg.parse()
        .map_err(|_| PorticoError::Config(format!("expected a credential index, got '{arg}'")))
}

fn split_emails(input: &str) -> Vec<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
