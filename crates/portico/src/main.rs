// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portico - a personal productivity portal.
//!
//! This is the binary entry point for the portal. The vault module is the
//! only one with a runnable implementation; the others appear in the
//! catalog as placeholders.

mod modules;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

/// Portico - a personal productivity portal.
#[derive(Parser, Debug)]
#[command(name = "portico", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the encrypted credential vault.
    Open {
        /// Vault container file. Falls back to `vault.default_file`, then
        /// to a fresh in-memory vault.
        file: Option<PathBuf>,
    },
    /// List the portal modules and their status.
    Modules {
        /// Filter by name or description.
        query: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match portico_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            portico_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.portal.log_level);

    let result = match cli.command {
        Some(Commands::Open { file }) => shell::run_vault_shell(&config, file),
        Some(Commands::Modules { query }) => modules::print_modules(&config, query.as_deref()),
        None => {
            println!("portico: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("portico={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
