//! CLI argument definitions for the Hearth application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hearth — a personal finance tracker with an LLM-backed assistant.
#[derive(Parser, Debug)]
#[command(name = "hearth", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Data directory for the SQLite database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a free-text prompt to the assistant and apply its actions.
    Chat {
        /// The prompt text, e.g. "paid 40 for groceries yesterday".
        text: String,
    },
    /// Transcribe an audio file, then run the transcript through the assistant.
    Transcribe {
        /// Path to the audio file (wav, mp3, m4a, ...).
        file: PathBuf,
        /// Only print the transcript; do not interpret it.
        #[arg(long = "raw")]
        raw: bool,
    },
    /// Add a person directly.
    AddPerson {
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Add an account type directly.
    AddType {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Add an account directly.
    AddAccount {
        title: String,
        /// Amount, must be greater than zero.
        amount: String,
        /// Record as a credit (default is debit).
        #[arg(long)]
        credit: bool,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long = "person")]
        person_id: Option<i64>,
        #[arg(long = "type")]
        account_type_id: Option<i64>,
    },
    /// List stored people, account types, and accounts.
    List,
    /// Delete a person. Their accounts are kept but unlinked.
    DeletePerson {
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Delete an account type. Accounts referencing it keep a dangling id.
    DeleteType {
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Delete an account.
    DeleteAccount {
        id: i64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Write per-person JSON snapshots to the export directory.
    Export {
        /// Export a single person by id.
        #[arg(long = "person")]
        person_id: Option<i64>,
        /// Export everyone.
        #[arg(long)]
        all: bool,
    },
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > HEARTH_CONFIG env var > ~/.hearth/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("HEARTH_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".hearth").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".hearth").join("config.toml");
    }
    PathBuf::from("config.toml")
}
