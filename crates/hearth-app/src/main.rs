//! Hearth application binary - composition root.
//!
//! Ties together all Hearth crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Open the SQLite store
//! 3. Dispatch the requested subcommand (direct CRUD, assistant
//!    prompt/transcription, or snapshot export)

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use hearth_assistant::AssistantPipeline;
use hearth_core::config::HearthConfig;
use hearth_core::forms::{AccountForm, AccountTypeForm, PersonForm};
use hearth_export::ExportService;
use hearth_storage::{AccountRepository, AccountTypeRepository, Database, PersonRepository};

use cli::{CliArgs, Command};

/// Expand ~ to home directory in a path string.
fn resolve_dir(dir: &str) -> PathBuf {
    if dir.starts_with("~/") || dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&dir[2..])
    } else {
        PathBuf::from(dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = HearthConfig::load_or_default(&config_file);

    // Tracing. RUST_LOG wins, then --log-level, then the config file.
    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Hearth v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = match args.data_dir {
        Some(ref p) => p.clone(),
        None => resolve_dir(&config.general.data_dir),
    };
    std::fs::create_dir_all(&data_dir)?;

    let db_path = data_dir.join("hearth.db");
    let db = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    match args.command {
        Command::Chat { text } => {
            let pipeline = AssistantPipeline::new(config.openai.clone(), db);
            let outcome = pipeline.process_prompt(&text).await?;
            if outcome.records_created > 0 {
                println!("{} ({} record(s) created)", outcome.message, outcome.records_created);
            } else {
                println!("{}", outcome.message);
            }
        }
        Command::Transcribe { file, raw } => {
            let audio = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "audio.wav".to_string());

            let pipeline = AssistantPipeline::new(config.openai.clone(), db);
            let transcript = pipeline.transcribe(audio, &file_name).await?;
            println!("Transcript: {}", transcript);

            if !raw && !transcript.trim().is_empty() {
                let outcome = pipeline.process_prompt(&transcript).await?;
                println!("{}", outcome.message);
            }
        }
        Command::AddPerson { name, phone, email } => {
            let mut person = PersonForm {
                name,
                phone,
                email,
                photo_base64: None,
            }
            .build()?;
            let id = PersonRepository::new(db).save(&mut person)?;
            println!("Added person {} (id {})", person.name, id);
        }
        Command::AddType { name, description } => {
            let mut account_type = AccountTypeForm { name, description }.build()?;
            let id = AccountTypeRepository::new(db).save(&mut account_type)?;
            println!("Added account type {} (id {})", account_type.name, id);
        }
        Command::AddAccount {
            title,
            amount,
            credit,
            notes,
            person_id,
            account_type_id,
        } => {
            let mut account = AccountForm {
                title,
                amount_text: amount,
                is_credit: credit,
                notes,
                person_id,
                account_type_id,
            }
            .build()?;
            let id = AccountRepository::new(db).save(&mut account)?;
            println!("Added account {} (id {})", account.title, id);
        }
        Command::List => {
            let people = PersonRepository::new(db.clone()).list()?;
            let types = AccountTypeRepository::new(db.clone()).list()?;
            let accounts = AccountRepository::new(db).list()?;

            println!("People ({}):", people.len());
            for p in &people {
                println!("  [{}] {}", p.id, p.name);
            }
            println!("Account types ({}):", types.len());
            for t in &types {
                println!("  [{}] {}", t.id, t.name);
            }
            println!("Accounts ({}):", accounts.len());
            for a in &accounts {
                let polarity = if a.is_credit { "credit" } else { "debit" };
                let owner = a
                    .person
                    .as_ref()
                    .map(|p| p.name.as_str())
                    .unwrap_or("unassigned");
                println!(
                    "  [{}] {} {:.2} {} ({})",
                    a.id, a.title, a.amount, polarity, owner
                );
            }
        }
        Command::DeletePerson { id, yes } => {
            let people = PersonRepository::new(db);
            let linked = people.account_count(id)?;
            if !yes {
                println!(
                    "Person {} has {} linked account(s); they will be kept but unlinked. \
                     Re-run with --yes to confirm.",
                    id, linked
                );
                return Ok(());
            }
            people.delete(id)?;
            println!("Deleted person {} ({} account(s) unlinked)", id, linked);
        }
        Command::DeleteType { id, yes } => {
            let types = AccountTypeRepository::new(db);
            let linked = types.account_count(id)?;
            if !yes {
                println!(
                    "Account type {} is referenced by {} account(s). \
                     Re-run with --yes to confirm.",
                    id, linked
                );
                return Ok(());
            }
            types.delete(id)?;
            println!("Deleted account type {}", id);
        }
        Command::DeleteAccount { id, yes } => {
            if !yes {
                println!("Re-run with --yes to confirm deleting account {}.", id);
                return Ok(());
            }
            AccountRepository::new(db).delete(id)?;
            println!("Deleted account {}", id);
        }
        Command::Export { person_id, all } => {
            let export_dir = resolve_dir(&config.general.export_dir);
            let service = ExportService::new(db, export_dir);
            match (person_id, all) {
                (Some(id), _) => {
                    let path = service.export_person(id)?;
                    println!("Exported {}", path.display());
                }
                (None, true) => {
                    let paths = service.export_all()?;
                    for path in &paths {
                        println!("Exported {}", path.display());
                    }
                    println!("{} snapshot(s) written", paths.len());
                }
                (None, false) => {
                    println!("Specify --person <id> or --all.");
                }
            }
        }
    }

    Ok(())
}
