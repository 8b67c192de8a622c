//! Command-line front end for action item extraction.
//!
//! # Responsibility
//! - Extract items from a file or stdin with either strategy.
//! - Optionally persist the source note and items like the HTTP API does.

use actionnote_core::db::open_db;
use actionnote_core::{
    core_version, init_logging, normalize_text_input, persist_extraction, run_extraction,
    ExtractionMethod, Settings,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "actionnote", about = "Extract action items from notes", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract action items from FILE, or stdin when omitted.
    Extract {
        file: Option<PathBuf>,
        /// Ask the configured Ollama model instead of the heuristic rules.
        #[arg(long)]
        llm: bool,
        /// Print a JSON array instead of one item per line.
        #[arg(long)]
        json: bool,
        /// Save the text as a note and store the extracted items.
        #[arg(long)]
        save: bool,
        /// Database file; defaults to DATABASE_PATH.
        #[arg(long, requires = "save")]
        db: Option<PathBuf>,
    },
    /// Print the core library version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Version => {
            println!("actionnote_core version={}", core_version());
            Ok(())
        }
        Command::Extract {
            file,
            llm,
            json,
            save,
            db,
        } => {
            let settings = Settings::from_env().context("failed to load settings")?;
            if let Err(err) = init_logging(&settings.log_level, &settings.log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
            let text = read_input(file.as_ref())?;
            let method = ExtractionMethod::from_use_llm(llm);
            let items = run_extraction(method, &settings.ollama_backend(), &text);

            if save {
                let text = normalize_text_input("text", &text)?;
                let path = db.unwrap_or_else(|| settings.database_path.clone());
                let mut conn = open_db(&path)
                    .with_context(|| format!("failed to open database {}", path.display()))?;
                let record = persist_extraction(&mut conn, &text, true, &items, method)?;
                if let Some(note_id) = record.note_id {
                    eprintln!("saved note {note_id} with {} items", record.items.len());
                }
            }

            print_items(&items, json)
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_items(items: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{item}");
        }
    }
    Ok(())
}
