//! `moxie` command line entry point.
//!
//! # Responsibility
//! - Expose schema setup, note queries, note creation and the bootstrap run.
//! - Catch every failure at the top level, log it and exit non-zero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use moxie_core::config::DEFAULT_DB_FILE;
use moxie_core::db::{self, migrations, schema};
use moxie_core::{ConnectionConfig, NoteId, NoteService, SqliteNoteRepository};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(name = "moxie", author, version, about = "Store and query moxie notes", long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Path of the SQLite database file
    #[clap(long, global = true, env = "MOXIE_DB_PATH", default_value = DEFAULT_DB_FILE)]
    db_path: PathBuf,

    /// Log level: trace|debug|info|warn|error (defaults by build mode)
    #[clap(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logs go to stderr when unset
    #[clap(long, global = true)]
    log_dir: Option<String>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    UpgradeSchema,

    /// Create the current schema directly, without migration history
    CreateSchema,

    /// Print all notes as a JSON array, ordered by id
    FindAll,

    /// Print one note as JSON; exits with status 1 when it does not exist
    FindById {
        /// Note id
        id: i64,
    },

    /// Create a note from JSON such as {"title": "...", "content": "..."}
    Create {
        /// JSON content of the note; read from stdin when omitted
        #[clap(long)]
        json_content: Option<String>,
    },

    /// Save one sample note, then load and log every note
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| moxie_core::default_log_level().to_string());
    if let Err(err) = moxie_core::init_logging(&level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        moxie_core::core_version()
    );

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    };

    moxie_core::flush_logging();
    code
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = ConnectionConfig::file(&cli.db_path);

    match &cli.command {
        Commands::UpgradeSchema => {
            let mut conn = db::open(&config)?;
            let version = migrations::upgrade_schema(&mut conn)?;
            println!(
                "Schema upgraded for {} (version {version})",
                config.location
            );
        }
        Commands::CreateSchema => {
            let conn = db::open(&config)?;
            schema::create_schema(&conn)?;
            println!("Schema created for {}", config.location);
        }
        Commands::FindAll => {
            let conn = db::open(&config)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let notes = service.list_notes()?;
            println!("{}", serde_json::to_string(&notes)?);
        }
        Commands::FindById { id } => {
            let conn = db::open(&config)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            match service.get_note(NoteId::new(*id))? {
                Some(note) => println!("{}", serde_json::to_string(&note)?),
                None => {
                    info!(
                        "event=note_find module=cli status=ok found=false note_id={}",
                        id
                    );
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Create { json_content } => {
            let json = match json_content {
                Some(json) => json.clone(),
                None => read_stdin()?,
            };
            let conn = db::open(&config)?;
            let service = NoteService::new(SqliteNoteRepository::try_new(&conn)?);
            let note = service.create_note_from_json(&json)?;
            println!("{}", serde_json::to_string(&note)?);
        }
        Commands::Demo => {
            println!("Inserting a new note into the database...");
            let report = moxie_core::run_bootstrap(&config)?;
            println!("Saved a new note with id: {}", report.saved.id);
            println!("Loading notes from the database...");
            println!("Loaded notes: {}", serde_json::to_string(&report.loaded)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read note json from stdin")?;
    Ok(input)
}
