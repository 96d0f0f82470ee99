//! Insert-then-select bootstrap run.
//!
//! # Responsibility
//! - Open a connection, save one literal note, load every note back.
//! - Log the assigned id and the full loaded set.
//!
//! # Invariants
//! - Failures are logged and returned, never retried.
//! - The schema must already exist; this run does not create it.

use crate::config::ConnectionConfig;
use crate::db::{self, DbError};
use crate::model::note::Note;
use crate::repo::note_repo::SqliteNoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const BOOTSTRAP_NOTE_TITLE: &str = "First note title";
pub const BOOTSTRAP_NOTE_CONTENT: &str = "and some content";

/// Outcome of a successful bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub saved: Note,
    pub loaded: Vec<Note>,
}

#[derive(Debug)]
pub enum BootstrapError {
    Connect(DbError),
    Note(NoteServiceError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(err) => write!(f, "connection failed: {err}"),
            Self::Note(err) => write!(f, "query failed: {err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connect(err) => Some(err),
            Self::Note(err) => Some(err),
        }
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Connect(value)
    }
}

impl From<NoteServiceError> for BootstrapError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

/// Opens the database from `config` and runs the bootstrap sequence on it.
pub fn run_bootstrap(config: &ConnectionConfig) -> Result<BootstrapReport, BootstrapError> {
    let result = db::open(config)
        .map_err(BootstrapError::from)
        .and_then(|conn| run_bootstrap_on(&conn));

    if let Err(err) = &result {
        error!(
            "event=bootstrap module=bootstrap status=error location={} error={}",
            config.location, err
        );
    }
    result
}

/// Runs the bootstrap sequence on an already open connection.
pub fn run_bootstrap_on(conn: &Connection) -> Result<BootstrapReport, BootstrapError> {
    let repo = SqliteNoteRepository::try_new(conn).map_err(NoteServiceError::from)?;
    let service = NoteService::new(repo);

    info!("event=bootstrap module=bootstrap status=start step=insert");
    let saved = service.create_note(BOOTSTRAP_NOTE_TITLE, BOOTSTRAP_NOTE_CONTENT)?;
    info!(
        "event=bootstrap module=bootstrap status=ok step=insert note_id={}",
        saved.id
    );

    info!("event=bootstrap module=bootstrap status=start step=load");
    let loaded = service.list_notes().map_err(NoteServiceError::from)?;
    info!(
        "event=bootstrap module=bootstrap status=ok step=load count={} notes={}",
        loaded.len(),
        render_notes(&loaded)
    );

    Ok(BootstrapReport { saved, loaded })
}

fn render_notes(notes: &[Note]) -> String {
    serde_json::to_string(notes).unwrap_or_else(|err| format!("<unrenderable: {err}>"))
}
