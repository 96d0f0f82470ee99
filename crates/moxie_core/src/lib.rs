//! Core domain logic for moxie notes.
//! This crate owns the `note` schema, its migrations and all data access.

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use bootstrap::{run_bootstrap, run_bootstrap_on, BootstrapError, BootstrapReport};
pub use config::{ConnectionConfig, DbLocation};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::note::{NewNote, Note, NoteId, NoteValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
