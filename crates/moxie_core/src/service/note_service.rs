//! Note use-case service.
//!
//! # Responsibility
//! - Provide note create/get/list APIs on top of a `NoteRepository`.
//! - Validate input before it reaches storage.
//! - Accept JSON note input for command-line callers.
//!
//! # Invariants
//! - A rejected create leaves storage unchanged.
//! - Created notes are read back from storage before being returned.

use crate::model::note::{NewNote, Note, NoteId, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError, RepoResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Validation(NoteValidationError),
    /// Input could not be parsed as a `{"title", "content"}` object.
    InvalidJson(serde_json::Error),
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidJson(err) => write!(f, "invalid note json: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidJson(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<NoteValidationError> for NoteServiceError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one note from title and content.
    pub fn create_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Note, NoteServiceError> {
        self.save(&NewNote::new(title, content))
    }

    /// Creates one note from a JSON object such as
    /// `{"title": "Do X", "content": "..."}`.
    pub fn create_note_from_json(&self, json: &str) -> Result<Note, NoteServiceError> {
        let new_note: NewNote =
            serde_json::from_str(json).map_err(NoteServiceError::InvalidJson)?;
        self.save(&new_note)
    }

    pub fn get_note(&self, id: NoteId) -> RepoResult<Option<Note>> {
        self.repo.find_by_id(id)
    }

    /// Lists every note, ordered by id.
    pub fn list_notes(&self) -> RepoResult<Vec<Note>> {
        self.repo.find_all()
    }

    fn save(&self, new_note: &NewNote) -> Result<Note, NoteServiceError> {
        if let Err(err) = new_note.validate() {
            error!(
                "event=note_create module=service status=error error_code=validation_failed error={}",
                err
            );
            return Err(err.into());
        }

        let created = match self.repo.create_note(new_note) {
            Ok(note) => note,
            Err(err) => {
                error!(
                    "event=note_create module=service status=error error_code=repo_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let note = self
            .repo
            .find_by_id(created.id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;
        info!(
            "event=note_create module=service status=ok note_id={}",
            note.id
        );
        Ok(note)
    }
}
