//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its unsaved `NewNote` form.
//! - Mirror storage integrity rules so callers fail fast before SQL.
//!
//! # Invariants
//! - `NoteId` is assigned by storage on first persist and never changes.
//! - `title` and `content` are non-blank once persisted.
//! - Only ASCII spaces count as blank; `\r`, `\n`, `\t` and other characters
//!   are stored verbatim.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note that has been persisted and carries its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Short title, interrogative ("How to do X?") or imperative ("Do X").
    pub title: String,
    pub content: String,
}

/// A note built in memory by the caller, not yet persisted.
///
/// Has no `id`; the identifier only exists once storage hands back a [`Note`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks the same rules the `note` table enforces with CHECK constraints.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is empty or only spaces.
    /// - `BlankContent` when `content` is empty or only spaces.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if is_blank(&self.title) {
            return Err(NoteValidationError::BlankTitle);
        }
        if is_blank(&self.content) {
            return Err(NoteValidationError::BlankContent);
        }
        Ok(())
    }

    /// Attaches a storage-assigned id, producing the persisted form.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Validation failure for note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    BlankTitle,
    BlankContent,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "note title must not be blank"),
            Self::BlankContent => write!(f, "note content must not be blank"),
        }
    }
}

impl Error for NoteValidationError {}

// Matches `length(trim(col, ' ')) > 0` in the schema.
fn is_blank(value: &str) -> bool {
    value.trim_matches(' ').is_empty()
}
