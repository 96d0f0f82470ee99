//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map `NewNote`/`Note` to rows of the `note` table.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - The repository never creates or alters tables; a connection without the
//!   expected schema is rejected at construction.
//! - `find_all` is ordered by `id ASC`.
//! - Ids come from storage only.

use crate::db::schema::{table_exists, table_has_column};
use crate::db::DbError;
use crate::model::note::{NewNote, Note, NoteId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_TABLE: &str = "note";
const NOTE_COLUMNS: [&str; 3] = ["id", "title", "content"];

const NOTE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content
FROM note";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A NOT NULL or CHECK constraint rejected the write.
    ConstraintViolation(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(details) => write!(f, "constraint violation: {details}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run schema setup first")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing; run schema migrations")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Repository interface for notes.
pub trait NoteRepository {
    /// Persists one note and returns it with its assigned id.
    fn create_note(&self, note: &NewNote) -> RepoResult<Note>;
    fn find_by_id(&self, id: NoteId) -> RepoResult<Option<Note>>;
    /// Returns every note ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Note>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository after checking the `note` schema is in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_note_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, note: &NewNote) -> RepoResult<Note> {
        self.conn.execute(
            "INSERT INTO note (title, content) VALUES (?1, ?2);",
            params![note.title.as_str(), note.content.as_str()],
        )?;

        let id = self.conn.last_insert_rowid();
        if id <= 0 {
            return Err(RepoError::InvalidData(format!(
                "storage assigned non-positive id {id}"
            )));
        }
        Ok(note.clone().into_note(NoteId::new(id)))
    }

    fn find_by_id(&self, id: NoteId) -> RepoResult<Option<Note>> {
        let sql = format!("{NOTE_SELECT_SQL} WHERE id = ?1;");
        let note = self
            .conn
            .query_row(&sql, [id.get()], map_note_row)
            .optional()?;
        Ok(note)
    }

    fn find_all(&self) -> RepoResult<Vec<Note>> {
        let sql = format!("{NOTE_SELECT_SQL} ORDER BY id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let notes = stmt
            .query_map([], map_note_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }
}

fn map_note_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: NoteId::new(row.get("id")?),
        title: row.get("title")?,
        content: row.get("content")?,
    })
}

fn ensure_note_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, NOTE_TABLE)? {
        return Err(RepoError::MissingRequiredTable(NOTE_TABLE));
    }

    for column in NOTE_COLUMNS {
        if !table_has_column(conn, NOTE_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: NOTE_TABLE,
                column,
            });
        }
    }

    Ok(())
}
