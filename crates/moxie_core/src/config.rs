//! Connection configuration.
//!
//! # Responsibility
//! - Hold the fixed defaults used to reach the notes database.
//! - Give callers (CLI, tests) one place to override the location.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_FILE: &str = "moxie.db";
/// How long a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl Display for DbLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "sqlite://{}", path.display()),
            Self::Memory => write!(f, "sqlite://:memory:"),
        }
    }
}

/// Parameters for opening a notes database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub location: DbLocation,
    pub busy_timeout: Duration,
}

impl ConnectionConfig {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: DbLocation::File(path.as_ref().to_path_buf()),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Short log-safe mode label (`file` or `memory`).
    pub fn mode(&self) -> &'static str {
        match self.location {
            DbLocation::File(_) => "file",
            DbLocation::Memory => "memory",
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::file(DEFAULT_DB_FILE)
    }
}
