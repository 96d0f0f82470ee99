//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register `note` schema migrations in strictly increasing order.
//! - Apply pending migrations, or revert applied ones, atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A database newer than this binary is never touched.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    /// Reverts `sql`, leaving the schema at `version - 1`.
    down: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_note.sql"),
        down: include_str!("0001_note.down.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_note_content.sql"),
        down: include_str!("0002_note_content.down.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations and returns the resulting version.
pub fn upgrade_schema(conn: &mut Connection) -> DbResult<u32> {
    upgrade_schema_to(conn, latest_version())
}

/// Applies pending migrations up to and including `target`.
///
/// Versions beyond `target` stay pending. A `target` above the latest known
/// version is clamped.
pub fn upgrade_schema_to(conn: &mut Connection, target: u32) -> DbResult<u32> {
    let current_version = current_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        error!(
            "event=schema_upgrade module=db status=error error_code=unsupported_version db_version={} latest={}",
            current_version, latest
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    let target = target.min(latest);
    if current_version >= target {
        info!(
            "event=schema_upgrade module=db status=ok applied=0 version={}",
            current_version
        );
        return Ok(current_version);
    }

    let tx = conn.transaction()?;
    let mut applied = 0;
    for migration in MIGRATIONS {
        if migration.version <= current_version || migration.version > target {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        applied += 1;
    }
    tx.commit()?;

    info!(
        "event=schema_upgrade module=db status=ok applied={} from_version={} version={}",
        applied, current_version, target
    );
    Ok(target)
}

/// Reverts applied migrations down to `target` and returns `target`.
///
/// `target = 0` drops the `note` table entirely. Reverting `content` keeps
/// ids and titles but discards content.
pub fn downgrade_schema_to(conn: &mut Connection, target: u32) -> DbResult<u32> {
    let current_version = current_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        error!(
            "event=schema_downgrade module=db status=error error_code=unsupported_version db_version={} latest={}",
            current_version, latest
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version <= target {
        info!(
            "event=schema_downgrade module=db status=ok reverted=0 version={}",
            current_version
        );
        return Ok(current_version);
    }

    let tx = conn.transaction()?;
    let mut reverted = 0;
    for migration in MIGRATIONS.iter().rev() {
        if migration.version > current_version || migration.version <= target {
            continue;
        }

        tx.execute_batch(migration.down)?;
        tx.execute_batch(&format!(
            "PRAGMA user_version = {};",
            migration.version - 1
        ))?;
        reverted += 1;
    }
    tx.commit()?;

    info!(
        "event=schema_downgrade module=db status=ok reverted={} from_version={} version={}",
        reverted, current_version, target
    );
    Ok(target)
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
