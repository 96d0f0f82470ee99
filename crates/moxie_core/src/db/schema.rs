//! Direct schema creation and schema introspection helpers.
//!
//! # Responsibility
//! - Create the current `note` schema in one step, bypassing migrations.
//! - Answer "does this table/column exist" for readiness checks.
//!
//! # Invariants
//! - `create_schema` only acts on an empty, unversioned database and stamps
//!   it with the latest migration version, so later upgrades are no-ops.

use super::migrations::{current_version, latest_version};
use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const NOTE_TABLE: &str = "note";

/// Creates the current schema directly.
///
/// Calling this on a database already at the latest version is a no-op.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this binary.
/// - `ExistingSchema` when an older or unversioned `note` table exists.
pub fn create_schema(conn: &Connection) -> DbResult<()> {
    let db_version = current_version(conn)?;
    let latest = latest_version();

    if db_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: latest,
        });
    }
    if db_version == latest {
        info!(
            "event=schema_create module=db status=ok created=false version={}",
            db_version
        );
        return Ok(());
    }
    if db_version > 0 || table_exists(conn, NOTE_TABLE)? {
        return Err(DbError::ExistingSchema { db_version });
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(include_str!("schema.sql"))?;
    tx.execute_batch(&format!("PRAGMA user_version = {latest};"))?;
    tx.commit()?;

    info!(
        "event=schema_create module=db status=ok created=true version={}",
        latest
    );
    Ok(())
}

/// Returns whether a table named `table` exists.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` has a column named `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
