//! Connection opening and PRAGMA configuration.

use std::path::Path;

use aeris_core::StorageError;
use rusqlite::Connection;

use crate::migrations;

/// Open (or create) the database at `path`, apply pragmas, and run any
/// pending migrations.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, StorageError> {
    let path = path.as_ref();
    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: format!("failed to open {}: {e}", path.display()),
    })?;
    apply_pragmas(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Used in tests.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
        message: format!("failed to open in-memory database: {e}"),
    })?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Apply performance and safety pragmas to a connection.
fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply pragmas: {e}"),
    })
}
