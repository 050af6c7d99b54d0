//! Storage errors.

/// Errors that can occur opening, migrating, or querying the database.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    SqliteError { message: String },

    #[error("migration to version {version} failed: {message}")]
    MigrationFailed { version: u32, message: String },
}
