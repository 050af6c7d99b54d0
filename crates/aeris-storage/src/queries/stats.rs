//! Database-level statistics.

use aeris_core::StorageError;
use rusqlite::Connection;

/// Summary counts and coverage for the stored readings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseStats {
    pub weather_records: u64,
    pub air_quality_records: u64,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub unique_cities: u64,
}

/// Compute summary statistics over both tables.
pub fn database_stats(conn: &Connection) -> Result<DatabaseStats, StorageError> {
    let weather_records: i64 = conn
        .query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let air_quality_records: i64 = conn
        .query_row("SELECT COUNT(*) FROM air_quality_data", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let (first_timestamp, last_timestamp): (Option<String>, Option<String>) = conn
        .query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM weather_data",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let unique_cities: i64 = conn
        .query_row("SELECT COUNT(DISTINCT city) FROM weather_data", [], |row| {
            row.get(0)
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    Ok(DatabaseStats {
        weather_records: weather_records as u64,
        air_quality_records: air_quality_records as u64,
        first_timestamp,
        last_timestamp,
        unique_cities: unique_cities as u64,
    })
}
