//! Queries over the weather_data and air_quality_data tables.
//!
//! Read paths join the two tables on (city, country, date) and surface the
//! result as `Reading` values. Timestamps are stored as RFC 3339 text.

use aeris_core::{Reading, StorageError};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, Row};

/// A weather observation to insert.
#[derive(Debug, Clone)]
pub struct WeatherRow {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// An air-quality observation to insert.
#[derive(Debug, Clone)]
pub struct AirQualityRow {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub country: String,
    pub aqi_us: Option<f64>,
    pub main_pollutant_us: Option<String>,
}

/// Insert a weather observation.
pub fn insert_weather(conn: &Connection, row: &WeatherRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO weather_data (timestamp, city, country, temperature, humidity, pressure, wind_speed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            row.timestamp.to_rfc3339(),
            row.city,
            row.country,
            row.temperature,
            row.humidity,
            row.pressure,
            row.wind_speed,
        ],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

/// Insert an air-quality observation.
pub fn insert_air_quality(conn: &Connection, row: &AirQualityRow) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO air_quality_data (timestamp, city, country, aqi_us, main_pollutant_us)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            row.timestamp.to_rfc3339(),
            row.city,
            row.country,
            row.aqi_us,
            row.main_pollutant_us,
        ],
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(())
}

/// Most recent joined reading, optionally filtered by city substring.
pub fn latest_reading(
    conn: &Connection,
    location: Option<&str>,
) -> Result<Option<Reading>, StorageError> {
    let mut sql = String::from(
        "SELECT w.timestamp, w.city, w.country, w.temperature, w.humidity,
                w.pressure, w.wind_speed, a.aqi_us
         FROM weather_data w
         LEFT JOIN air_quality_data a
             ON w.city = a.city AND w.country = a.country
             AND date(w.timestamp) = date(a.timestamp)
         WHERE 1 = 1",
    );
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(loc) = location {
        sql.push_str(" AND w.city LIKE ?1");
        args.push(Box::new(format!("%{loc}%")));
    }
    sql.push_str(" ORDER BY w.timestamp DESC LIMIT 1");

    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let params_ref: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();
    let mut rows = stmt
        .query(params_ref.as_slice())
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    match rows
        .next()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?
    {
        Some(row) => Ok(Some(map_reading(row)?)),
        None => Ok(None),
    }
}

/// Joined readings from the last `days` days, ordered by timestamp.
pub fn historical_readings(
    conn: &Connection,
    location: Option<&str>,
    days: u32,
) -> Result<Vec<Reading>, StorageError> {
    let cutoff = (Utc::now() - Duration::days(i64::from(days))).to_rfc3339();

    let mut sql = String::from(
        "SELECT w.timestamp, w.city, w.country, w.temperature, w.humidity,
                w.pressure, w.wind_speed, a.aqi_us
         FROM weather_data w
         LEFT JOIN air_quality_data a
             ON w.city = a.city AND w.country = a.country
             AND date(w.timestamp) = date(a.timestamp)
         WHERE datetime(w.timestamp) >= datetime(?1)",
    );
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(cutoff)];
    if let Some(loc) = location {
        sql.push_str(" AND w.city LIKE ?2");
        args.push(Box::new(format!("%{loc}%")));
    }
    sql.push_str(" ORDER BY w.timestamp ASC");

    let mut stmt = conn
        .prepare_cached(&sql)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let params_ref: Vec<&dyn rusqlite::ToSql> = args.iter().map(|b| b.as_ref()).collect();
    let mut rows = stmt
        .query(params_ref.as_slice())
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let mut readings = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?
    {
        readings.push(map_reading(row)?);
    }
    Ok(readings)
}

fn map_reading(row: &Row<'_>) -> Result<Reading, StorageError> {
    let ts: String = row
        .get(0)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    let timestamp = DateTime::parse_from_rfc3339(&ts)
        .map_err(|e| StorageError::SqliteError {
            message: format!("bad timestamp {ts}: {e}"),
        })?
        .with_timezone(&Utc);

    let get = |idx: usize| -> Result<Option<f64>, StorageError> {
        row.get(idx)
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })
    };

    Ok(Reading {
        timestamp,
        city: row
            .get(1)
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?,
        country: row
            .get(2)
            .map_err(|e| StorageError::SqliteError { message: e.to_string() })?,
        temperature: get(3)?,
        humidity: get(4)?,
        pressure: get(5)?,
        wind_speed: get(6)?,
        aqi_us: get(7)?,
    })
}
