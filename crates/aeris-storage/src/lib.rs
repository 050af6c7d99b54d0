//! Aeris storage: SQLite persistence for weather and air-quality readings.
//!
//! Readings are collected into two tables (`weather_data`, `air_quality_data`)
//! and joined on (city, country, date) when read back as `Reading` batches.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::{open, open_in_memory};
pub use queries::readings::{historical_readings, latest_reading};
pub use queries::stats::database_stats;
