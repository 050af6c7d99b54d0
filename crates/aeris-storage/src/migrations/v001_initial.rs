//! v001: weather and air-quality tables.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS weather_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    city TEXT NOT NULL,
    country TEXT NOT NULL,
    temperature REAL,
    humidity REAL,
    pressure REAL,
    wind_speed REAL
);

CREATE TABLE IF NOT EXISTS air_quality_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    city TEXT NOT NULL,
    country TEXT NOT NULL,
    aqi_us REAL,
    main_pollutant_us TEXT
);

CREATE INDEX IF NOT EXISTS idx_weather_timestamp ON weather_data(timestamp);
CREATE INDEX IF NOT EXISTS idx_weather_location ON weather_data(city, country);
CREATE INDEX IF NOT EXISTS idx_air_timestamp ON air_quality_data(timestamp);
CREATE INDEX IF NOT EXISTS idx_air_location ON air_quality_data(city, country);
";
