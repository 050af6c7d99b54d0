//! Round-trip tests for the readings queries against the real schema.

use aeris_storage::queries::{readings, stats};
use chrono::{Duration, TimeZone, Utc};

fn weather(ts_offset_hours: i64, city: &str, temp: f64) -> readings::WeatherRow {
    readings::WeatherRow {
        timestamp: Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
            + Duration::hours(ts_offset_hours),
        city: city.to_string(),
        country: "PT".to_string(),
        temperature: Some(temp),
        humidity: Some(55.0),
        pressure: Some(1013.0),
        wind_speed: Some(4.0),
    }
}

fn air(ts_offset_hours: i64, city: &str, aqi: f64) -> readings::AirQualityRow {
    readings::AirQualityRow {
        timestamp: Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap()
            + Duration::hours(ts_offset_hours),
        city: city.to_string(),
        country: "PT".to_string(),
        aqi_us: Some(aqi),
        main_pollutant_us: Some("pm25".to_string()),
    }
}

#[test]
fn latest_reading_joins_air_quality() {
    let conn = aeris_storage::open_in_memory().unwrap();
    readings::insert_weather(&conn, &weather(0, "Lisbon", 21.0)).unwrap();
    readings::insert_weather(&conn, &weather(2, "Lisbon", 24.0)).unwrap();
    readings::insert_air_quality(&conn, &air(2, "Lisbon", 62.0)).unwrap();

    let latest = readings::latest_reading(&conn, None).unwrap().unwrap();
    assert_eq!(latest.temperature, Some(24.0));
    assert_eq!(latest.aqi_us, Some(62.0));
    assert_eq!(latest.city, "Lisbon");
}

#[test]
fn latest_reading_without_air_row_has_null_aqi() {
    let conn = aeris_storage::open_in_memory().unwrap();
    readings::insert_weather(&conn, &weather(0, "Porto", 18.0)).unwrap();

    let latest = readings::latest_reading(&conn, None).unwrap().unwrap();
    assert_eq!(latest.aqi_us, None);
}

#[test]
fn latest_reading_filters_by_city() {
    let conn = aeris_storage::open_in_memory().unwrap();
    readings::insert_weather(&conn, &weather(0, "Lisbon", 21.0)).unwrap();
    readings::insert_weather(&conn, &weather(1, "Porto", 17.0)).unwrap();

    let latest = readings::latest_reading(&conn, Some("Lisb")).unwrap().unwrap();
    assert_eq!(latest.city, "Lisbon");
}

#[test]
fn latest_reading_empty_database() {
    let conn = aeris_storage::open_in_memory().unwrap();
    assert!(readings::latest_reading(&conn, None).unwrap().is_none());
}

#[test]
fn historical_readings_ordered_ascending() {
    let conn = aeris_storage::open_in_memory().unwrap();
    // Timestamps relative to now so the window query picks them up.
    for i in 0..4 {
        let row = readings::WeatherRow {
            timestamp: Utc::now() - Duration::hours(12 * (4 - i)),
            city: "Lisbon".to_string(),
            country: "PT".to_string(),
            temperature: Some(20.0 + i as f64),
            humidity: None,
            pressure: None,
            wind_speed: None,
        };
        readings::insert_weather(&conn, &row).unwrap();
    }

    let batch = readings::historical_readings(&conn, None, 7).unwrap();
    assert_eq!(batch.len(), 4);
    assert!(batch.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(batch[0].temperature, Some(20.0));
}

#[test]
fn historical_readings_respects_window() {
    let conn = aeris_storage::open_in_memory().unwrap();
    let old = readings::WeatherRow {
        timestamp: Utc::now() - Duration::days(40),
        city: "Lisbon".to_string(),
        country: "PT".to_string(),
        temperature: Some(10.0),
        humidity: None,
        pressure: None,
        wind_speed: None,
    };
    let recent = readings::WeatherRow {
        timestamp: Utc::now() - Duration::days(2),
        city: "Lisbon".to_string(),
        country: "PT".to_string(),
        temperature: Some(22.0),
        humidity: None,
        pressure: None,
        wind_speed: None,
    };
    readings::insert_weather(&conn, &old).unwrap();
    readings::insert_weather(&conn, &recent).unwrap();

    let batch = readings::historical_readings(&conn, None, 7).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].temperature, Some(22.0));
}

#[test]
fn database_stats_counts_records() {
    let conn = aeris_storage::open_in_memory().unwrap();
    readings::insert_weather(&conn, &weather(0, "Lisbon", 21.0)).unwrap();
    readings::insert_weather(&conn, &weather(1, "Porto", 17.0)).unwrap();
    readings::insert_air_quality(&conn, &air(0, "Lisbon", 45.0)).unwrap();

    let s = stats::database_stats(&conn).unwrap();
    assert_eq!(s.weather_records, 2);
    assert_eq!(s.air_quality_records, 1);
    assert_eq!(s.unique_cities, 2);
    assert!(s.first_timestamp.is_some());
}
