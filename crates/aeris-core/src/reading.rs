//! The `Reading` measurement record and the `Metric` column enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One timestamped measurement set for a single location.
///
/// Produced by the external collection process and immutable once recorded.
/// Every metric field is optional: a provider may return partial rows, and
/// absence of a value is not itself an alert condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub country: String,
    /// Air temperature in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Atmospheric pressure in hPa.
    pub pressure: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// US EPA Air Quality Index. Higher = worse.
    pub aqi_us: Option<f64>,
}

impl Reading {
    /// Human-readable location label ("City, Country") used on alerts.
    pub fn location_label(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }

    /// Value of the given metric, if present.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Pressure => self.pressure,
            Metric::WindSpeed => self.wind_speed,
            Metric::AqiUs => self.aqi_us,
        }
    }
}

/// The numeric metrics carried by a `Reading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    AqiUs,
}

impl Metric {
    pub fn all() -> &'static [Metric] {
        &[
            Self::Temperature,
            Self::Humidity,
            Self::Pressure,
            Self::WindSpeed,
            Self::AqiUs,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Pressure => "pressure",
            Self::WindSpeed => "wind_speed",
            Self::AqiUs => "aqi_us",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
