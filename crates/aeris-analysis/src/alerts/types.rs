//! Alert value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert severity. The derived `Ord` gives the total order
/// info < warning < critical < emergency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
    Emergency,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        }
    }

    /// Whether this severity triggers notification dispatch.
    pub fn triggers_notification(&self) -> bool {
        matches!(self, Self::Critical | Self::Emergency)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of condition an alert reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    AirQuality,
    Temperature,
    Wind,
    TrendAnomaly,
}

impl AlertKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AirQuality => "air_quality",
            Self::Temperature => "temperature",
            Self::Wind => "wind",
            Self::TrendAnomaly => "trend_anomaly",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A derived, ephemeral alert. Recreated on every evaluation call; alerts
/// carry no identity and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub location: String,
    /// The value that triggered the alert.
    pub value: f64,
    /// The threshold that was crossed.
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_is_total() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert!(Severity::Critical < Severity::Emergency);
    }

    #[test]
    fn notification_fires_for_critical_and_above() {
        assert!(!Severity::Info.triggers_notification());
        assert!(!Severity::Warning.triggers_notification());
        assert!(Severity::Critical.triggers_notification());
        assert!(Severity::Emergency.triggers_notification());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let s = serde_json::to_string(&AlertKind::AirQuality).unwrap();
        assert_eq!(s, "\"air_quality\"");
    }
}
