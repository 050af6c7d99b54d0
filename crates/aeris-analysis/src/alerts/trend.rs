//! Trend detection over a historical metric window.
//!
//! Fits an ordinary-least-squares line against sample index — not wall-clock
//! time — so irregular sampling intervals are treated as equally spaced.
//! Total drift over the window is fitted slope × series length.

use chrono::Utc;

use super::types::{Alert, AlertKind, Severity};

/// Detects significant directional change in a metric series.
///
/// Only the AQI worsening rule is enabled: drift above the threshold emits
/// a single warning trend-anomaly alert.
#[derive(Debug, Clone)]
pub struct TrendDetector {
    min_points: usize,
    aqi_drift_threshold: f64,
}

impl TrendDetector {
    pub fn new(min_points: usize, aqi_drift_threshold: f64) -> Self {
        Self {
            min_points,
            aqi_drift_threshold,
        }
    }

    /// Total drift of the series across the window, or `None` when the
    /// series is shorter than the minimum point count.
    pub fn total_drift(&self, series: &[f64]) -> Option<f64> {
        if series.len() < self.min_points {
            return None;
        }
        let slope = linear_slope(series)?;
        Some(slope * series.len() as f64)
    }

    /// Check the AQI series for a significant worsening trend.
    pub fn detect_aqi_trend(&self, series: &[f64], location: &str) -> Option<Alert> {
        let drift = self.total_drift(series)?;
        if drift <= self.aqi_drift_threshold {
            return None;
        }

        tracing::debug!(drift, location, "AQI worsening trend detected");
        Some(Alert {
            kind: AlertKind::TrendAnomaly,
            severity: Severity::Warning,
            title: "Worsening air quality trend".to_string(),
            description: format!(
                "Air quality has been worsening consistently (+{drift:.1} points)"
            ),
            location: location.to_string(),
            value: drift,
            threshold: self.aqi_drift_threshold,
            timestamp: Utc::now(),
            recommendations: vec![
                "Monitor air quality more closely".to_string(),
                "Consider adjusting outdoor activities".to_string(),
                "Check weather forecasts".to_string(),
            ],
        })
    }
}

impl Default for TrendDetector {
    fn default() -> Self {
        Self::new(5, 20.0)
    }
}

/// OLS slope of `series` regressed on sample index.
fn linear_slope(series: &[f64]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }

    let n = series.len() as f64;
    let x_mean = (series.len() - 1) as f64 / 2.0;
    let y_mean = series.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, y) in series.iter().enumerate() {
        let x_diff = i as f64 - x_mean;
        numerator += x_diff * (y - y_mean);
        denominator += x_diff * x_diff;
    }

    if denominator.abs() < f64::EPSILON {
        return None;
    }
    Some(numerator / denominator)
}
