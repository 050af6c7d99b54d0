//! Alert thresholds and analysis configuration.
//!
//! Flat numeric cut points, overridable at construction time. Defaults
//! follow the US EPA AQI brackets and common meteorological extremes.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Static threshold table driving the threshold evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// AQI "moderate" bracket lower bound.
    pub aqi_moderate: f64,
    /// AQI "unhealthy for sensitive groups" bracket lower bound.
    pub aqi_unhealthy_sensitive: f64,
    /// AQI "unhealthy" bracket lower bound.
    pub aqi_unhealthy: f64,
    /// AQI "very unhealthy" bracket lower bound.
    pub aqi_very_unhealthy: f64,
    /// AQI "hazardous" bracket lower bound.
    pub aqi_hazardous: f64,
    /// Extreme low temperature (°C).
    pub temp_extreme_low: f64,
    /// Extreme high temperature (°C).
    pub temp_extreme_high: f64,
    /// Strong wind (m/s).
    pub wind_strong: f64,
    /// Extreme wind (m/s).
    pub wind_extreme: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            aqi_moderate: 51.0,
            aqi_unhealthy_sensitive: 101.0,
            aqi_unhealthy: 151.0,
            aqi_very_unhealthy: 201.0,
            aqi_hazardous: 301.0,
            temp_extreme_low: -10.0,
            temp_extreme_high: 40.0,
            wind_strong: 15.0,
            wind_extreme: 25.0,
        }
    }
}

impl AlertThresholds {
    /// Validate the threshold table. The AQI brackets and the wind bounds
    /// must be strictly ascending, and the temperature bounds must not
    /// overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let aqi = [
            self.aqi_moderate,
            self.aqi_unhealthy_sensitive,
            self.aqi_unhealthy,
            self.aqi_very_unhealthy,
            self.aqi_hazardous,
        ];
        if aqi.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidThreshold {
                field: "aqi".to_string(),
                message: "AQI brackets must be strictly ascending".to_string(),
            });
        }
        if self.wind_strong >= self.wind_extreme {
            return Err(ConfigError::InvalidThreshold {
                field: "wind".to_string(),
                message: "wind_strong must be below wind_extreme".to_string(),
            });
        }
        if self.temp_extreme_low >= self.temp_extreme_high {
            return Err(ConfigError::InvalidThreshold {
                field: "temperature".to_string(),
                message: "temp_extreme_low must be below temp_extreme_high".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for the correlation/trend analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Historical window loaded for correlation analysis, in days.
    pub window_days: u32,
    /// Historical window for trend detection, in days.
    pub trend_window_days: u32,
    /// Minimum series length for trend detection.
    pub trend_min_points: usize,
    /// AQI total drift (slope × window length) above which a trend-anomaly
    /// alert fires.
    pub aqi_drift_threshold: f64,
    /// Minimum row count for correlation analysis.
    pub min_rows: usize,
    /// |r| at or above which a pair is reported.
    pub strong_corr_threshold: f64,
    /// Row count above which the clustering pass runs.
    pub cluster_min_rows: usize,
    /// Fixed cluster count.
    pub cluster_k: usize,
    /// Numeric column count above which the PCA pass runs.
    pub pca_min_columns: usize,
    /// Two-sided significance level for Pearson tests.
    pub significance_alpha: f64,
    /// Result cache TTL in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            trend_window_days: 7,
            trend_min_points: 5,
            aqi_drift_threshold: 20.0,
            min_rows: 10,
            strong_corr_threshold: 0.7,
            cluster_min_rows: 50,
            cluster_k: 3,
            pca_min_columns: 3,
            significance_alpha: 0.05,
            cache_ttl_secs: 3600,
        }
    }
}
