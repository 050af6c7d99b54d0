//! Core types for correlation analysis.

use std::collections::BTreeMap;
use std::fmt;

use aeris_core::Reading;
use serde::{Deserialize, Serialize};

use crate::features;

/// A rectangular feature matrix: rows are time-ordered samples, columns are
/// named numeric metrics. Nulls are permitted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<Option<f64>>>,
}

impl FeatureMatrix {
    /// Create an empty matrix with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a sample row. The row length must match the column count.
    pub fn push_row(&mut self, row: Vec<Option<f64>>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row length must match column count"
        );
        self.rows.push(row);
    }

    /// Build the standard climate feature matrix from a reading batch,
    /// including the derived comfort and stability columns.
    pub fn from_readings(readings: &[Reading]) -> Self {
        let columns = vec![
            "temperature".to_string(),
            "humidity".to_string(),
            "pressure".to_string(),
            "wind_speed".to_string(),
            "aqi_us".to_string(),
            "comfort_index".to_string(),
            "weather_stability".to_string(),
        ];
        let mut matrix = Self::new(columns);
        for r in readings {
            let comfort = match (r.temperature, r.humidity) {
                (Some(t), Some(h)) => Some(features::comfort_index(t, h)),
                _ => None,
            };
            let stability = match (r.pressure, r.wind_speed) {
                (Some(p), Some(w)) => Some(features::stability_index(p, w)),
                _ => None,
            };
            matrix.push_row(vec![
                r.temperature,
                r.humidity,
                r.pressure,
                r.wind_speed,
                r.aqi_us,
                comfort,
                stability,
            ]);
        }
        matrix
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Paired values of columns `a` and `b` over rows where both are present.
    pub fn pairwise_complete(&self, a: usize, b: usize) -> (Vec<f64>, Vec<f64>) {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for row in &self.rows {
            if let (Some(x), Some(y)) = (row[a], row[b]) {
                xs.push(x);
                ys.push(y);
            }
        }
        (xs, ys)
    }

    /// Rows with no nulls in any column.
    pub fn complete_rows(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .filter_map(|row| row.iter().copied().collect::<Option<Vec<f64>>>())
            .collect()
    }

    /// Non-null values of one column, in row order.
    pub fn column_values(&self, idx: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|row| row[idx]).collect()
    }
}

/// Full pairwise Pearson correlation matrix. `values[i][j]` is the
/// coefficient for columns i and j; entries with no overlapping data are NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Strength bucket for a reported pair: |r| ≥ 0.8 strong, 0.7–0.8 moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
        })
    }
}

/// Sign of a reported pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
        })
    }
}

/// A pairwise relationship above the reporting threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub var_a: String,
    pub var_b: String,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// Pearson test of one predictor against the AQI target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorCorrelation {
    pub factor: String,
    pub coefficient: f64,
    pub p_value: f64,
    /// Two-sided p < 0.05.
    pub significant: bool,
}

/// AQI vs meteorological factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiFactorAnalysis {
    pub factors: Vec<FactorCorrelation>,
    /// Top 3 factors by |r|.
    pub top_factors: Vec<FactorCorrelation>,
}

/// One cluster of environmental conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub size: usize,
    pub percentage: f64,
    /// Centroid means per column, on the original (unstandardized) scale.
    pub means: BTreeMap<String, f64>,
    /// Rule-based natural-language labels, e.g. "hot conditions".
    pub characteristics: Vec<String>,
}

/// Result of the fixed-k clustering pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringReport {
    pub k: usize,
    pub clusters: Vec<ClusterProfile>,
    pub silhouette: f64,
}

/// Result of the principal-component pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaReport {
    /// Explained-variance ratios, first 5 components.
    pub explained_variance: Vec<f64>,
    /// Cumulative explained variance, first 5 components.
    pub cumulative_variance: Vec<f64>,
    /// Loadings of the first 3 components, keyed by column name.
    pub components: Vec<BTreeMap<String, f64>>,
    /// Component count needed to reach 90% cumulative variance.
    pub n_components_90: usize,
}

/// Direction of a daily-mean metric trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        })
    }
}

/// Linear trend of one metric's daily means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    pub metric: String,
    pub slope: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub direction: TrendDirection,
    pub significant: bool,
}

/// Mean/std of one metric for one hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyStat {
    pub hour: u32,
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// Hourly groupings and daily-mean trends.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemporalPatterns {
    /// Per-metric hourly statistics, sorted by hour.
    pub hourly: BTreeMap<String, Vec<HourlyStat>>,
    pub daily_trends: Vec<MetricTrend>,
}

/// The full correlation analysis result. Optional stages are `None` when
/// their activation condition or data requirement is not met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    pub strong_pairs: Vec<CorrelationPair>,
    pub aqi_analysis: Option<AqiFactorAnalysis>,
    pub clustering: Option<ClusteringReport>,
    pub pca: Option<PcaReport>,
    pub temporal: Option<TemporalPatterns>,
}
