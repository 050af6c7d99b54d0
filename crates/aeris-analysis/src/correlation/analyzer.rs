//! The top-level correlation analyzer.

use aeris_core::{AnalysisConfig, AnalysisError, Reading};
use std::sync::Arc;

use crate::cache::AnalysisCache;

use super::clustering::cluster_analysis;
use super::matrix::{correlation_matrix, strong_pairs};
use super::pca::pca_analysis;
use super::significance::aqi_factor_analysis;
use super::temporal::temporal_patterns;
use super::types::{CorrelationReport, FeatureMatrix};

/// Runs the full correlation pipeline over a reading batch or a prepared
/// feature matrix. Pure apart from the optional result cache.
pub struct CorrelationAnalyzer {
    config: AnalysisConfig,
    cache: Option<AnalysisCache>,
}

impl CorrelationAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Attach a result cache. Reports are cached per call signature and
    /// expire on the configured TTL.
    pub fn with_cache(mut self, cache: AnalysisCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&AnalysisCache> {
        self.cache.as_ref()
    }

    /// Analyze a reading batch: builds the standard feature matrix, runs the
    /// matrix pipeline, and adds temporal patterns.
    pub fn analyze_readings(
        &self,
        readings: &[Reading],
    ) -> Result<Arc<CorrelationReport>, AnalysisError> {
        if readings.len() < self.config.min_rows {
            return Err(AnalysisError::InsufficientRows {
                rows: readings.len(),
                min: self.config.min_rows,
            });
        }

        let key = reading_batch_key(readings);
        if let Some(cache) = &self.cache {
            if let Some(report) = cache.get(&key) {
                tracing::debug!(key, "correlation report served from cache");
                return Ok(report);
            }
        }

        let fm = FeatureMatrix::from_readings(readings);
        let mut report = self.analyze_matrix(&fm)?;
        report.temporal = Some(temporal_patterns(readings));

        let report = Arc::new(report);
        if let Some(cache) = &self.cache {
            cache.insert(key, Arc::clone(&report));
        }
        Ok(report)
    }

    /// Analyze a prepared feature matrix. Clustering runs only above the
    /// configured sample count, PCA only above the configured column count.
    pub fn analyze_matrix(&self, fm: &FeatureMatrix) -> Result<CorrelationReport, AnalysisError> {
        if fm.n_rows() < self.config.min_rows {
            return Err(AnalysisError::InsufficientRows {
                rows: fm.n_rows(),
                min: self.config.min_rows,
            });
        }
        if fm.n_columns() < 2 {
            return Err(AnalysisError::InsufficientColumns {
                columns: fm.n_columns(),
                min: 2,
            });
        }

        let matrix = correlation_matrix(fm);
        let pairs = strong_pairs(&matrix, self.config.strong_corr_threshold);
        let aqi =
            aqi_factor_analysis(fm, self.config.significance_alpha, self.config.min_rows);

        let clustering = if fm.n_rows() > self.config.cluster_min_rows {
            cluster_analysis(fm, self.config.cluster_k)
        } else {
            None
        };

        let pca = if fm.n_columns() > self.config.pca_min_columns {
            pca_analysis(fm)
        } else {
            None
        };

        tracing::info!(
            rows = fm.n_rows(),
            columns = fm.n_columns(),
            strong_pairs = pairs.len(),
            "correlation analysis complete"
        );

        Ok(CorrelationReport {
            matrix,
            strong_pairs: pairs,
            aqi_analysis: aqi,
            clustering,
            pca,
            temporal: None,
        })
    }
}

/// Call-signature key for the result cache: row count plus the batch's
/// first/last timestamps and location.
fn reading_batch_key(readings: &[Reading]) -> String {
    let first = readings.first();
    let last = readings.last();
    format!(
        "corr:{}:{}:{}:{}",
        readings.len(),
        first.map(|r| r.timestamp.timestamp()).unwrap_or_default(),
        last.map(|r| r.timestamp.timestamp()).unwrap_or_default(),
        first.map(|r| r.city.as_str()).unwrap_or_default(),
    )
}
