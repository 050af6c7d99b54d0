//! Correlation analysis over a rectangular feature matrix.
//!
//! Pipeline stages: full Pearson matrix, strong-pair ranking, AQI factor
//! significance testing, optional k-means clustering (sample count > 50),
//! optional PCA (more than 3 numeric columns), and temporal patterns when
//! raw readings are available.

pub mod analyzer;
pub mod clustering;
pub mod matrix;
pub mod pca;
pub mod significance;
pub mod temporal;
pub mod types;

pub use analyzer::CorrelationAnalyzer;
pub use types::{
    AqiFactorAnalysis, ClusteringReport, CorrelationDirection, CorrelationMatrix,
    CorrelationPair, CorrelationReport, CorrelationStrength, FeatureMatrix, PcaReport,
    TemporalPatterns,
};
