//! Aeris analysis engine: condition alerting, trend detection, and
//! correlation analysis over climate/air-quality readings.
//!
//! All computation is synchronous and request-triggered. Functions take
//! reading batches in and return value objects out; nothing here mutates
//! shared state beyond the optional result cache, which tolerates duplicate
//! recomputation on a race.

pub mod alerts;
pub mod cache;
pub mod correlation;
pub mod features;
pub mod report;

pub use alerts::{Alert, AlertEngine, AlertKind, Severity};
pub use cache::AnalysisCache;
pub use correlation::{CorrelationAnalyzer, CorrelationReport, FeatureMatrix};
