//! Aeris core: shared types, configuration, errors, and tracing setup.
//!
//! Everything in this crate is consumed by `aeris-storage` and
//! `aeris-analysis`; it carries no analysis logic of its own.

pub mod config;
pub mod errors;
pub mod reading;
pub mod tracing_setup;

pub use config::{AlertThresholds, AnalysisConfig};
pub use errors::{AnalysisError, ConfigError, StorageError};
pub use reading::{Metric, Reading};
