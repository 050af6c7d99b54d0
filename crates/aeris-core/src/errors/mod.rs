//! Per-subsystem error enums.

pub mod analysis_error;
pub mod config_error;
pub mod storage_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;
