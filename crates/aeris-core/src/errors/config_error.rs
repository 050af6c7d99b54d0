//! Configuration errors.

/// Errors that can occur validating the threshold and analysis configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid threshold for {field}: {message}")]
    InvalidThreshold { field: String, message: String },
}
