//! Analysis errors.
//!
//! Insufficient data is a structured, recoverable condition: callers match
//! on the variant and degrade to "no result" rather than crashing.

/// Errors that can occur during correlation or trend analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("insufficient rows for analysis: {rows} (minimum {min})")]
    InsufficientRows { rows: usize, min: usize },

    #[error("insufficient numeric columns: {columns} (minimum {min})")]
    InsufficientColumns { columns: usize, min: usize },
}
