//! Condition alerting: threshold evaluation, trend detection, summaries.
//!
//! Alerts are ephemeral value objects recomputed on every evaluation call.
//! Severity has a total order (info < warning < critical < emergency) that
//! drives both sort order and notification dispatch.

pub mod engine;
pub mod summary;
pub mod thresholds;
pub mod trend;
pub mod types;

pub use engine::{AlertEngine, NotificationSink};
pub use summary::{summarize, AlertSummary};
pub use thresholds::ThresholdEvaluator;
pub use trend::TrendDetector;
pub use types::{Alert, AlertKind, Severity};
