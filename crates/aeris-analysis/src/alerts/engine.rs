//! Top-level alert engine: threshold + trend evaluation over one snapshot,
//! with optional dispatch to a notification sink.

use aeris_core::{AlertThresholds, AnalysisConfig, Reading};

use super::thresholds::ThresholdEvaluator;
use super::trend::TrendDetector;
use super::types::Alert;

/// Outbound channel for critical/emergency alerts (webhook, email, …).
///
/// Dispatch is best-effort; implementations must not block evaluation.
pub trait NotificationSink: Send + Sync {
    fn dispatch(&self, alert: &Alert);
}

/// The condition alert engine.
///
/// One evaluation call is the whole alert lifecycle: alerts are recomputed
/// from scratch each run and returned sorted by descending severity.
pub struct AlertEngine {
    thresholds: ThresholdEvaluator,
    trend: TrendDetector,
    sink: Option<Box<dyn NotificationSink>>,
}

impl AlertEngine {
    pub fn new(thresholds: AlertThresholds, config: &AnalysisConfig) -> Self {
        Self {
            thresholds: ThresholdEvaluator::new(thresholds),
            trend: TrendDetector::new(config.trend_min_points, config.aqi_drift_threshold),
            sink: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(AlertThresholds::default(), &AnalysisConfig::default())
    }

    /// Attach a notification sink for critical/emergency alerts.
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Evaluate current conditions: threshold checks on the latest reading
    /// plus trend detection over the historical AQI series.
    ///
    /// `latest` being `None` (e.g. a failed batch load upstream) degrades to
    /// trend-only evaluation; an empty history skips trend detection. The
    /// returned alerts are sorted by descending severity.
    pub fn evaluate(
        &self,
        latest: Option<&Reading>,
        aqi_history: &[f64],
        location: &str,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if let Some(reading) = latest {
            alerts.extend(self.thresholds.evaluate(reading));
        }
        if let Some(alert) = self.trend.detect_aqi_trend(aqi_history, location) {
            alerts.push(alert);
        }

        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));

        if let Some(sink) = &self.sink {
            for alert in alerts.iter().filter(|a| a.severity.triggers_notification()) {
                sink.dispatch(alert);
            }
        }

        tracing::info!(count = alerts.len(), location, "evaluated current conditions");
        alerts
    }

    /// Evaluate threshold alerts for a batch of readings, flattened.
    pub fn evaluate_batch(&self, readings: &[Reading]) -> Vec<Alert> {
        readings
            .iter()
            .flat_map(|r| self.thresholds.evaluate(r))
            .collect()
    }
}
