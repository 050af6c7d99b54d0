//! Alert batch summaries and JSON export.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{Alert, AlertKind, Severity};

/// Counts of an alert batch by severity and kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_kind: BTreeMap<AlertKind, usize>,
    /// Alerts at critical or emergency severity.
    pub critical_count: usize,
}

/// Summarize an alert batch.
pub fn summarize(alerts: &[Alert]) -> AlertSummary {
    let mut by_severity = BTreeMap::new();
    let mut by_kind = BTreeMap::new();
    let mut critical_count = 0;

    for alert in alerts {
        *by_severity.entry(alert.severity).or_insert(0) += 1;
        *by_kind.entry(alert.kind).or_insert(0) += 1;
        if alert.severity.triggers_notification() {
            critical_count += 1;
        }
    }

    AlertSummary {
        total: alerts.len(),
        by_severity,
        by_kind,
        critical_count,
    }
}

/// Export an alert batch as pretty-printed JSON.
pub fn to_json(alerts: &[Alert]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(alerts)
}
