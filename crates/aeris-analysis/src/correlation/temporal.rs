//! Temporal patterns: hourly groupings and daily-mean trend regression.

use std::collections::BTreeMap;

use aeris_core::{Metric, Reading};
use chrono::Timelike;

use super::significance::pearson_significance;
use super::types::{HourlyStat, MetricTrend, TemporalPatterns, TrendDirection};

/// Metrics grouped by hour of day.
const HOURLY_METRICS: &[Metric] = &[Metric::Temperature, Metric::Humidity, Metric::AqiUs];

/// Metrics regressed over daily means.
const TREND_METRICS: &[Metric] = &[
    Metric::Temperature,
    Metric::Humidity,
    Metric::Pressure,
    Metric::AqiUs,
];

/// Minimum daily-mean points for a trend regression.
const MIN_TREND_DAYS: usize = 4;

/// Compute hourly statistics and daily-mean trends for a reading batch.
pub fn temporal_patterns(readings: &[Reading]) -> TemporalPatterns {
    let mut patterns = TemporalPatterns::default();

    for &metric in HOURLY_METRICS {
        let stats = hourly_stats(readings, metric);
        if !stats.is_empty() {
            patterns.hourly.insert(metric.name().to_string(), stats);
        }
    }

    for &metric in TREND_METRICS {
        if let Some(trend) = daily_trend(readings, metric) {
            patterns.daily_trends.push(trend);
        }
    }

    patterns
}

fn hourly_stats(readings: &[Reading], metric: Metric) -> Vec<HourlyStat> {
    let mut buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for r in readings {
        if let Some(v) = r.metric(metric) {
            buckets.entry(r.timestamp.hour()).or_default().push(v);
        }
    }

    buckets
        .into_iter()
        .map(|(hour, values)| {
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            HourlyStat {
                hour,
                mean,
                std_dev: var.sqrt(),
                count: values.len(),
            }
        })
        .collect()
}

/// Regress one metric's daily means against day index.
fn daily_trend(readings: &[Reading], metric: Metric) -> Option<MetricTrend> {
    let mut days: BTreeMap<chrono::NaiveDate, Vec<f64>> = BTreeMap::new();
    for r in readings {
        if let Some(v) = r.metric(metric) {
            days.entry(r.timestamp.date_naive()).or_default().push(v);
        }
    }
    if days.len() < MIN_TREND_DAYS {
        return None;
    }

    let means: Vec<f64> = days
        .values()
        .map(|vals| vals.iter().sum::<f64>() / vals.len() as f64)
        .collect();
    let index: Vec<f64> = (0..means.len()).map(|i| i as f64).collect();

    let (r, p) = pearson_significance(&index, &means)?;

    // Recover the OLS slope from r and the sample spreads.
    let n = means.len() as f64;
    let x_mean = index.iter().sum::<f64>() / n;
    let y_mean = means.iter().sum::<f64>() / n;
    let sx = (index.iter().map(|x| (x - x_mean).powi(2)).sum::<f64>() / n).sqrt();
    let sy = (means.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / n).sqrt();
    if sx <= f64::EPSILON {
        return None;
    }
    let slope = r * sy / sx;

    Some(MetricTrend {
        metric: metric.name().to_string(),
        slope,
        r_squared: r * r,
        p_value: p,
        direction: if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        },
        significant: p < 0.05,
    })
}
