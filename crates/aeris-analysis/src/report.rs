//! Markdown rendering of analysis results.
//!
//! Pure string building over the correlation report and an optional alert
//! summary; callers decide where the text goes.

use chrono::Utc;
use std::fmt::Write;

use crate::alerts::summary::AlertSummary;
use crate::correlation::types::{CorrelationDirection, CorrelationReport};

/// Strong pairs shown in the report.
const MAX_PAIRS: usize = 5;

/// Minimum |r| for an AQI factor to be worth a sentence.
const FACTOR_MENTION_THRESHOLD: f64 = 0.3;

/// Render a correlation report (and optionally an alert summary) as a
/// Markdown document.
pub fn render_markdown(report: &CorrelationReport, alerts: Option<&AlertSummary>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Climate Correlation Analysis");
    let _ = writeln!(out);

    render_strong_pairs(&mut out, report);
    render_aqi_factors(&mut out, report);
    render_temporal(&mut out, report);
    render_clusters(&mut out, report);
    if let Some(summary) = alerts {
        render_alerts(&mut out, summary);
    }

    let _ = writeln!(out, "---");
    let _ = writeln!(
        out,
        "Generated at {}",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );
    out
}

fn render_strong_pairs(out: &mut String, report: &CorrelationReport) {
    let _ = writeln!(out, "## Strong correlations");
    if report.strong_pairs.is_empty() {
        let _ = writeln!(out, "- No strong correlations found (|r| ≥ 0.7)");
    } else {
        for pair in report.strong_pairs.iter().take(MAX_PAIRS) {
            let _ = writeln!(
                out,
                "- **{}** vs **{}**: {} {} correlation of {:.3}",
                pair.var_a, pair.var_b, pair.strength, pair.direction, pair.coefficient
            );
        }
    }
    let _ = writeln!(out);
}

fn render_aqi_factors(out: &mut String, report: &CorrelationReport) {
    let Some(analysis) = &report.aqi_analysis else {
        return;
    };
    let _ = writeln!(out, "## Factors influencing air quality");
    for factor in &analysis.top_factors {
        if factor.coefficient.abs() <= FACTOR_MENTION_THRESHOLD {
            continue;
        }
        let relationship = if factor.coefficient > 0.0 {
            "air quality worsens as it rises"
        } else {
            "air quality improves as it rises"
        };
        let status = if factor.significant {
            "significant"
        } else {
            "not significant"
        };
        let _ = writeln!(
            out,
            "- **{}**: {relationship} (r = {:.3}, {status})",
            factor.factor, factor.coefficient
        );
    }
    let _ = writeln!(out);
}

fn render_temporal(out: &mut String, report: &CorrelationReport) {
    let Some(temporal) = &report.temporal else {
        return;
    };
    let significant: Vec<_> = temporal
        .daily_trends
        .iter()
        .filter(|t| t.significant)
        .collect();
    if significant.is_empty() {
        return;
    }
    let _ = writeln!(out, "## Temporal patterns");
    for trend in significant {
        let _ = writeln!(
            out,
            "- **{}**: {} trend (R² = {:.3})",
            trend.metric, trend.direction, trend.r_squared
        );
    }
    let _ = writeln!(out);
}

fn render_clusters(out: &mut String, report: &CorrelationReport) {
    let Some(clustering) = &report.clustering else {
        return;
    };
    let _ = writeln!(out, "## Environmental condition profiles");
    for (i, cluster) in clustering.clusters.iter().enumerate() {
        let _ = writeln!(
            out,
            "- **Profile {}** ({:.1}%): {}",
            i + 1,
            cluster.percentage,
            cluster.characteristics.join(", ")
        );
    }
    let _ = writeln!(out);
}

fn render_alerts(out: &mut String, summary: &AlertSummary) {
    let _ = writeln!(out, "## Active alerts");
    let _ = writeln!(out, "- Total: {}", summary.total);
    let _ = writeln!(out, "- Critical or above: {}", summary.critical_count);
    for (severity, count) in &summary.by_severity {
        let _ = writeln!(out, "- {severity}: {count}");
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::types::{
        CorrelationMatrix, CorrelationPair, CorrelationStrength,
    };

    fn report_with_pair() -> CorrelationReport {
        CorrelationReport {
            matrix: CorrelationMatrix {
                columns: vec!["temperature".to_string(), "aqi_us".to_string()],
                values: vec![vec![1.0, -0.95], vec![-0.95, 1.0]],
            },
            strong_pairs: vec![CorrelationPair {
                var_a: "temperature".to_string(),
                var_b: "aqi_us".to_string(),
                coefficient: -0.95,
                strength: CorrelationStrength::Strong,
                direction: CorrelationDirection::Negative,
            }],
            aqi_analysis: None,
            clustering: None,
            pca: None,
            temporal: None,
        }
    }

    #[test]
    fn strong_pair_rendered_with_direction() {
        let md = render_markdown(&report_with_pair(), None);
        assert!(md.contains("## Strong correlations"));
        assert!(md.contains("strong negative correlation of -0.950"));
    }

    #[test]
    fn empty_pairs_render_placeholder() {
        let mut report = report_with_pair();
        report.strong_pairs.clear();
        let md = render_markdown(&report, None);
        assert!(md.contains("No strong correlations found"));
    }

    #[test]
    fn alert_summary_section_present_when_given() {
        let summary = crate::alerts::summary::summarize(&[]);
        let md = render_markdown(&report_with_pair(), Some(&summary));
        assert!(md.contains("## Active alerts"));
        assert!(md.contains("- Total: 0"));
    }
}
