//! Threshold evaluator: one reading in, zero or more alerts out.
//!
//! AQI is bracketed — only the highest crossed bracket fires. Temperature
//! bounds are independent checks. Wind is evaluated top-down with a
//! short-circuit so only the higher threshold fires. Missing metrics are
//! skipped silently.

use aeris_core::{AlertThresholds, Reading};
use chrono::Utc;

use super::types::{Alert, AlertKind, Severity};

/// Evaluates one reading against the static threshold table.
#[derive(Debug, Clone)]
pub struct ThresholdEvaluator {
    thresholds: AlertThresholds,
}

impl ThresholdEvaluator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Evaluate all metric families for one reading.
    pub fn evaluate(&self, reading: &Reading) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let location = reading.location_label();

        if let Some(alert) = self.evaluate_air_quality(reading, &location) {
            alerts.push(alert);
        }
        alerts.extend(self.evaluate_temperature(reading, &location));
        if let Some(alert) = self.evaluate_wind(reading, &location) {
            alerts.push(alert);
        }

        alerts
    }

    /// At most one air-quality alert: the highest bracket crossed.
    fn evaluate_air_quality(&self, reading: &Reading, location: &str) -> Option<Alert> {
        let aqi = reading.aqi_us?;
        let t = &self.thresholds;

        let (severity, threshold, title, description, recommendations) = if aqi >= t.aqi_hazardous {
            (
                Severity::Emergency,
                t.aqi_hazardous,
                "Hazardous air quality",
                format!("Air quality index is extremely high: {aqi:.0}"),
                recommendations_hazardous(),
            )
        } else if aqi >= t.aqi_very_unhealthy {
            (
                Severity::Critical,
                t.aqi_very_unhealthy,
                "Very unhealthy air quality",
                format!("Air quality is very harmful to health: {aqi:.0}"),
                recommendations_very_unhealthy(),
            )
        } else if aqi >= t.aqi_unhealthy {
            (
                Severity::Critical,
                t.aqi_unhealthy,
                "Unhealthy air quality",
                format!("Air quality is harmful to health: {aqi:.0}"),
                recommendations_unhealthy(),
            )
        } else if aqi >= t.aqi_unhealthy_sensitive {
            (
                Severity::Warning,
                t.aqi_unhealthy_sensitive,
                "Air quality unhealthy for sensitive groups",
                format!("Air quality may affect sensitive individuals: {aqi:.0}"),
                recommendations_unhealthy_sensitive(),
            )
        } else if aqi >= t.aqi_moderate {
            (
                Severity::Info,
                t.aqi_moderate,
                "Moderate air quality",
                format!("Air quality is acceptable for most people: {aqi:.0}"),
                recommendations_moderate(),
            )
        } else {
            return None;
        };

        Some(Alert {
            kind: AlertKind::AirQuality,
            severity,
            title: title.to_string(),
            description,
            location: location.to_string(),
            value: aqi,
            threshold,
            timestamp: Utc::now(),
            recommendations,
        })
    }

    /// Upper and lower temperature bounds are independent checks; either,
    /// both, or neither may fire.
    fn evaluate_temperature(&self, reading: &Reading, location: &str) -> Vec<Alert> {
        let mut alerts = Vec::new();
        let Some(temp) = reading.temperature else {
            return alerts;
        };
        let t = &self.thresholds;

        if temp >= t.temp_extreme_high {
            alerts.push(Alert {
                kind: AlertKind::Temperature,
                severity: Severity::Warning,
                title: "Extremely high temperature".to_string(),
                description: format!("Temperature is very high: {temp:.1} °C"),
                location: location.to_string(),
                value: temp,
                threshold: t.temp_extreme_high,
                timestamp: Utc::now(),
                recommendations: vec![
                    "Avoid prolonged sun exposure".to_string(),
                    "Stay hydrated".to_string(),
                    "Wear light clothing and sunscreen".to_string(),
                    "Seek air-conditioned environments".to_string(),
                ],
            });
        }
        if temp <= t.temp_extreme_low {
            alerts.push(Alert {
                kind: AlertKind::Temperature,
                severity: Severity::Warning,
                title: "Extremely low temperature".to_string(),
                description: format!("Temperature is very low: {temp:.1} °C"),
                location: location.to_string(),
                value: temp,
                threshold: t.temp_extreme_low,
                timestamp: Utc::now(),
                recommendations: vec![
                    "Dress appropriately for the cold".to_string(),
                    "Avoid prolonged exposure".to_string(),
                    "Protect extremities".to_string(),
                    "Keep warm".to_string(),
                ],
            });
        }

        alerts
    }

    /// Wind thresholds are evaluated top-down; only the higher one fires.
    fn evaluate_wind(&self, reading: &Reading, location: &str) -> Option<Alert> {
        let wind = reading.wind_speed?;
        let t = &self.thresholds;

        if wind >= t.wind_extreme {
            Some(Alert {
                kind: AlertKind::Wind,
                severity: Severity::Critical,
                title: "Extreme winds".to_string(),
                description: format!("Very strong winds: {wind:.1} m/s"),
                location: location.to_string(),
                value: wind,
                threshold: t.wind_extreme,
                timestamp: Utc::now(),
                recommendations: vec![
                    "Avoid outdoor activities".to_string(),
                    "Watch for flying debris".to_string(),
                    "Stay clear of trees and tall structures".to_string(),
                    "Drive with extreme caution".to_string(),
                ],
            })
        } else if wind >= t.wind_strong {
            Some(Alert {
                kind: AlertKind::Wind,
                severity: Severity::Warning,
                title: "Strong winds".to_string(),
                description: format!("Strong winds: {wind:.1} m/s"),
                location: location.to_string(),
                value: wind,
                threshold: t.wind_strong,
                timestamp: Utc::now(),
                recommendations: vec![
                    "Take care when walking".to_string(),
                    "Drive attentively".to_string(),
                    "Secure loose objects".to_string(),
                ],
            })
        } else {
            None
        }
    }
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}

fn recommendations_moderate() -> Vec<String> {
    vec![
        "Sensitive people should consider reducing outdoor activity".to_string(),
        "Monitor symptoms if you have respiratory conditions".to_string(),
    ]
}

fn recommendations_unhealthy_sensitive() -> Vec<String> {
    vec![
        "People with heart or lung disease should avoid outdoor exertion".to_string(),
        "Elderly people and children should limit time outdoors".to_string(),
        "Wear a protective mask if you must go outside".to_string(),
    ]
}

fn recommendations_unhealthy() -> Vec<String> {
    vec![
        "Everyone should avoid prolonged outdoor activity".to_string(),
        "Use N95 or better protective masks".to_string(),
        "Keep windows closed and use air purifiers".to_string(),
    ]
}

fn recommendations_very_unhealthy() -> Vec<String> {
    vec![
        "Avoid all outdoor activity".to_string(),
        "Sensitive people should remain indoors".to_string(),
        "Seek medical attention if you develop respiratory symptoms".to_string(),
    ]
}

fn recommendations_hazardous() -> Vec<String> {
    vec![
        "EMERGENCY: avoid all outdoor exposure".to_string(),
        "Shelter indoors immediately".to_string(),
        "Contact emergency services if necessary".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(temp: Option<f64>, wind: Option<f64>, aqi: Option<f64>) -> Reading {
        Reading {
            timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
            city: "Lisbon".to_string(),
            country: "PT".to_string(),
            temperature: temp,
            humidity: None,
            pressure: None,
            wind_speed: wind,
            aqi_us: aqi,
        }
    }

    #[test]
    fn hazardous_aqi_is_emergency() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(None, None, Some(320.0)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::AirQuality);
        assert_eq!(alerts[0].severity, Severity::Emergency);
        assert_eq!(alerts[0].threshold, 301.0);
    }

    #[test]
    fn only_highest_aqi_bracket_fires() {
        let evaluator = ThresholdEvaluator::default();
        // 180 crosses moderate, sensitive, and unhealthy — only unhealthy fires.
        let alerts = evaluator.evaluate(&reading(None, None, Some(180.0)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].threshold, 151.0);
    }

    #[test]
    fn clean_air_produces_no_alert() {
        let evaluator = ThresholdEvaluator::default();
        assert!(evaluator.evaluate(&reading(None, None, Some(30.0))).is_empty());
    }

    #[test]
    fn high_temperature_warns_with_threshold() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(Some(42.0), None, None));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Temperature);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[0].threshold, 40.0);
    }

    #[test]
    fn low_temperature_warns() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(Some(-15.0), None, None));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].threshold, -10.0);
    }

    #[test]
    fn mild_temperature_is_silent() {
        let evaluator = ThresholdEvaluator::default();
        assert!(evaluator.evaluate(&reading(Some(22.0), None, None)).is_empty());
    }

    #[test]
    fn extreme_wind_suppresses_strong() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(None, Some(30.0), None));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].threshold, 25.0);
    }

    #[test]
    fn strong_wind_warns() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(None, Some(18.0), None));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn missing_metrics_are_skipped_silently() {
        let evaluator = ThresholdEvaluator::default();
        assert!(evaluator.evaluate(&reading(None, None, None)).is_empty());
    }

    #[test]
    fn independent_families_can_all_fire() {
        let evaluator = ThresholdEvaluator::default();
        let alerts = evaluator.evaluate(&reading(Some(45.0), Some(30.0), Some(320.0)));
        assert_eq!(alerts.len(), 3);
    }
}
