//! Pearson significance testing for the AQI factor analysis.
//!
//! Two-sided p-values via the Student's t transform of the sample
//! coefficient, using `statrs` for the t-distribution CDF.

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::matrix::pearson;
use super::types::{AqiFactorAnalysis, FactorCorrelation, FeatureMatrix};

/// Fixed predictor list tested against the AQI target.
const AQI_PREDICTORS: &[&str] = &["temperature", "humidity", "pressure", "wind_speed"];

/// Pearson r with a two-sided p-value. Requires at least 3 paired points.
///
/// t = r·sqrt((n−2)/(1−r²)), p = 2·(1 − CDF_t(|t|, n−2)).
pub fn pearson_significance(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len();
    if n < 3 {
        return None;
    }
    let r = pearson(xs, ys)?;

    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= f64::EPSILON {
        // Perfectly (anti-)correlated: the test statistic diverges.
        return Some((r, 0.0));
    }

    let t = r * (df / denom).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => {
            let p = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);
            Some((r, p))
        }
        Err(_) => None,
    }
}

/// Test each meteorological predictor against the AQI column.
///
/// Rows with a null in either column are pairwise-dropped before each test.
/// Returns `None` when the AQI column is absent or carries fewer than
/// `min_rows` non-null values.
pub fn aqi_factor_analysis(
    fm: &FeatureMatrix,
    alpha: f64,
    min_rows: usize,
) -> Option<AqiFactorAnalysis> {
    let target = fm.column_index("aqi_us")?;
    if fm.column_values(target).len() < min_rows {
        tracing::warn!(min_rows, "not enough AQI samples for factor analysis");
        return None;
    }

    let mut factors = Vec::new();
    for name in AQI_PREDICTORS {
        let Some(idx) = fm.column_index(name) else {
            continue;
        };
        let (aqi, factor) = fm.pairwise_complete(target, idx);
        if let Some((r, p)) = pearson_significance(&aqi, &factor) {
            factors.push(FactorCorrelation {
                factor: (*name).to_string(),
                coefficient: r,
                p_value: p,
                significant: p < alpha,
            });
        }
    }

    if factors.is_empty() {
        return None;
    }

    let mut top_factors = factors.clone();
    top_factors.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_factors.truncate(3);

    Some(AqiFactorAnalysis {
        factors,
        top_factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_correlation_has_zero_p() {
        let xs: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 1.0).collect();
        let (r, p) = pearson_significance(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn strong_linear_relation_is_significant() {
        let xs: Vec<f64> = (0..20).map(|i| i as f64).collect();
        // Linear with mild deterministic wobble.
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 2.0 * x + if (*x as usize) % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let (r, p) = pearson_significance(&xs, &ys).unwrap();
        assert!(r > 0.99);
        assert!(p < 0.05);
    }

    #[test]
    fn two_points_are_not_testable() {
        assert!(pearson_significance(&[1.0, 2.0], &[3.0, 4.0]).is_none());
    }

    #[test]
    fn factor_analysis_ranks_by_magnitude() {
        let mut fm = FeatureMatrix::new(vec![
            "temperature".to_string(),
            "humidity".to_string(),
            "aqi_us".to_string(),
        ]);
        for i in 0..15 {
            let x = i as f64;
            // AQI tracks temperature perfectly; humidity wobbles.
            let hum = if i % 2 == 0 { 40.0 + x } else { 60.0 - x };
            fm.push_row(vec![Some(x), Some(hum), Some(10.0 * x)]);
        }
        let analysis = aqi_factor_analysis(&fm, 0.05, 10).unwrap();
        assert_eq!(analysis.top_factors[0].factor, "temperature");
        assert!(analysis.top_factors[0].significant);
    }

    #[test]
    fn missing_aqi_column_yields_none() {
        let fm = FeatureMatrix::new(vec!["temperature".to_string()]);
        assert!(aqi_factor_analysis(&fm, 0.05, 10).is_none());
    }

    #[test]
    fn sparse_aqi_yields_none() {
        let mut fm = FeatureMatrix::new(vec![
            "temperature".to_string(),
            "aqi_us".to_string(),
        ]);
        for i in 0..15 {
            let aqi = if i < 3 { Some(50.0) } else { None };
            fm.push_row(vec![Some(i as f64), aqi]);
        }
        assert!(aqi_factor_analysis(&fm, 0.05, 10).is_none());
    }
}
