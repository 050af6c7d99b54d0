//! Pearson correlation matrix and strong-pair ranking.

use super::types::{
    CorrelationDirection, CorrelationMatrix, CorrelationPair, CorrelationStrength, FeatureMatrix,
};

/// Pearson correlation coefficient of two equal-length samples.
///
/// Returns `None` for fewer than 2 points or zero variance in either sample.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }

    let n_f = n as f64;
    let x_mean = xs.iter().sum::<f64>() / n_f;
    let y_mean = ys.iter().sum::<f64>() / n_f;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - x_mean;
        let dy = ys[i] - y_mean;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    // Floating-point rounding can push |r| a hair past 1.
    Some(r.clamp(-1.0, 1.0))
}

/// Full pairwise correlation matrix over pairwise-complete observations.
/// Diagonal entries are 1.0; pairs without enough overlap are NaN.
pub fn correlation_matrix(fm: &FeatureMatrix) -> CorrelationMatrix {
    let p = fm.n_columns();
    let mut values = vec![vec![f64::NAN; p]; p];

    for i in 0..p {
        values[i][i] = 1.0;
        for j in (i + 1)..p {
            let (xs, ys) = fm.pairwise_complete(i, j);
            let r = pearson(&xs, &ys).unwrap_or(f64::NAN);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: fm.columns().to_vec(),
        values,
    }
}

/// Pairs with |r| at or above `threshold`, scanned over the upper triangle
/// in iteration order and sorted descending by |r|. The sort is stable, so
/// ties keep the triangle iteration order.
pub fn strong_pairs(matrix: &CorrelationMatrix, threshold: f64) -> Vec<CorrelationPair> {
    let p = matrix.columns.len();
    let mut pairs = Vec::new();

    for i in 0..p {
        for j in (i + 1)..p {
            let r = matrix.values[i][j];
            if !r.is_finite() || r.abs() < threshold {
                continue;
            }
            pairs.push(CorrelationPair {
                var_a: matrix.columns[i].clone(),
                var_b: matrix.columns[j].clone(),
                coefficient: r,
                strength: if r.abs() >= 0.8 {
                    CorrelationStrength::Strong
                } else {
                    CorrelationStrength::Moderate
                },
                direction: if r > 0.0 {
                    CorrelationDirection::Positive
                } else {
                    CorrelationDirection::Negative
                },
            });
        }
    }

    pairs.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_positive_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_negative_correlation() {
        let xs = [10.0, 20.0, 30.0, 40.0];
        let ys = [100.0, 80.0, 60.0, 40.0];
        let r = pearson(&xs, &ys).unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_sample_has_no_coefficient() {
        let xs = [5.0, 5.0, 5.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(pearson(&xs, &ys).is_none());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let mut fm = FeatureMatrix::new(vec!["a".to_string(), "b".to_string()]);
        for i in 0..10 {
            fm.push_row(vec![Some(i as f64), Some((i * 2) as f64 + 1.0)]);
        }
        let m = correlation_matrix(&fm);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 1), m.get(1, 0));
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn anti_correlated_pair_is_strong_negative() {
        let mut fm = FeatureMatrix::new(vec!["temp".to_string(), "aqi".to_string()]);
        for (t, a) in [(10.0, 100.0), (20.0, 80.0), (30.0, 60.0), (40.0, 40.0)] {
            fm.push_row(vec![Some(t), Some(a)]);
        }
        let pairs = strong_pairs(&correlation_matrix(&fm), 0.7);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].strength, CorrelationStrength::Strong);
        assert_eq!(pairs[0].direction, CorrelationDirection::Negative);
        assert!((pairs[0].coefficient + 1.0).abs() < 1e-9);
    }

    #[test]
    fn pairs_sorted_by_absolute_magnitude() {
        // Three columns: a ~ b weakly vs a ~ c perfectly.
        let mut fm = FeatureMatrix::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        let b_vals = [1.0, 2.5, 2.0, 4.5, 4.0, 6.5];
        for (i, b) in b_vals.iter().enumerate() {
            let x = i as f64;
            fm.push_row(vec![Some(x), Some(*b), Some(-x)]);
        }
        let pairs = strong_pairs(&correlation_matrix(&fm), 0.7);
        assert!(pairs.len() >= 2);
        assert!(pairs[0].coefficient.abs() >= pairs[1].coefficient.abs());
        // The perfect a~c pair ranks first.
        assert_eq!(pairs[0].var_b, "c");
    }

    #[test]
    fn weak_pairs_not_reported() {
        let mut fm = FeatureMatrix::new(vec!["a".to_string(), "b".to_string()]);
        // Alternating values: near-zero correlation with the ramp.
        for (i, b) in [5.0, -3.0, 4.0, -4.0, 3.0, -5.0].iter().enumerate() {
            fm.push_row(vec![Some(i as f64), Some(*b)]);
        }
        let pairs = strong_pairs(&correlation_matrix(&fm), 0.7);
        assert!(pairs.is_empty());
    }
}
