//! Principal-component decomposition of the standardized feature matrix.
//!
//! Eigen-decomposition of the correlation matrix via `nalgebra`'s symmetric
//! eigen solver. Reports explained-variance ratios and the component count
//! needed to reach 90% cumulative variance.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

use super::types::{FeatureMatrix, PcaReport};

const MIN_COMPLETE_ROWS: usize = 10;
const REPORTED_COMPONENTS: usize = 5;
const LOADING_COMPONENTS: usize = 3;
const VARIANCE_TARGET: f64 = 0.9;

/// Run the PCA pass. Returns `None` when fewer than 10 complete rows survive
/// null dropping or there are fewer than 3 columns.
pub fn pca_analysis(fm: &FeatureMatrix) -> Option<PcaReport> {
    let rows = fm.complete_rows();
    let p = fm.n_columns();
    if rows.len() < MIN_COMPLETE_ROWS || p < 3 {
        tracing::warn!(
            complete_rows = rows.len(),
            columns = p,
            "not enough data for PCA"
        );
        return None;
    }

    let n = rows.len();
    let z = standardized_matrix(&rows, n, p);

    // Correlation matrix of standardized columns: (Zᵀ Z) / (n − 1).
    let corr = (z.transpose() * &z) / (n as f64 - 1.0);
    let eigen = corr.symmetric_eigen();

    // Order components by descending eigenvalue.
    let mut order: Vec<usize> = (0..p).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Numerical noise can make near-zero eigenvalues slightly negative.
    let eigenvalues: Vec<f64> = order
        .iter()
        .map(|&i| eigen.eigenvalues[i].max(0.0))
        .collect();
    let total: f64 = eigenvalues.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let ratios: Vec<f64> = eigenvalues.iter().map(|v| v / total).collect();
    let mut cumulative = Vec::with_capacity(ratios.len());
    let mut running = 0.0;
    for r in &ratios {
        running += r;
        cumulative.push(running);
    }

    let n_components_90 = cumulative
        .iter()
        .position(|&c| c >= VARIANCE_TARGET)
        .map(|i| i + 1)
        .unwrap_or(ratios.len());

    let components = order
        .iter()
        .take(LOADING_COMPONENTS)
        .map(|&comp| {
            let column = eigen.eigenvectors.column(comp);
            fm.columns()
                .iter()
                .enumerate()
                .map(|(row, name)| (name.clone(), column[row]))
                .collect::<BTreeMap<String, f64>>()
        })
        .collect();

    Some(PcaReport {
        explained_variance: ratios.iter().copied().take(REPORTED_COMPONENTS).collect(),
        cumulative_variance: cumulative.iter().copied().take(REPORTED_COMPONENTS).collect(),
        components,
        n_components_90,
    })
}

/// Column-standardized data as an n×p matrix. Zero-variance columns map
/// to zero.
fn standardized_matrix(rows: &[Vec<f64>], n: usize, p: usize) -> DMatrix<f64> {
    let n_f = n as f64;
    let mut means = vec![0.0; p];
    let mut stds = vec![0.0; p];
    for j in 0..p {
        means[j] = rows.iter().map(|r| r[j]).sum::<f64>() / n_f;
        let var = rows.iter().map(|r| (r[j] - means[j]).powi(2)).sum::<f64>() / (n_f - 1.0);
        stds[j] = var.sqrt();
    }

    DMatrix::from_fn(n, p, |i, j| {
        if stds[j] > f64::EPSILON {
            (rows[i][j] - means[j]) / stds[j]
        } else {
            0.0
        }
    })
}
