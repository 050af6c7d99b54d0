//! Fixed-k clustering of environmental conditions.
//!
//! Lloyd's k-means over standardized complete rows, with deterministic
//! farthest-first initialization so results are reproducible without a
//! random seed. Cluster profiles report centroid means on the original
//! scale plus rule-based natural-language labels.

use std::collections::BTreeMap;

use super::types::{ClusterProfile, ClusteringReport, FeatureMatrix};

const MAX_ITERATIONS: usize = 100;
const MIN_COMPLETE_ROWS: usize = 10;

/// Run the clustering pass. Returns `None` when fewer than 10 complete rows
/// survive null dropping, or when there are not enough distinct points to
/// seat `k` centroids.
pub fn cluster_analysis(fm: &FeatureMatrix, k: usize) -> Option<ClusteringReport> {
    let rows = fm.complete_rows();
    if rows.len() < MIN_COMPLETE_ROWS || rows.len() <= k {
        tracing::warn!(
            complete_rows = rows.len(),
            "not enough complete rows for clustering"
        );
        return None;
    }

    let standardized = standardize(&rows);
    let labels = kmeans(&standardized, k)?;

    let mut clusters = Vec::with_capacity(k);
    for cluster in 0..k {
        let members: Vec<&Vec<f64>> = rows
            .iter()
            .zip(&labels)
            .filter(|(_, &l)| l == cluster)
            .map(|(row, _)| row)
            .collect();

        let mut means = BTreeMap::new();
        for (col_idx, name) in fm.columns().iter().enumerate() {
            let mean = members.iter().map(|r| r[col_idx]).sum::<f64>() / members.len().max(1) as f64;
            means.insert(name.clone(), mean);
        }

        clusters.push(ClusterProfile {
            size: members.len(),
            percentage: members.len() as f64 / rows.len() as f64 * 100.0,
            characteristics: describe_cluster(&means),
            means,
        });
    }

    Some(ClusteringReport {
        k,
        silhouette: silhouette(&standardized, &labels, k),
        clusters,
    })
}

/// Z-score standardize each column. Zero-variance columns map to 0.
fn standardize(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = rows.len();
    let p = rows[0].len();
    let n_f = n as f64;

    let mut means = vec![0.0; p];
    let mut stds = vec![0.0; p];
    for j in 0..p {
        means[j] = rows.iter().map(|r| r[j]).sum::<f64>() / n_f;
        let var = rows.iter().map(|r| (r[j] - means[j]).powi(2)).sum::<f64>() / n_f;
        stds[j] = var.sqrt();
    }

    rows.iter()
        .map(|row| {
            (0..p)
                .map(|j| {
                    if stds[j] > f64::EPSILON {
                        (row[j] - means[j]) / stds[j]
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Lloyd's algorithm with farthest-first initialization.
fn kmeans(data: &[Vec<f64>], k: usize) -> Option<Vec<usize>> {
    if data.len() <= k || k == 0 {
        return None;
    }

    let mut centroids = initial_centroids(data, k);
    let mut labels = vec![0usize; data.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, point) in data.iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids);
            if labels[i] != nearest {
                labels[i] = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let members: Vec<&Vec<f64>> = data
                .iter()
                .zip(&labels)
                .filter(|(_, &l)| l == cluster)
                .map(|(p, _)| p)
                .collect();
            if members.is_empty() {
                continue; // Keep the old centroid for an emptied cluster.
            }
            for (j, c) in centroid.iter_mut().enumerate() {
                *c = members.iter().map(|m| m[j]).sum::<f64>() / members.len() as f64;
            }
        }
    }

    Some(labels)
}

/// Farthest-first seeding: start from point 0, then repeatedly pick the
/// point farthest from all chosen centroids.
fn initial_centroids(data: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
    let mut centroids = vec![data[0].clone()];
    while centroids.len() < k {
        let farthest = data
            .iter()
            .max_by(|a, b| {
                let da = min_distance_sq(a, &centroids);
                let db = min_distance_sq(b, &centroids);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("data is non-empty");
        centroids.push(farthest.clone());
    }
    centroids
}

fn min_distance_sq(point: &[f64], centroids: &[Vec<f64>]) -> f64 {
    centroids
        .iter()
        .map(|c| distance_sq(point, c))
        .fold(f64::INFINITY, f64::min)
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = distance_sq(point, c);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Mean silhouette coefficient: for each point, (b − a) / max(a, b) where
/// a is the mean intra-cluster distance and b the nearest other cluster's
/// mean distance.
fn silhouette(data: &[Vec<f64>], labels: &[usize], k: usize) -> f64 {
    let n = data.len();
    let mut total = 0.0;
    let mut counted = 0;

    for i in 0..n {
        let own = labels[i];
        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for j in 0..n {
            if i == j {
                continue;
            }
            sums[labels[j]] += distance_sq(&data[i], &data[j]).sqrt();
            counts[labels[j]] += 1;
        }

        if counts[own] == 0 {
            continue; // Singleton cluster contributes nothing.
        }
        let a = sums[own] / counts[own] as f64;
        let b = (0..k)
            .filter(|&c| c != own && counts[c] > 0)
            .map(|c| sums[c] / counts[c] as f64)
            .fold(f64::INFINITY, f64::min);
        if !b.is_finite() {
            continue;
        }

        total += (b - a) / a.max(b);
        counted += 1;
    }

    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}

/// Rule-based natural-language labels for a cluster's centroid means.
fn describe_cluster(means: &BTreeMap<String, f64>) -> Vec<String> {
    let mut characteristics = Vec::new();

    if let Some(&temp) = means.get("temperature") {
        if temp > 30.0 {
            characteristics.push("hot conditions".to_string());
        } else if temp < 10.0 {
            characteristics.push("cold conditions".to_string());
        }
    }
    if let Some(&humidity) = means.get("humidity") {
        if humidity > 80.0 {
            characteristics.push("high humidity".to_string());
        } else if humidity < 30.0 {
            characteristics.push("low humidity".to_string());
        }
    }
    if let Some(&aqi) = means.get("aqi_us") {
        if aqi > 100.0 {
            characteristics.push("unhealthy air quality".to_string());
        } else if aqi < 50.0 {
            characteristics.push("good air quality".to_string());
        }
    }
    if let Some(&wind) = means.get("wind_speed") {
        if wind > 10.0 {
            characteristics.push("strong winds".to_string());
        } else if wind < 2.0 {
            characteristics.push("calm winds".to_string());
        }
    }

    if characteristics.is_empty() {
        characteristics.push("normal conditions".to_string());
    }
    characteristics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_blob_matrix() -> FeatureMatrix {
        let mut fm = FeatureMatrix::new(vec![
            "temperature".to_string(),
            "aqi_us".to_string(),
        ]);
        // Three well-separated blobs of 20 points each.
        for i in 0..20 {
            let jitter = (i % 5) as f64 * 0.1;
            fm.push_row(vec![Some(5.0 + jitter), Some(30.0 + jitter)]);
            fm.push_row(vec![Some(35.0 + jitter), Some(150.0 + jitter)]);
            fm.push_row(vec![Some(20.0 + jitter), Some(70.0 + jitter)]);
        }
        fm
    }

    #[test]
    fn three_blobs_yield_three_balanced_clusters() {
        let report = cluster_analysis(&three_blob_matrix(), 3).unwrap();
        assert_eq!(report.k, 3);
        assert_eq!(report.clusters.len(), 3);
        for cluster in &report.clusters {
            assert_eq!(cluster.size, 20);
            assert!((cluster.percentage - 100.0 / 3.0).abs() < 1e-6);
        }
        assert!(report.silhouette > 0.5, "well-separated blobs should score high");
    }

    #[test]
    fn cluster_labels_reflect_centroid_means() {
        let report = cluster_analysis(&three_blob_matrix(), 3).unwrap();
        let hot = report
            .clusters
            .iter()
            .find(|c| c.means["temperature"] > 30.0)
            .unwrap();
        assert!(hot.characteristics.contains(&"hot conditions".to_string()));
        assert!(hot
            .characteristics
            .contains(&"unhealthy air quality".to_string()));

        let cold = report
            .clusters
            .iter()
            .find(|c| c.means["temperature"] < 10.0)
            .unwrap();
        assert!(cold.characteristics.contains(&"good air quality".to_string()));
    }

    #[test]
    fn too_few_rows_is_none() {
        let mut fm = FeatureMatrix::new(vec!["a".to_string()]);
        for i in 0..5 {
            fm.push_row(vec![Some(i as f64)]);
        }
        assert!(cluster_analysis(&fm, 3).is_none());
    }

    #[test]
    fn nulls_are_dropped_before_clustering() {
        let mut fm = FeatureMatrix::new(vec!["a".to_string(), "b".to_string()]);
        for i in 0..30 {
            fm.push_row(vec![Some(i as f64), Some((i % 3) as f64 * 10.0)]);
        }
        // Rows with nulls never reach the distance computation.
        for _ in 0..10 {
            fm.push_row(vec![None, Some(1.0)]);
        }
        let report = cluster_analysis(&fm, 3).unwrap();
        let total: usize = report.clusters.iter().map(|c| c.size).sum();
        assert_eq!(total, 30);
    }

    #[test]
    fn unremarkable_centroid_is_normal_conditions() {
        let mut means = BTreeMap::new();
        means.insert("temperature".to_string(), 20.0);
        means.insert("humidity".to_string(), 50.0);
        means.insert("aqi_us".to_string(), 75.0);
        means.insert("wind_speed".to_string(), 5.0);
        assert_eq!(describe_cluster(&means), vec!["normal conditions".to_string()]);
    }
}
