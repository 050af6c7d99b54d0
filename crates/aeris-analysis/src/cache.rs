//! Analysis result cache.
//!
//! Explicit cache object with a controlled lifecycle, owned by the analyzer
//! and injectable in tests. `moka::sync::Cache` keyed by call signature with
//! a time-based expiry. Concurrent callers may race on a miss; duplicate
//! recomputation is tolerated rather than locked out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use crate::correlation::types::CorrelationReport;

/// Maximum cached reports.
const MAX_ENTRIES: u64 = 256;

/// TTL-bounded cache of correlation reports with hit/miss tracking.
pub struct AnalysisCache {
    cache: Cache<String, Arc<CorrelationReport>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnalysisCache {
    /// Create a cache whose entries expire after `ttl_secs`.
    pub fn new(ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<CorrelationReport>> {
        match self.cache.get(key) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: String, report: Arc<CorrelationReport>) {
        self.cache.insert(key, report);
    }

    /// Drop all cached reports (e.g. after new readings are collected).
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate in 0.0–1.0.
    pub fn hit_rate(&self) -> f64 {
        let h = self.hits() as f64;
        let m = self.misses() as f64;
        let total = h + m;
        if total == 0.0 {
            0.0
        } else {
            h / total
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::types::CorrelationMatrix;

    fn empty_report() -> Arc<CorrelationReport> {
        Arc::new(CorrelationReport {
            matrix: CorrelationMatrix {
                columns: vec![],
                values: vec![],
            },
            strong_pairs: vec![],
            aqi_analysis: None,
            clustering: None,
            pca: None,
            temporal: None,
        })
    }

    #[test]
    fn get_after_insert_hits() {
        let cache = AnalysisCache::default();
        assert!(cache.get("k").is_none());
        cache.insert("k".to_string(), empty_report());
        assert!(cache.get("k").is_some());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn invalidate_all_empties_cache() {
        let cache = AnalysisCache::default();
        cache.insert("k".to_string(), empty_report());
        cache.invalidate_all();
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn hit_rate_zero_when_untouched() {
        let cache = AnalysisCache::default();
        assert_eq!(cache.hit_rate(), 0.0);
    }
}
