//! Query counters and running mean latency.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tracks queries processed, cache hits and mean latency.
///
/// The mean is updated incrementally, one sample per query, cache hits
/// included: `avg' = (avg * (n - 1) + sample) / n`.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    queries_processed: u64,
    cache_hits: u64,
    latency_samples: u64,
    avg_latency_secs: f64,
    latency_threshold: Duration,
}

/// Point-in-time view of the monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub queries_processed: u64,
    pub cache_hits: u64,
    /// Cache hits as a percentage of queries processed.
    pub cache_hit_rate: f64,
    pub avg_response_time_ms: f64,
    /// Mean latency is under the configured threshold.
    pub production_ready: bool,
}

impl PerformanceMonitor {
    pub fn new(latency_threshold: Duration) -> Self {
        Self {
            queries_processed: 0,
            cache_hits: 0,
            latency_samples: 0,
            avg_latency_secs: 0.0,
            latency_threshold,
        }
    }

    /// Record one finished query and its wall-clock latency.
    pub fn record_query(&mut self, latency: Duration) {
        self.queries_processed += 1;
        self.latency_samples += 1;
        let n = self.latency_samples as f64;
        self.avg_latency_secs = (self.avg_latency_secs * (n - 1.0) + latency.as_secs_f64()) / n;
    }

    /// Record a hit in either the embedding cache or the query cache.
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn avg_latency(&self) -> Duration {
        Duration::from_secs_f64(self.avg_latency_secs)
    }

    pub fn stats(&self) -> PerformanceStats {
        let denom = self.queries_processed.max(1) as f64;
        PerformanceStats {
            queries_processed: self.queries_processed,
            cache_hits: self.cache_hits,
            cache_hit_rate: self.cache_hits as f64 / denom * 100.0,
            avg_response_time_ms: self.avg_latency_secs * 1000.0,
            production_ready: self.avg_latency_secs < self.latency_threshold.as_secs_f64(),
        }
    }
}
