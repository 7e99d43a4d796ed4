//! [`ObservabilityEngine`]: owns the performance monitor, query log and
//! degradation tracker behind their own locks so it can be shared by
//! concurrent searches.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sieve_core::config::ObservabilityConfig;
use sieve_core::constants::VERSION;
use sieve_core::errors::SieveResult;
use sieve_core::models::DegradationEvent;

use crate::degradation::{DegradationTracker, TrackedDegradation};
use crate::monitor::{PerformanceMonitor, PerformanceStats};
use crate::query_log::{QueryLog, QueryLogEntry};

#[derive(Debug)]
pub struct ObservabilityEngine {
    monitor: Mutex<PerformanceMonitor>,
    degradation: Mutex<DegradationTracker>,
    query_log: Mutex<QueryLog>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ObservabilityEngine {
    pub fn new(config: &ObservabilityConfig) -> Self {
        Self {
            monitor: Mutex::new(PerformanceMonitor::new(config.latency_threshold())),
            degradation: Mutex::new(DegradationTracker::with_capacity(config.query_log_capacity)),
            query_log: Mutex::new(QueryLog::with_capacity(config.query_log_capacity)),
        }
    }

    /// Record a finished query: one latency sample plus a log entry.
    pub fn record_query(&self, entry: QueryLogEntry) {
        lock(&self.monitor).record_query(entry.latency);
        lock(&self.query_log).record(entry);
    }

    pub fn record_cache_hit(&self) {
        lock(&self.monitor).record_cache_hit();
    }

    pub fn record_degradation(&self, event: DegradationEvent) {
        lock(&self.degradation).record(event);
    }

    pub fn mark_recovered(&self, component: &str) -> usize {
        lock(&self.degradation).mark_recovered(component)
    }

    pub fn stats(&self) -> PerformanceStats {
        lock(&self.monitor).stats()
    }

    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        lock(&self.degradation).active().into_iter().cloned().collect()
    }

    pub fn degradation_count(&self, component: &str) -> usize {
        lock(&self.degradation).count_for(component)
    }

    pub fn query_count(&self) -> usize {
        lock(&self.query_log).count()
    }

    pub fn last_query(&self) -> Option<QueryLogEntry> {
        lock(&self.query_log).last().cloned()
    }

    pub fn latency_percentile(&self, p: f64) -> Duration {
        lock(&self.query_log).latency_percentile(p)
    }

    /// Serialize current statistics, latency percentiles and active
    /// degradations to JSON.
    pub fn metrics_snapshot(&self) -> SieveResult<serde_json::Value> {
        let stats = serde_json::to_value(self.stats())?;
        let active = serde_json::to_value(self.active_degradations())?;
        Ok(serde_json::json!({
            "version": VERSION,
            "performance": stats,
            "query_log_count": self.query_count(),
            "latency_p50_ms": self.latency_percentile(0.5).as_millis() as u64,
            "latency_p95_ms": self.latency_percentile(0.95).as_millis() as u64,
            "active_degradations": active,
        }))
    }
}

impl Default for ObservabilityEngine {
    fn default() -> Self {
        Self::new(&ObservabilityConfig::default())
    }
}
