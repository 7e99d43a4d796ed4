//! Per-query log: query text, latency, result count, cache hit, lexical status.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub top_k: usize,
    pub latency: Duration,
    pub result_count: usize,
    pub cache_hit: bool,
    pub lexical_status: String,
    pub partitions_failed: usize,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    pub fn new(query: impl Into<String>, top_k: usize, latency: Duration) -> Self {
        Self {
            query: query.into(),
            top_k,
            latency,
            result_count: 0,
            cache_hit: false,
            lexical_status: String::new(),
            partitions_failed: 0,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded query log; the oldest entries fall off once full.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            top_k = entry.top_k,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            cache_hit = entry.cache_hit,
            lexical = %entry.lexical_status,
            "query logged"
        );
        if self.max_entries == 0 {
            return;
        }
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &QueryLogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&QueryLogEntry> {
        self.entries.back()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Latency at the given percentile (0.0 to 1.0).
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::with_capacity(sieve_core::config::defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_oldest_when_full() {
        let mut log = QueryLog::with_capacity(2);
        for q in ["a", "b", "c"] {
            log.record(QueryLogEntry::new(q, 4, Duration::from_millis(1)));
        }
        let queries: Vec<_> = log.entries().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["b", "c"]);
    }

    #[test]
    fn percentile_picks_nearest_rank() {
        let mut log = QueryLog::with_capacity(10);
        for ms in [10u64, 20, 30, 40, 50] {
            log.record(QueryLogEntry::new("q", 4, Duration::from_millis(ms)));
        }
        assert_eq!(log.latency_percentile(0.5), Duration::from_millis(30));
        assert_eq!(log.latency_percentile(1.0), Duration::from_millis(50));
    }
}
