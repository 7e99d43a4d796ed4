use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Observability subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub log_level: String,
    /// Mean latency below which the engine reports itself production-ready (milliseconds).
    pub latency_threshold_ms: u64,
    /// Maximum query log entries retained.
    pub query_log_capacity: usize,
}

impl ObservabilityConfig {
    pub fn latency_threshold(&self) -> Duration {
        Duration::from_millis(self.latency_threshold_ms)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            latency_threshold_ms: defaults::DEFAULT_LATENCY_THRESHOLD_MS,
            query_log_capacity: defaults::DEFAULT_QUERY_LOG_CAPACITY,
        }
    }
}
