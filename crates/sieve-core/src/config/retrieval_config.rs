use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Result count used when the caller does not pass one.
    pub default_top_k: usize,
    /// Lower bound on semantic tags selected per query.
    pub min_namespaces: usize,
    /// Upper bound on semantic tags selected per query.
    pub max_namespaces: usize,
    /// Weight applied to vector similarity scores during fusion.
    pub vector_weight: f64,
    /// Weight applied to BM25 scores during fusion.
    pub lexical_weight: f64,
    /// Per-rank linear decay applied to every contribution.
    pub rank_decay: f64,
    /// Fused-result cache max entries. 0 disables caching.
    pub query_cache_capacity: usize,
    /// Deadline for each partition query during concurrent fan-out (milliseconds).
    pub partition_timeout_ms: u64,
    /// Query partitions concurrently instead of one after another.
    pub concurrent_fanout: bool,
    /// How long a query waits for a still-building lexical index (milliseconds).
    pub lexical_wait_ms: u64,
}

impl RetrievalConfig {
    pub fn partition_timeout(&self) -> Duration {
        Duration::from_millis(self.partition_timeout_ms)
    }

    pub fn lexical_wait(&self) -> Duration {
        Duration::from_millis(self.lexical_wait_ms)
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: defaults::DEFAULT_TOP_K,
            min_namespaces: defaults::DEFAULT_MIN_NAMESPACES,
            max_namespaces: defaults::DEFAULT_MAX_NAMESPACES,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            lexical_weight: defaults::DEFAULT_LEXICAL_WEIGHT,
            rank_decay: defaults::DEFAULT_RANK_DECAY,
            query_cache_capacity: defaults::DEFAULT_QUERY_CACHE_CAPACITY,
            partition_timeout_ms: defaults::DEFAULT_PARTITION_TIMEOUT_MS,
            concurrent_fanout: defaults::DEFAULT_CONCURRENT_FANOUT,
            lexical_wait_ms: defaults::DEFAULT_LEXICAL_WAIT_MS,
        }
    }
}
