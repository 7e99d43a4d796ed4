//! Structured log events. Each function emits one `tracing` event.

pub fn partition_failed(partition: &str, reason: &str) {
    tracing::warn!(
        event = "partition_failed",
        partition = %partition,
        reason = %reason,
        "partition skipped"
    );
}

pub fn lexical_disabled(reason: &str) {
    tracing::warn!(
        event = "lexical_disabled",
        reason = %reason,
        "lexical search disabled; serving vector-only results"
    );
}

pub fn lexical_ready(documents: usize, from_cache: bool, elapsed_ms: u64) {
    tracing::info!(
        event = "lexical_ready",
        documents = documents,
        from_cache = from_cache,
        elapsed_ms = elapsed_ms,
        "lexical index ready"
    );
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

pub fn cache_evicted(cache: &str, key: &str) {
    tracing::debug!(
        event = "cache_evicted",
        cache = %cache,
        key = %key,
        "oldest cache entry evicted"
    );
}
