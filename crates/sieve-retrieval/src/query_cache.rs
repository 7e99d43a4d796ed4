//! Whole-outcome cache keyed by normalized query text and `top_k`.

use std::sync::Arc;

use sieve_core::cache::FifoCache;
use sieve_core::models::SearchOutcome;
use sieve_embeddings::EmbeddingCache;
use sieve_observability::tracing_setup::events;
use tracing::debug;

type Key = (String, usize);

#[derive(Debug)]
pub struct QueryCache {
    entries: FifoCache<Key, Arc<SearchOutcome>>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: FifoCache::new(capacity),
        }
    }

    /// Same key the embedding cache uses, so both caches agree on which
    /// queries are identical.
    pub fn normalize(query: &str) -> String {
        EmbeddingCache::key(query)
    }

    pub fn get(&self, normalized_query: &str, top_k: usize) -> Option<Arc<SearchOutcome>> {
        let hit = self.entries.get(&(normalized_query.to_string(), top_k));
        if hit.is_some() {
            debug!(query = %normalized_query, top_k, "query cache hit");
        }
        hit
    }

    /// Store `outcome` if it is cacheable. Returns whether it was stored.
    pub fn insert(&self, outcome: Arc<SearchOutcome>) -> bool {
        if !self.entries.is_enabled() || !outcome.is_cacheable() {
            return false;
        }
        let key = (outcome.query.clone(), outcome.top_k);
        if let Some(((query, top_k), _)) = self.entries.insert(key, outcome) {
            events::cache_evicted("query", &format!("{query}#{top_k}"));
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::models::{LexicalStatus, PartitionFailure};
    use uuid::Uuid;

    fn outcome(query: &str, top_k: usize, status: LexicalStatus) -> Arc<SearchOutcome> {
        Arc::new(SearchOutcome {
            request_id: Uuid::new_v4(),
            query: query.into(),
            top_k,
            results: Vec::new(),
            selected_tags: Vec::new(),
            partitions_searched: vec!["p".into()],
            partitions_failed: Vec::new(),
            lexical_status: status,
        })
    }

    #[test]
    fn normalized_key_matches_embedding_cache_key() {
        for q in ["  Microbrewery LICENSE ", "zoning", "", "\tFood Safety\n"] {
            assert_eq!(QueryCache::normalize(q), EmbeddingCache::key(q));
        }
        assert_eq!(QueryCache::normalize("  Microbrewery LICENSE "), "microbrewery license");
    }

    #[test]
    fn returns_the_same_arc() {
        let cache = QueryCache::new(4);
        let stored = outcome("beer", 4, LexicalStatus::Ready);
        assert!(cache.insert(stored.clone()));
        let got = cache.get("beer", 4).unwrap();
        assert!(Arc::ptr_eq(&stored, &got));
        assert!(cache.get("beer", 5).is_none());
    }

    #[test]
    fn degraded_outcomes_are_not_stored() {
        let cache = QueryCache::new(4);
        assert!(!cache.insert(outcome("beer", 4, LexicalStatus::Building)));

        let mut failed = (*outcome("wine", 4, LexicalStatus::Ready)).clone();
        failed.partitions_failed.push(PartitionFailure {
            partition: "p".into(),
            reason: "down".into(),
        });
        assert!(!cache.insert(Arc::new(failed)));
        assert!(cache.is_empty());
    }

    #[test]
    fn disabled_lexical_outcomes_are_cacheable() {
        let cache = QueryCache::new(4);
        let status = LexicalStatus::Disabled {
            reason: "empty corpus".into(),
        };
        assert!(cache.insert(outcome("beer", 4, status)));
    }

    #[test]
    fn evicts_oldest_when_full() {
        let cache = QueryCache::new(2);
        cache.insert(outcome("a", 1, LexicalStatus::Ready));
        cache.insert(outcome("b", 1, LexicalStatus::Ready));
        cache.insert(outcome("c", 1, LexicalStatus::Ready));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a", 1).is_none());
        assert!(cache.get("c", 1).is_some());
    }

    #[test]
    fn zero_capacity_disables() {
        let cache = QueryCache::new(0);
        assert!(!cache.insert(outcome("a", 1, LexicalStatus::Ready)));
        assert!(cache.get("a", 1).is_none());
    }
}
