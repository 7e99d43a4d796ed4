//! Query embedding cache.
//!
//! Key is the trimmed, lowercased query text, and the key is also what the
//! provider embeds, so every query mapping to one entry gets the vector that
//! entry was computed from. Values are unit-normalized
//! vectors shared as `Arc<[f32]>`, so a hit hands back the exact same
//! allocation that was cached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sieve_core::errors::{EmbeddingError, SieveResult};
use sieve_core::traits::IEmbeddingProvider;
use sieve_core::FifoCache;
use tracing::{debug, warn};

use crate::normalize::l2_normalize;

/// Result of resolving one query to a vector.
#[derive(Debug, Clone)]
pub struct EmbeddingLookup {
    pub vector: Arc<[f32]>,
    pub cache_hit: bool,
}

/// Bounded FIFO cache in front of an embedding provider.
pub struct EmbeddingCache {
    provider: Arc<dyn IEmbeddingProvider>,
    entries: FifoCache<String, Arc<[f32]>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EmbeddingCache {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, capacity: usize) -> Self {
        Self {
            provider,
            entries: FifoCache::new(capacity),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache key for a query.
    pub fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    /// Resolve a query to its normalized vector, calling the provider only on
    /// a miss. Provider errors propagate unchanged.
    pub fn get_or_embed(&self, query: &str) -> SieveResult<EmbeddingLookup> {
        let key = Self::key(query);

        if let Some(vector) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(query = %key, "embedding cache hit");
            return Ok(EmbeddingLookup {
                vector,
                cache_hit: true,
            });
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let mut raw = self.provider.embed(&key)?;

        let expected = self.provider.dimensions();
        if raw.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: raw.len(),
            }
            .into());
        }

        if !l2_normalize(&mut raw) {
            warn!(
                query = %key,
                provider = self.provider.name(),
                "provider returned a zero vector; caching it unnormalized"
            );
        }

        let vector: Arc<[f32]> = raw.into();
        if let Some((evicted, _)) = self.entries.insert(key.clone(), vector.clone()) {
            debug!(evicted = %evicted, "embedding cache evicted oldest entry");
        }

        // A concurrent miss on the same key may have won the insert.
        let vector = self.entries.get(&key).unwrap_or(vector);
        Ok(EmbeddingLookup {
            vector,
            cache_hit: false,
        })
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
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

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains(&Self::key(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sieve_core::errors::SieveError;
    use std::sync::atomic::AtomicUsize;

    struct FixedProvider {
        calls: AtomicUsize,
        output: Vec<f32>,
    }

    impl IEmbeddingProvider for FixedProvider {
        fn embed(&self, _text: &str) -> SieveResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
        fn dimensions(&self) -> usize {
            4
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn provider(output: Vec<f32>) -> Arc<FixedProvider> {
        Arc::new(FixedProvider {
            calls: AtomicUsize::new(0),
            output,
        })
    }

    #[test]
    fn key_trims_and_lowercases() {
        assert_eq!(EmbeddingCache::key("  Brewery LICENSE "), "brewery license");
    }

    #[test]
    fn normalizes_before_caching() {
        let p = provider(vec![2.0, 0.0, 0.0, 0.0]);
        let cache = EmbeddingCache::new(p, 4);
        let hit = cache.get_or_embed("q").unwrap();
        assert_eq!(&*hit.vector, &[1.0, 0.0, 0.0, 0.0]);
        assert!(!hit.cache_hit);
    }

    #[test]
    fn zero_vector_is_cached_unchanged() {
        let p = provider(vec![0.0; 4]);
        let cache = EmbeddingCache::new(p.clone(), 4);
        let first = cache.get_or_embed("nothing").unwrap();
        assert!(first.vector.iter().all(|&x| x == 0.0));
        let second = cache.get_or_embed("nothing").unwrap();
        assert!(second.cache_hit);
        assert_eq!(p.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wrong_dimension_is_rejected_and_not_cached() {
        let p = provider(vec![1.0, 2.0]);
        let cache = EmbeddingCache::new(p, 4);
        let err = cache.get_or_embed("q").unwrap_err();
        assert!(matches!(
            err,
            SieveError::EmbeddingError(EmbeddingError::DimensionMismatch {
                expected: 4,
                actual: 2
            })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_always_calls_provider() {
        let p = provider(vec![1.0, 0.0, 0.0, 0.0]);
        let cache = EmbeddingCache::new(p.clone(), 0);
        cache.get_or_embed("q").unwrap();
        cache.get_or_embed("q").unwrap();
        assert_eq!(p.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.hits(), 0);
    }
}
