use std::sync::Arc;

use sieve_core::errors::{EmbeddingError, SieveError};
use sieve_embeddings::normalize::l2_norm;
use sieve_embeddings::EmbeddingCache;
use test_fixtures::{CountingEmbedder, FailingEmbedder};

#[test]
fn repeated_lookup_returns_same_vector_without_second_call() {
    let provider = Arc::new(CountingEmbedder::new(16));
    let cache = EmbeddingCache::new(provider.clone(), 100);

    let first = cache.get_or_embed("Microbrewery license fee").unwrap();
    let second = cache.get_or_embed("  microbrewery LICENSE fee  ").unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert!(Arc::ptr_eq(&first.vector, &second.vector));
    assert_eq!(provider.calls(), 1);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn provider_embeds_the_normalized_key() {
    let provider = Arc::new(CountingEmbedder::new(16));
    let cache = EmbeddingCache::new(provider.clone(), 10);

    cache.get_or_embed("  Zoning VARIANCE Hearing ").unwrap();
    assert_eq!(provider.last_text().as_deref(), Some("zoning variance hearing"));
    assert_eq!(
        provider.last_text().as_deref(),
        Some(EmbeddingCache::key("  Zoning VARIANCE Hearing ").as_str())
    );
}

#[test]
fn cached_vectors_are_unit_length() {
    let cache = EmbeddingCache::new(Arc::new(CountingEmbedder::new(32)), 10);
    let lookup = cache.get_or_embed("restaurant kitchen inspection").unwrap();
    assert!((l2_norm(&lookup.vector) - 1.0).abs() < 1e-5);
}

#[test]
fn capacity_evicts_oldest_query() {
    let provider = Arc::new(CountingEmbedder::new(8));
    let cache = EmbeddingCache::new(provider.clone(), 2);

    cache.get_or_embed("first").unwrap();
    cache.get_or_embed("second").unwrap();
    cache.get_or_embed("first").unwrap();
    cache.get_or_embed("third").unwrap();

    assert_eq!(cache.len(), 2);
    assert!(!cache.contains("first"));
    assert!(cache.contains("second"));
    assert!(cache.contains("third"));
    assert_eq!(provider.calls(), 3);
}

#[test]
fn provider_errors_propagate_and_are_not_cached() {
    let provider = Arc::new(FailingEmbedder::new(8));
    let cache = EmbeddingCache::new(provider.clone(), 10);

    let err = cache.get_or_embed("any").unwrap_err();
    assert!(matches!(
        err,
        SieveError::EmbeddingError(EmbeddingError::ProviderUnavailable { .. })
    ));
    let _ = cache.get_or_embed("any");
    assert_eq!(provider.calls(), 2);
    assert!(cache.is_empty());
}

#[test]
fn concurrent_lookups_share_one_entry() {
    let provider = Arc::new(CountingEmbedder::new(8));
    let cache = Arc::new(EmbeddingCache::new(provider, 10));
    cache.get_or_embed("shared").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = cache.clone();
            std::thread::spawn(move || cache.get_or_embed("shared").unwrap().vector)
        })
        .collect();
    let vectors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for v in &vectors[1..] {
        assert!(Arc::ptr_eq(&vectors[0], v));
    }
}
