//! [`HybridSearchEngine`]: the top-level query path.
//!
//! One call to [`HybridSearchEngine::search`] runs: query cache lookup,
//! namespace routing, query embedding, partition fan-out, lexical scoring,
//! fusion, and bookkeeping. Partition failures and an unavailable lexical
//! index degrade the result instead of failing the call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use sieve_core::config::{RetrievalConfig, SieveConfig};
use sieve_core::constants::{COMPONENT_EMBEDDINGS, COMPONENT_LEXICAL, COMPONENT_VECTOR};
use sieve_core::errors::{EmbeddingError, RetrievalError, SieveResult};
use sieve_core::models::{
    DegradationEvent, Hit, LexicalStatus, NamespaceTable, PartitionFailure, SearchOutcome,
};
use sieve_core::traits::{IEmbeddingProvider, IVectorIndex};
use sieve_embeddings::{create_provider, EmbeddingCache};
use sieve_lexical::LexicalHandle;
use sieve_observability::tracing_setup::events;
use sieve_observability::{embedding_span, search_span};
use sieve_observability::{ObservabilityEngine, PerformanceStats, QueryLogEntry};
use sieve_vector::HttpVectorIndex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::fusion::{fuse, FusionWeights};
use crate::query_cache::QueryCache;
use crate::router::NamespaceRouter;
use crate::search::{search_lexical, FanOutMode, PartitionFanOut};

/// Hybrid dense + sparse search over a partitioned vector index.
///
/// `Send + Sync`; share it behind an `Arc` and call [`search`](Self::search)
/// from any number of threads.
pub struct HybridSearchEngine {
    router: NamespaceRouter,
    embeddings: EmbeddingCache,
    fan_out: PartitionFanOut,
    lexical: Arc<LexicalHandle>,
    query_cache: QueryCache,
    weights: FusionWeights,
    config: RetrievalConfig,
    available_partitions: Vec<String>,
    observability: ObservabilityEngine,
    lexical_degradation_recorded: AtomicBool,
}

impl HybridSearchEngine {
    /// Build the engine and start loading or building the lexical index in
    /// the background over every partition the backend reports.
    ///
    /// Fails if the namespace table is empty, the backend's stats cannot be
    /// read, or the provider's dimension disagrees with the index.
    pub fn new(
        config: &SieveConfig,
        table: NamespaceTable,
        provider: Arc<dyn IEmbeddingProvider>,
        vector_index: Arc<dyn IVectorIndex>,
    ) -> SieveResult<Self> {
        let (available, dimension) = Self::inspect_backend(&table, provider.as_ref(), vector_index.as_ref())?;
        let lexical = LexicalHandle::start(
            Arc::clone(&vector_index),
            available.clone(),
            dimension,
            &config.lexical,
        );
        Ok(Self::assemble(config, table, provider, vector_index, lexical, available))
    }

    /// Like [`new`](Self::new) but with a caller-supplied lexical handle.
    pub fn with_lexical(
        config: &SieveConfig,
        table: NamespaceTable,
        provider: Arc<dyn IEmbeddingProvider>,
        vector_index: Arc<dyn IVectorIndex>,
        lexical: Arc<LexicalHandle>,
    ) -> SieveResult<Self> {
        let (available, _) = Self::inspect_backend(&table, provider.as_ref(), vector_index.as_ref())?;
        Ok(Self::assemble(config, table, provider, vector_index, lexical, available))
    }

    /// Wire up the configured HTTP embedding provider and vector client.
    pub fn from_config(config: &SieveConfig, table: NamespaceTable) -> SieveResult<Self> {
        let provider = create_provider(&config.embedding)?;
        let vector_index: Arc<dyn IVectorIndex> = Arc::new(HttpVectorIndex::new(&config.vector)?);
        Self::new(config, table, provider, vector_index)
    }

    fn inspect_backend(
        table: &NamespaceTable,
        provider: &dyn IEmbeddingProvider,
        vector_index: &dyn IVectorIndex,
    ) -> SieveResult<(Vec<String>, usize)> {
        if table.is_empty() {
            return Err(RetrievalError::EmptyNamespaceTable.into());
        }
        let stats = vector_index.describe_stats()?;
        if stats.dimension > 0 && stats.dimension != provider.dimensions() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: stats.dimension,
                actual: provider.dimensions(),
            }
            .into());
        }
        let dimension = if stats.dimension > 0 {
            stats.dimension
        } else {
            provider.dimensions()
        };
        let available = stats.partition_ids();
        info!(
            partitions = available.len(),
            dimension,
            provider = provider.name(),
            "vector backend described"
        );
        Ok((available, dimension))
    }

    fn assemble(
        config: &SieveConfig,
        table: NamespaceTable,
        provider: Arc<dyn IEmbeddingProvider>,
        vector_index: Arc<dyn IVectorIndex>,
        lexical: Arc<LexicalHandle>,
        available_partitions: Vec<String>,
    ) -> Self {
        let retrieval = config.retrieval.clone();
        Self {
            router: NamespaceRouter::new(table),
            embeddings: EmbeddingCache::new(provider, config.embedding.cache_capacity),
            fan_out: PartitionFanOut::new(vector_index, FanOutMode::from(&retrieval)),
            lexical,
            query_cache: QueryCache::new(retrieval.query_cache_capacity),
            weights: FusionWeights::from(&retrieval),
            config: retrieval,
            available_partitions,
            observability: ObservabilityEngine::new(&config.observability),
            lexical_degradation_recorded: AtomicBool::new(false),
        }
    }

    /// Search with the configured default `top_k`.
    pub fn search_default(&self, query: &str) -> SieveResult<Arc<SearchOutcome>> {
        self.search(query, self.config.default_top_k)
    }

    /// Run one hybrid search and return at most `top_k` fused results.
    ///
    /// Identical `(query, top_k)` calls after a complete outcome return the
    /// same `Arc` without touching the provider or the backend.
    pub fn search(&self, query: &str, top_k: usize) -> SieveResult<Arc<SearchOutcome>> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK.into());
        }
        let started = Instant::now();
        let normalized = QueryCache::normalize(query);
        let span = search_span!(normalized, top_k);
        let _guard = span.enter();

        // Stage 1: Whole-outcome cache.
        if let Some(outcome) = self.query_cache.get(&normalized, top_k) {
            self.observability.record_cache_hit();
            self.log_query(&outcome, started, true);
            return Ok(outcome);
        }

        // Stage 2: Route to partitions.
        let routing = self.router.relevant_partitions(
            &normalized,
            self.config.min_namespaces,
            self.config.max_namespaces,
            &self.available_partitions,
        );

        // Stage 3: Embed. Provider errors are recorded, then returned as-is.
        let embedded = {
            let _span =
                embedding_span!(self.embeddings.provider_name(), self.embeddings.dimensions())
                    .entered();
            self.embeddings.get_or_embed(&normalized)
        };
        let lookup = match embedded {
            Ok(lookup) => {
                self.observability.mark_recovered(COMPONENT_EMBEDDINGS);
                lookup
            }
            Err(e) => {
                self.observability.record_degradation(DegradationEvent::now(
                    COMPONENT_EMBEDDINGS,
                    e.to_string(),
                    "fail query",
                ));
                return Err(e);
            }
        };
        if lookup.cache_hit {
            self.observability.record_cache_hit();
        }

        // Stage 4: Vector fan-out.
        let fan_out = self.fan_out.search(&lookup.vector, &routing.partitions, top_k);
        let all_partitions_failed = fan_out.all_failed(routing.partitions.len());
        self.note_partition_health(&fan_out.failures);

        // Stage 5: Lexical scoring.
        let (lexical_status, lexical_hits) =
            search_lexical(&self.lexical, &normalized, top_k, self.config.lexical_wait());
        self.note_lexical_status(&lexical_status);

        // Stage 6: Fuse.
        let vector_hits: Vec<Hit> = fan_out.hits.into_iter().map(Hit::from).collect();
        let lexical_hits: Vec<Hit> = lexical_hits.into_iter().map(Hit::from).collect();
        let results = fuse(&[vector_hits, lexical_hits], &self.weights, top_k);

        if results.is_empty() {
            let mut entry = QueryLogEntry::new(normalized.clone(), top_k, started.elapsed());
            entry.lexical_status = lexical_status.label().to_string();
            entry.partitions_failed = fan_out.failures.len();
            self.observability.record_query(entry);

            return Err(if all_partitions_failed {
                RetrievalError::AllPartitionsFailed {
                    attempted: routing.partitions.len(),
                }
            } else {
                RetrievalError::NoResults { query: normalized }
            }
            .into());
        }

        let outcome = Arc::new(SearchOutcome {
            request_id: Uuid::new_v4(),
            query: normalized,
            top_k,
            results,
            selected_tags: routing.tags,
            partitions_searched: routing.partitions,
            partitions_failed: fan_out.failures,
            lexical_status,
        });
        let cached = self.query_cache.insert(Arc::clone(&outcome));
        self.log_query(&outcome, started, false);

        info!(
            request_id = %outcome.request_id,
            results = outcome.results.len(),
            hybrid = outcome.results.iter().filter(|r| r.is_hybrid()).count(),
            lexical = outcome.lexical_status.label(),
            failed = outcome.partitions_failed.len(),
            cached,
            latency_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(outcome)
    }

    fn log_query(&self, outcome: &SearchOutcome, started: Instant, cache_hit: bool) {
        let mut entry = QueryLogEntry::new(outcome.query.clone(), outcome.top_k, started.elapsed());
        entry.result_count = outcome.results.len();
        entry.cache_hit = cache_hit;
        entry.lexical_status = outcome.lexical_status.label().to_string();
        entry.partitions_failed = outcome.partitions_failed.len();
        self.observability.record_query(entry);
    }

    fn note_partition_health(&self, failures: &[PartitionFailure]) {
        if failures.is_empty() {
            let recovered = self.observability.mark_recovered(COMPONENT_VECTOR);
            if recovered > 0 {
                debug!(recovered, "vector partitions recovered");
            }
            return;
        }
        for failure in failures {
            events::partition_failed(&failure.partition, &failure.reason);
            self.observability.record_degradation(DegradationEvent::now(
                COMPONENT_VECTOR,
                format!("{}: {}", failure.partition, failure.reason),
                "skip partition",
            ));
        }
    }

    fn note_lexical_status(&self, status: &LexicalStatus) {
        if let LexicalStatus::Disabled { reason } = status {
            if !self.lexical_degradation_recorded.swap(true, Ordering::SeqCst) {
                self.observability.record_degradation(DegradationEvent::now(
                    COMPONENT_LEXICAL,
                    reason.clone(),
                    "vector-only",
                ));
            }
        }
    }

    /// Block up to `timeout` for the lexical index to settle.
    pub fn wait_for_lexical(&self, timeout: Duration) -> LexicalStatus {
        self.lexical.wait_ready(timeout)
    }

    pub fn lexical_status(&self) -> LexicalStatus {
        self.lexical.status()
    }

    pub fn stats(&self) -> PerformanceStats {
        self.observability.stats()
    }

    pub fn observability(&self) -> &ObservabilityEngine {
        &self.observability
    }

    pub fn router(&self) -> &NamespaceRouter {
        &self.router
    }

    pub fn embeddings(&self) -> &EmbeddingCache {
        &self.embeddings
    }

    pub fn query_cache(&self) -> &QueryCache {
        &self.query_cache
    }

    pub fn available_partitions(&self) -> &[String] {
        &self.available_partitions
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }
}
