//! Shared test doubles and fixture data for the Sieve workspace.
//!
//! Provides an in-memory vector index with injectable failures and delays,
//! counting and failing embedding providers, and loaders for the JSON
//! fixtures under `data/`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sieve_core::errors::{EmbeddingError, SieveResult, VectorError};
use sieve_core::models::{IndexStats, Metadata, NamespaceTable, VectorMatch};
use sieve_core::traits::{IEmbeddingProvider, IVectorIndex};

/// Directory holding the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The municipal-regulation namespace table used across tests.
pub fn policy_namespace_table() -> NamespaceTable {
    load_fixture("namespaces.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorpusDocument {
    pub id: String,
    pub score: f64,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
    pub partitions: BTreeMap<String, Vec<CorpusDocument>>,
}

/// The document corpus matching [`policy_namespace_table`].
pub fn policy_corpus() -> Corpus {
    load_fixture("corpus.json")
}

/// A mock index pre-populated with [`policy_corpus`].
pub fn policy_vector_index(dimension: usize) -> MockVectorIndex {
    let mut index = MockVectorIndex::new(dimension);
    for (partition, docs) in policy_corpus().partitions {
        for doc in docs {
            index = index.with_document(&partition, &doc.id, doc.score, &doc.text);
        }
    }
    index
}

// ---------------------------------------------------------------------------
// Vector index
// ---------------------------------------------------------------------------

/// In-memory `IVectorIndex` with scripted scores.
///
/// Each partition returns its documents in descending score order regardless
/// of the query vector. Failures, delays and an unreachable stats endpoint can
/// be injected; every call is counted.
#[derive(Default)]
pub struct MockVectorIndex {
    dimension: usize,
    partitions: BTreeMap<String, Vec<VectorMatch>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    stats_unavailable: bool,
    query_calls: AtomicUsize,
    stats_calls: AtomicUsize,
    per_partition: Mutex<HashMap<String, usize>>,
}

impl MockVectorIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            ..Default::default()
        }
    }

    /// Add a document whose text is stored under the `content` metadata key.
    pub fn with_document(self, partition: &str, id: &str, score: f64, text: &str) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert("content".into(), serde_json::Value::String(text.into()));
        self.with_match(
            partition,
            VectorMatch {
                id: id.into(),
                score,
                metadata,
            },
        )
    }

    pub fn with_match(mut self, partition: &str, m: VectorMatch) -> Self {
        let docs = self.partitions.entry(partition.into()).or_default();
        docs.push(m);
        docs.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// Register a partition with no documents.
    pub fn with_empty_partition(mut self, partition: &str) -> Self {
        self.partitions.entry(partition.into()).or_default();
        self
    }

    pub fn failing_partition(mut self, partition: &str) -> Self {
        self.partitions.entry(partition.into()).or_default();
        self.failing.insert(partition.into());
        self
    }

    pub fn slow_partition(mut self, partition: &str, delay: Duration) -> Self {
        self.delays.insert(partition.into(), delay);
        self
    }

    pub fn stats_unavailable(mut self) -> Self {
        self.stats_unavailable = true;
        self
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, partition: &str) -> usize {
        self.per_partition
            .lock()
            .unwrap()
            .get(partition)
            .copied()
            .unwrap_or(0)
    }

    pub fn reset_counters(&self) {
        self.query_calls.store(0, Ordering::SeqCst);
        self.stats_calls.store(0, Ordering::SeqCst);
        self.per_partition.lock().unwrap().clear();
    }
}

impl IVectorIndex for MockVectorIndex {
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        partition: &str,
        include_metadata: bool,
    ) -> SieveResult<Vec<VectorMatch>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .per_partition
            .lock()
            .unwrap()
            .entry(partition.to_string())
            .or_default() += 1;

        if let Some(delay) = self.delays.get(partition) {
            std::thread::sleep(*delay);
        }
        if self.failing.contains(partition) {
            return Err(VectorError::PartitionFailed {
                partition: partition.into(),
                reason: "injected failure".into(),
            }
            .into());
        }
        if vector.len() != self.dimension {
            return Err(VectorError::InvalidResponse {
                reason: format!(
                    "vector dimension {} does not match index dimension {}",
                    vector.len(),
                    self.dimension
                ),
            }
            .into());
        }

        let docs = self.partitions.get(partition).cloned().unwrap_or_default();
        Ok(docs
            .into_iter()
            .take(top_k)
            .map(|mut m| {
                if !include_metadata {
                    m.metadata.clear();
                }
                m
            })
            .collect())
    }

    fn describe_stats(&self) -> SieveResult<IndexStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        if self.stats_unavailable {
            return Err(VectorError::Unreachable {
                reason: "injected outage".into(),
            }
            .into());
        }
        Ok(IndexStats {
            dimension: self.dimension,
            partitions: self
                .partitions
                .iter()
                .map(|(p, docs)| (p.clone(), docs.len() as u64))
                .collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Embedding providers
// ---------------------------------------------------------------------------

/// Deterministic provider that counts calls.
///
/// Folds the bytes of the text into `dimensions` buckets, with a constant
/// offset in bucket 0 so the output is never the zero vector.
pub struct CountingEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl CountingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Text passed to the most recent `embed` call.
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

impl IEmbeddingProvider for CountingEmbedder {
    fn embed(&self, text: &str) -> SieveResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        let mut v = vec![0.0f32; self.dimensions];
        v[0] = 1.0;
        for (i, b) in text.bytes().enumerate() {
            v[(i + b as usize) % self.dimensions] += b as f32 / 255.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Provider that always fails as unreachable.
pub struct FailingEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl FailingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> SieveResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EmbeddingError::ProviderUnavailable {
            provider: "failing".into(),
            reason: "injected outage".into(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing"
    }
}
