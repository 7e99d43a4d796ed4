//! # sieve-retrieval
//!
//! The query engine: route the query to a few partitions, embed it, fan out
//! to the vector service, score it lexically, and fuse the two rankings.
//!
//! ## Architecture
//!
//! ```text
//! HybridSearchEngine
//! ├── QueryCache (FIFO, Arc<SearchOutcome>)
//! ├── NamespaceRouter (keyword scoring → tags → partitions)
//! ├── EmbeddingCache → IEmbeddingProvider
//! ├── search
//! │   ├── vector_search (sequential or threaded fan-out, per-call deadline)
//! │   └── lexical_search (LexicalHandle, optional bounded wait)
//! ├── fusion (weighted, rank-decayed sum over Hit)
//! └── ObservabilityEngine (monitor, query log, degradations)
//! ```

pub mod engine;
pub mod fusion;
pub mod query_cache;
pub mod router;
pub mod search;

pub use engine::HybridSearchEngine;
pub use fusion::{fuse, FusionWeights};
pub use query_cache::QueryCache;
pub use router::{NamespaceRouter, RoutingDecision};
