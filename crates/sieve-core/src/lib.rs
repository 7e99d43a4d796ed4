//! # sieve-core
//!
//! Foundation crate for the Sieve hybrid retrieval engine.
//! Defines the shared types, traits, errors, config, constants and the
//! bounded insertion-ordered cache used by the embedding and query caches.
//! Every other crate in the workspace depends on this.

pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cache::FifoCache;
pub use config::SieveConfig;
pub use errors::{SieveError, SieveResult};
pub use models::{
    FusedResult, Hit, LexicalHit, LexicalStatus, NamespaceTable, SearchOutcome, Source, TagEntry,
    VectorHit,
};
pub use traits::{IEmbeddingProvider, IVectorIndex};
