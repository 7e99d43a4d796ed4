//! # sieve-embeddings
//!
//! Query embedding with a bounded FIFO cache in front of the provider.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingCache
//! ├── FifoCache<String, Arc<[f32]>> (trimmed + lowercased query → unit vector)
//! └── IEmbeddingProvider
//!     ├── HttpEmbeddingProvider (remote model, bearer auth)
//!     └── HashingEmbeddingProvider (offline, deterministic)
//! ```

pub mod cache;
pub mod normalize;
pub mod providers;

pub use cache::{EmbeddingCache, EmbeddingLookup};
pub use providers::{create_provider, HashingEmbeddingProvider, HttpEmbeddingProvider};
