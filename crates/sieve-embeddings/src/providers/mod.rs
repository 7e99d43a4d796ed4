//! Provider registry.
//!
//! - `http`: remote embedding model over an OpenAI-style JSON API.
//! - `hashing`: offline hashed term-frequency vectors.

pub mod hashing_provider;
pub mod http_provider;

pub use hashing_provider::HashingEmbeddingProvider;
pub use http_provider::HttpEmbeddingProvider;

use std::sync::Arc;

use sieve_core::config::EmbeddingConfig;
use sieve_core::errors::{EmbeddingError, SieveResult};
use sieve_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the provider named in the configuration.
pub fn create_provider(config: &EmbeddingConfig) -> SieveResult<Arc<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "http" => {
            let provider = HttpEmbeddingProvider::new(config)?;
            info!(
                provider = "http",
                model = %config.model,
                dims = config.dimensions,
                "embedding provider configured"
            );
            Ok(Arc::new(provider))
        }
        "hashing" => {
            info!(provider = "hashing", dims = config.dimensions, "using hashing embedding provider");
            Ok(Arc::new(HashingEmbeddingProvider::new(config.dimensions)))
        }
        other => Err(EmbeddingError::UnknownProvider {
            name: other.to_string(),
        }
        .into()),
    }
}
