use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "http" or "hashing".
    pub provider: String,
    /// Model name sent to the HTTP provider.
    pub model: String,
    /// HTTP endpoint for the "http" provider.
    pub endpoint: String,
    /// Bearer token for the HTTP provider.
    pub api_key: Option<String>,
    /// Fixed embedding dimensions.
    pub dimensions: usize,
    /// Query embedding cache max entries. 0 disables caching.
    pub cache_capacity: usize,
    /// Per-request timeout for the HTTP provider (milliseconds).
    pub request_timeout_ms: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_key: None,
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            cache_capacity: defaults::DEFAULT_EMBEDDING_CACHE_CAPACITY,
            request_timeout_ms: defaults::DEFAULT_EMBEDDING_TIMEOUT_MS,
        }
    }
}
