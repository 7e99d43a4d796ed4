use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Base URL of the index host, e.g. `https://my-index.svc.pinecone.io`.
    pub host: String,
    /// API key sent as the `Api-Key` header.
    pub api_key: Option<String>,
    /// Per-request timeout (milliseconds).
    pub request_timeout_ms: u64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: None,
            request_timeout_ms: defaults::DEFAULT_VECTOR_TIMEOUT_MS,
        }
    }
}
