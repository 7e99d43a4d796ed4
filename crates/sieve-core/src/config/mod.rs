//! Configuration for every subsystem, loadable from TOML.
//!
//! All sections are `#[serde(default)]`, so a partial file only overrides the
//! keys it names.

pub mod defaults;
mod embedding_config;
mod lexical_config;
mod observability_config;
mod retrieval_config;
mod vector_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use lexical_config::LexicalConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use vector_config::VectorConfig;

use crate::errors::{SieveError, SieveResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub lexical: LexicalConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl SieveConfig {
    /// Parse a TOML document.
    pub fn from_toml(toml_str: &str) -> SieveResult<Self> {
        toml::from_str(toml_str).map_err(|e| SieveError::ConfigError(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SieveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SieveError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }
}
