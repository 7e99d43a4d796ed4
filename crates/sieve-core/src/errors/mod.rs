//! Error taxonomy for the Sieve workspace.
//!
//! Each subsystem owns its own `thiserror` enum; [`SieveError`] aggregates
//! them so callers of the top-level search only deal with one type.

mod embedding_error;
mod lexical_error;
mod retrieval_error;
mod vector_error;

pub use embedding_error::EmbeddingError;
pub use lexical_error::LexicalError;
pub use retrieval_error::RetrievalError;
pub use vector_error::VectorError;

/// Top-level error type for all Sieve operations.
#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("vector backend error: {0}")]
    VectorError(#[from] VectorError),

    #[error("lexical index error: {0}")]
    LexicalError(#[from] LexicalError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SieveError {
    /// Whether this error came from an external provider (embedding model or
    /// vector backend) rather than from the engine itself.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            SieveError::EmbeddingError(_)
                | SieveError::VectorError(VectorError::Unreachable { .. })
        )
    }
}

/// Convenience alias used across the workspace.
pub type SieveResult<T> = Result<T, SieveError>;
