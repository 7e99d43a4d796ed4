/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("no results found for query: {query}")]
    NoResults { query: String },

    #[error("all {attempted} partitions failed and lexical search returned nothing")]
    AllPartitionsFailed { attempted: usize },

    #[error("top_k must be at least 1")]
    InvalidTopK,

    #[error("namespace table is empty")]
    EmptyNamespaceTable,
}
