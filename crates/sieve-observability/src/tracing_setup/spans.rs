//! Span definitions for search, lexical build, and embedding.

/// Span covering one hybrid search.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $top_k:expr) => {
        tracing::info_span!("sieve.search", query = %$query, top_k = $top_k)
    };
}

/// Span covering the lexical index build or load.
#[macro_export]
macro_rules! lexical_build_span {
    ($partitions:expr) => {
        tracing::info_span!("sieve.lexical_build", partitions = $partitions)
    };
}

/// Span covering one query embedding lookup.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::debug_span!("sieve.embedding", provider = %$provider, dimension = $dimension)
    };
}
