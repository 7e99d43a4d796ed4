// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "http";
pub const DEFAULT_EMBEDDING_MODEL: &str = "jina-embeddings-v3";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.jina.ai/v1/embeddings";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;

// --- Vector backend ---
pub const DEFAULT_VECTOR_TIMEOUT_MS: u64 = 8_000;

// --- Lexical ---
pub const DEFAULT_LEXICAL_ENABLED: bool = true;
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_SAMPLE_SIZE: usize = 50;
pub const DEFAULT_MIN_TEXT_CHARS: usize = 20;
pub const DEFAULT_MIN_DOC_TOKENS: usize = 3;
pub const DEFAULT_BUILD_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_SAMPLE_VALUE: f32 = 0.1;
pub const DEFAULT_BM25_K1: f64 = 1.5;
pub const DEFAULT_BM25_B: f64 = 0.75;
pub const DEFAULT_PERSIST_INDEX: bool = true;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_MIN_NAMESPACES: usize = 1;
pub const DEFAULT_MAX_NAMESPACES: usize = 2;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.7;
pub const DEFAULT_LEXICAL_WEIGHT: f64 = 0.3;
pub const DEFAULT_RANK_DECAY: f64 = 0.05;
pub const DEFAULT_QUERY_CACHE_CAPACITY: usize = 50;
pub const DEFAULT_PARTITION_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_CONCURRENT_FANOUT: bool = true;
pub const DEFAULT_LEXICAL_WAIT_MS: u64 = 0;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LATENCY_THRESHOLD_MS: u64 = 5_000;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
