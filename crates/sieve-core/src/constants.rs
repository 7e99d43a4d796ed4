/// Sieve system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Component names used in degradation events and structured logs.
pub const COMPONENT_EMBEDDINGS: &str = "embeddings";
pub const COMPONENT_VECTOR: &str = "vector";
pub const COMPONENT_LEXICAL: &str = "lexical";

/// Metadata keys the vector service may carry document text under, in priority order.
pub const TEXT_METADATA_KEYS: [&str; 2] = ["content", "text"];

/// Metadata key lexical hits expose their raw text under.
pub const LEXICAL_TEXT_KEY: &str = "text";

/// Markers that signal a broad, policy-level question.
pub const POLICY_INTENT_MARKERS: [&str; 4] = ["policy", "regulation", "guideline", "procedure"];
