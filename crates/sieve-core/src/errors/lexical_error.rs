/// Lexical index errors.
///
/// None of these reach the caller of a search: they either trigger a rebuild
/// (cache corruption) or disable lexical scoring.
#[derive(Debug, thiserror::Error)]
pub enum LexicalError {
    #[error("cache artifact corrupted: {path}: {reason}")]
    CacheCorrupted { path: String, reason: String },

    #[error("cache artifact missing: {path}")]
    CacheMissing { path: String },

    #[error("i/o failure at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("index build exceeded {budget_ms}ms budget")]
    BuildTimedOut { budget_ms: u64 },

    #[error("index build cancelled")]
    BuildCancelled,

    #[error("lexical corpus is empty")]
    EmptyCorpus,
}
