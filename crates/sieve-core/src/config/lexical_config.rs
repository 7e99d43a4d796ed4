use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Lexical (BM25) index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Build (or load) the lexical index at startup.
    pub enabled: bool,
    /// Directory holding the two persisted index artifacts.
    pub cache_dir: PathBuf,
    /// Documents sampled per partition when building.
    pub sample_size: usize,
    /// Texts whose stripped length is at or below this are discarded.
    pub min_text_chars: usize,
    /// Documents with fewer surviving tokens are dropped.
    pub min_doc_tokens: usize,
    /// Wall-clock budget for the whole build (milliseconds).
    pub build_timeout_ms: u64,
    /// Optional newline-separated stopword list.
    pub stopwords_path: Option<PathBuf>,
    /// Value every component of the neutral sampling vector takes.
    pub sample_value: f32,
    /// BM25 term-frequency saturation.
    pub k1: f64,
    /// BM25 document-length normalization.
    pub b: f64,
    /// Write artifacts after a successful build.
    pub persist: bool,
}

impl LexicalConfig {
    pub fn build_timeout(&self) -> Duration {
        Duration::from_millis(self.build_timeout_ms)
    }
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_LEXICAL_ENABLED,
            cache_dir: PathBuf::from(defaults::DEFAULT_CACHE_DIR),
            sample_size: defaults::DEFAULT_SAMPLE_SIZE,
            min_text_chars: defaults::DEFAULT_MIN_TEXT_CHARS,
            min_doc_tokens: defaults::DEFAULT_MIN_DOC_TOKENS,
            build_timeout_ms: defaults::DEFAULT_BUILD_TIMEOUT_MS,
            stopwords_path: None,
            sample_value: defaults::DEFAULT_SAMPLE_VALUE,
            k1: defaults::DEFAULT_BM25_K1,
            b: defaults::DEFAULT_BM25_B,
            persist: defaults::DEFAULT_PERSIST_INDEX,
        }
    }
}
