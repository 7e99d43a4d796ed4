//! Stopword lists.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

/// Minimal list used when a configured stopword file cannot be read.
pub const FALLBACK: &[&str] = &[
    "the", "and", "a", "an", "in", "on", "at", "to", "for", "with", "by", "of", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// NLTK English list shipped with the `stop-words` crate.
    pub fn english() -> Self {
        Self::from_words(stop_words::get(stop_words::LANGUAGE::English))
    }

    pub fn fallback() -> Self {
        Self::from_words(FALLBACK)
    }

    /// Newline-separated list; `#` starts a comment line.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_words(
            content.lines().filter(|l| !l.trim_start().starts_with('#')),
        ))
    }

    /// Configured list if readable, the small fallback if configured but
    /// unreadable, the English list otherwise.
    pub fn resolve(configured: Option<&Path>) -> Self {
        match configured {
            None => Self::english(),
            Some(path) => match Self::from_path(path) {
                Ok(set) => {
                    debug!(path = %path.display(), words = set.len(), "stopwords loaded");
                    set
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "stopword list unreadable, using fallback set"
                    );
                    Self::fallback()
                }
            },
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
