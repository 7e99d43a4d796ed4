//! Whitespace tokenizer shared by index build and query time.

use std::sync::Arc;

use rayon::prelude::*;

use crate::stopwords::StopwordSet;

/// Characters stripped from both ends of every token.
const TRIM_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']', '{', '}'];

/// Tokens at or below this many characters are dropped.
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stopwords: Arc<StopwordSet>,
}

impl Tokenizer {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self {
            stopwords: Arc::new(stopwords),
        }
    }

    /// Lowercase, split on whitespace, strip enclosing punctuation, then drop
    /// short, purely numeric and stopword tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(|raw| raw.trim_matches(TRIM_CHARS))
            .filter(|t| t.chars().count() > MIN_TOKEN_CHARS)
            .filter(|t| !t.chars().all(char::is_numeric))
            .filter(|t| !self.stopwords.contains(t))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize a corpus document; `None` when fewer than `min_tokens` survive.
    pub fn tokenize_document(&self, text: &str, min_tokens: usize) -> Option<Vec<String>> {
        let tokens = self.tokenize(text);
        (tokens.len() >= min_tokens).then_some(tokens)
    }

    /// Parallel [`Self::tokenize_document`] over many texts, order preserved.
    pub fn tokenize_documents<S>(&self, texts: &[S], min_tokens: usize) -> Vec<Option<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|t| self.tokenize_document(t.as_ref(), min_tokens))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok() -> Tokenizer {
        Tokenizer::new(StopwordSet::fallback())
    }

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(
            tok().tokenize("(Microbrewery) LICENSE, fee!"),
            vec!["microbrewery", "license", "fee"]
        );
    }

    #[test]
    fn drops_short_numeric_and_stopwords() {
        assert_eq!(
            tok().tokenize("The fee is 1200 for an ale in 2024 ok"),
            vec!["fee", "ale"]
        );
    }

    #[test]
    fn length_is_checked_after_stripping() {
        assert!(tok().tokenize("\"a\" (b) [ok]").is_empty());
    }

    #[test]
    fn mixed_alphanumeric_tokens_survive() {
        assert_eq!(tok().tokenize("form B-12 section 4a2"), vec!["form", "b-12", "section", "4a2"]);
    }

    #[test]
    fn document_floor_applies() {
        let t = tok();
        assert!(t.tokenize_document("brewery license", 3).is_none());
        assert_eq!(
            t.tokenize_document("brewery license renewal", 3).unwrap().len(),
            3
        );
    }

    #[test]
    fn parallel_batch_preserves_order() {
        let t = tok();
        let texts = vec!["alpha beta gamma", "tiny", "delta epsilon zeta eta"];
        let out = t.tokenize_documents(&texts, 3);
        assert_eq!(out[0].as_ref().unwrap()[0], "alpha");
        assert!(out[1].is_none());
        assert_eq!(out[2].as_ref().unwrap().len(), 4);
    }
}
