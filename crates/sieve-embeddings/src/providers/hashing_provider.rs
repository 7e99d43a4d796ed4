//! Hashed term-frequency embedding provider.
//!
//! Projects lowercased word unigrams and adjacent bigrams into a fixed number
//! of buckets using blake3, with a hash-derived sign to reduce collision bias.
//! No network, fully deterministic. Output is not normalized; the embedding
//! cache normalizes.

use sieve_core::errors::SieveResult;
use sieve_core::traits::IEmbeddingProvider;

pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn terms(text: &str) -> Vec<String> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 2)
            .map(str::to_lowercase)
            .collect();
        let bigrams = words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
        let mut terms = words.clone();
        terms.extend(bigrams);
        terms
    }

    fn bucket(&self, term: &str) -> (usize, f32) {
        let hash = blake3::hash(term.as_bytes());
        let bytes = hash.as_bytes();
        let mut idx = [0u8; 8];
        idx.copy_from_slice(&bytes[..8]);
        let bucket = (u64::from_le_bytes(idx) % self.dimensions as u64) as usize;
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }
}

impl IEmbeddingProvider for HashingEmbeddingProvider {
    fn embed(&self, text: &str) -> SieveResult<Vec<f32>> {
        let mut v = vec![0.0f32; self.dimensions];
        for term in Self::terms(text) {
            let (bucket, sign) = self.bucket(&term);
            v[bucket] += sign;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
