//! BM25 over a fixed, pre-tokenized corpus, backed by the `bm25` crate.
//!
//! Documents arrive already tokenized, so the crate's embedder is given a
//! pass-through tokenizer and each document is fed as its space-joined
//! tokens. Document `i` of the corpus is upserted into the scorer under
//! id `i`, which keeps score arrays aligned to corpus order.
//!
//! The crate's IDF is `ln(1 + (N - n + 0.5) / (n + 0.5))`, which never goes
//! negative, so terms present in most of the corpus still score above zero.

use std::fmt;

use bm25::{Embedder, EmbedderBuilder, Scorer};
use serde::{Deserialize, Serialize, Serializer};
use sieve_core::config::LexicalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self::from(&LexicalConfig::default())
    }
}

impl From<&LexicalConfig> for Bm25Params {
    fn from(config: &LexicalConfig) -> Self {
        Self {
            k1: config.k1,
            b: config.b,
        }
    }
}

/// Splits on whitespace only; stopwords and length rules were already
/// applied by [`crate::tokenizer::Tokenizer`].
#[derive(Debug, Default, Clone, Copy)]
struct PreTokenized;

impl bm25::Tokenizer for PreTokenized {
    fn tokenize(&self, input_text: &str) -> Vec<String> {
        input_text.split_whitespace().map(str::to_string).collect()
    }
}

/// Persisted form. The scorer is rebuilt from the corpus on load.
#[derive(Serialize, Deserialize)]
struct Bm25Snapshot {
    params: Bm25Params,
    corpus: Vec<Vec<String>>,
}

#[derive(Serialize)]
struct Bm25SnapshotRef<'a> {
    params: Bm25Params,
    corpus: &'a [Vec<String>],
}

/// Immutable BM25 index. Document `i` here is document `i` of the corpus it
/// was built from.
#[derive(Deserialize)]
#[serde(from = "Bm25Snapshot")]
pub struct Bm25Index {
    params: Bm25Params,
    avgdl: f64,
    corpus: Vec<Vec<String>>,
    embedder: Embedder<u32, PreTokenized>,
    scorer: Scorer<usize>,
}

impl Bm25Index {
    pub fn build(corpus: &[Vec<String>], params: Bm25Params) -> Self {
        let total: usize = corpus.iter().map(Vec::len).sum();
        // An all-empty corpus still needs a usable length normaliser.
        let avgdl = if total == 0 {
            1.0
        } else {
            total as f64 / corpus.len() as f64
        };

        let embedder = EmbedderBuilder::<u32, PreTokenized>::with_avgdl(avgdl as f32)
            .k1(params.k1 as f32)
            .b(params.b as f32)
            .build();

        let mut scorer = Scorer::<usize>::new();
        for (i, tokens) in corpus.iter().enumerate() {
            scorer.upsert(&i, embedder.embed(&tokens.join(" ")));
        }

        Self {
            params,
            avgdl,
            corpus: corpus.to_vec(),
            embedder,
            scorer,
        }
    }

    /// Score of every document against the query, aligned to corpus order.
    /// Unknown tokens add nothing.
    pub fn scores(&self, query_tokens: &[String]) -> Vec<f64> {
        if query_tokens.is_empty() {
            return vec![0.0; self.len()];
        }
        let query = self.embedder.embed(&query_tokens.join(" "));
        (0..self.len())
            .map(|i| f64::from(self.scorer.score(&i, &query).unwrap_or(0.0)))
            .collect()
    }

    /// Up to `n` (document index, score) pairs with positive score, best
    /// first; equal scores keep corpus order.
    pub fn top_n(&self, query_tokens: &[String], n: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self
            .scores(query_tokens)
            .into_iter()
            .enumerate()
            .filter(|(_, s)| *s > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn avgdl(&self) -> f64 {
        self.avgdl
    }

    pub fn params(&self) -> Bm25Params {
        self.params
    }
}

impl From<Bm25Snapshot> for Bm25Index {
    fn from(snapshot: Bm25Snapshot) -> Self {
        Self::build(&snapshot.corpus, snapshot.params)
    }
}

impl Serialize for Bm25Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Bm25SnapshotRef {
            params: self.params,
            corpus: &self.corpus,
        }
        .serialize(serializer)
    }
}

impl Clone for Bm25Index {
    fn clone(&self) -> Self {
        Self::build(&self.corpus, self.params)
    }
}

impl fmt::Debug for Bm25Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bm25Index")
            .field("params", &self.params)
            .field("documents", &self.corpus.len())
            .field("avgdl", &self.avgdl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn q(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn avgdl_is_mean_token_count() {
        let idx = Bm25Index::build(
            &corpus(&["brewery license", "food permit kitchen inspection"]),
            Bm25Params::default(),
        );
        assert!((idx.avgdl() - 3.0).abs() < 1e-12);
        assert_eq!(idx.params(), Bm25Params::default());
    }

    #[test]
    fn rare_term_outweighs_common_term() {
        let idx = Bm25Index::build(
            &corpus(&[
                "license brewery",
                "license food",
                "license zoning",
                "parcel variance",
            ]),
            Bm25Params::default(),
        );
        let common = idx.scores(&q("license"))[0];
        let rare = idx.scores(&q("brewery"))[0];
        assert!(common > 0.0, "common terms keep a positive weight, got {common}");
        assert!(rare > common);
    }

    #[test]
    fn single_document_corpus_still_matches() {
        let idx = Bm25Index::build(&corpus(&["brewery license fee"]), Bm25Params::default());
        let top = idx.top_n(&q("brewery"), 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].0, 0);
    }

    #[test]
    fn shorter_document_wins_on_equal_frequency() {
        let idx = Bm25Index::build(
            &corpus(&[
                "brewery license",
                "brewery license renewal schedule fee deadline",
                "food permit kitchen",
            ]),
            Bm25Params::default(),
        );
        let scores = idx.scores(&q("brewery"));
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn zero_b_disables_length_normalization() {
        let params = Bm25Params { k1: 1.5, b: 0.0 };
        let idx = Bm25Index::build(
            &corpus(&[
                "brewery license",
                "brewery license renewal schedule fee deadline",
                "food permit kitchen",
            ]),
            params,
        );
        let scores = idx.scores(&q("brewery"));
        assert!((scores[0] - scores[1]).abs() < 1e-6);
    }

    #[test]
    fn scores_are_aligned_to_corpus() {
        let idx = Bm25Index::build(
            &corpus(&["food permit kitchen", "brewery license fee", "zoning variance parcel"]),
            Bm25Params::default(),
        );
        let scores = idx.scores(&q("brewery"));
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
        assert_eq!(scores[2], 0.0);
    }

    #[test]
    fn top_n_orders_by_score_and_drops_zero() {
        let idx = Bm25Index::build(
            &corpus(&[
                "brewery license",
                "brewery brewery brewery taproom",
                "food permit kitchen",
                "zoning variance parcel",
            ]),
            Bm25Params::default(),
        );
        let top = idx.top_n(&q("brewery"), 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 1);
        assert!(top[0].1 > top[1].1);
    }

    #[test]
    fn snapshot_rebuilds_identical_scores() {
        let idx = Bm25Index::build(
            &corpus(&["brewery license fee", "food permit kitchen", "zoning variance"]),
            Bm25Params::default(),
        );
        let json = serde_json::to_string(&idx).unwrap();
        let back: Bm25Index = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back.scores(&q("kitchen")), idx.scores(&q("kitchen")));
    }

    #[test]
    fn empty_corpus_scores_nothing() {
        let idx = Bm25Index::build(&[], Bm25Params::default());
        assert!(idx.is_empty());
        assert!(idx.scores(&q("anything")).is_empty());
    }
}
