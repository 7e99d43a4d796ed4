//! Weighted, rank-decayed fusion of vector and lexical rankings.
//!
//! Each hit contributes `score × weight × (1 − rank × decay)` where `rank` is
//! its zero-based position in its own list. Contributions for the same id are
//! summed and the sources unioned.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use sieve_core::config::RetrievalConfig;
use sieve_core::constants::LEXICAL_TEXT_KEY;
use sieve_core::models::{FusedResult, Hit, Source};

/// Per-source weights and the per-rank decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub vector: f64,
    pub lexical: f64,
    pub rank_decay: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for FusionWeights {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            vector: config.vector_weight,
            lexical: config.lexical_weight,
            rank_decay: config.rank_decay,
        }
    }
}

impl FusionWeights {
    pub fn weight(&self, source: Source) -> f64 {
        match source {
            Source::Vector => self.vector,
            Source::Lexical => self.lexical,
        }
    }

    pub fn contribution(&self, hit: &Hit, rank: usize) -> f64 {
        hit.score() * self.weight(hit.source()) * (1.0 - rank as f64 * self.rank_decay)
    }
}

struct Accumulator {
    result: FusedResult,
    /// Best (source, rank) seen, for tie-breaking.
    first_seen: (Source, usize),
}

/// Fuse ranked hit lists into at most `top_k` results, best first.
///
/// Each input list is ranked independently; within a list only the first
/// occurrence of an id counts. Ties on combined score fall back to the
/// earliest (source, rank), vector first, then to id.
pub fn fuse(lists: &[Vec<Hit>], weights: &FusionWeights, top_k: usize) -> Vec<FusedResult> {
    let mut by_id: HashMap<String, Accumulator> = HashMap::new();

    for list in lists {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for (rank, hit) in list.iter().take(top_k).enumerate() {
            if !seen.insert(hit.id()) {
                continue;
            }
            let contribution = weights.contribution(hit, rank);
            let key = (hit.source(), rank);

            match by_id.get_mut(hit.id()) {
                Some(acc) => {
                    acc.result.score += contribution;
                    acc.result.sources.insert(hit.source());
                    if let Hit::Lexical(lex) = hit {
                        acc.result
                            .metadata
                            .entry(LEXICAL_TEXT_KEY.to_string())
                            .or_insert_with(|| serde_json::Value::String(lex.text.clone()));
                    }
                    if key < acc.first_seen {
                        acc.first_seen = key;
                    }
                }
                None => {
                    by_id.insert(
                        hit.id().to_string(),
                        Accumulator {
                            result: FusedResult {
                                id: hit.id().to_string(),
                                score: contribution,
                                sources: BTreeSet::from([hit.source()]),
                                metadata: hit.metadata(),
                                partition: hit.partition().to_string(),
                            },
                            first_seen: key,
                        },
                    );
                }
            }
        }
    }

    let mut fused: Vec<Accumulator> = by_id.into_values().collect();
    fused.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
            .then_with(|| a.result.id.cmp(&b.result.id))
    });
    fused.truncate(top_k);
    fused.into_iter().map(|acc| acc.result).collect()
}
