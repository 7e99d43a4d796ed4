use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::hit::{Metadata, Source};

/// One entry of the fused ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedResult {
    pub id: String,
    pub score: f64,
    pub sources: BTreeSet<Source>,
    pub metadata: Metadata,
    pub partition: String,
}

impl FusedResult {
    /// Found by both vector and lexical search.
    pub fn is_hybrid(&self) -> bool {
        self.sources.contains(&Source::Vector) && self.sources.contains(&Source::Lexical)
    }
}
