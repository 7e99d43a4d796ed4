//! Wire types for the vector service REST API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sieve_core::models::{IndexStats, Metadata, VectorMatch};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub namespace: &'a str,
    pub include_metadata: bool,
    pub include_values: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<WireMatch>,
}

#[derive(Debug, Deserialize)]
pub struct WireMatch {
    pub id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl From<WireMatch> for VectorMatch {
    fn from(m: WireMatch) -> Self {
        VectorMatch {
            id: m.id,
            score: m.score,
            metadata: m.metadata.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(default)]
    pub dimension: usize,
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSummary {
    #[serde(default)]
    pub vector_count: u64,
}

impl From<StatsResponse> for IndexStats {
    fn from(s: StatsResponse) -> Self {
        IndexStats {
            dimension: s.dimension,
            partitions: s
                .namespaces
                .into_iter()
                .map(|(name, summary)| (name, summary.vector_count))
                .collect(),
        }
    }
}
