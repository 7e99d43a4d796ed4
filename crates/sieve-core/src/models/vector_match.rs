use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::hit::Metadata;

/// A raw match returned by the vector service for one partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub score: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Index-level statistics reported by the vector service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub dimension: usize,
    /// Physical partition id → vector count.
    pub partitions: BTreeMap<String, u64>,
}

impl IndexStats {
    /// Partition ids in sorted order.
    pub fn partition_ids(&self) -> Vec<String> {
        self.partitions.keys().cloned().collect()
    }
}
