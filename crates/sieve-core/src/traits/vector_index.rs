use crate::errors::SieveResult;
use crate::models::{IndexStats, VectorMatch};

/// A remote dense-vector index partitioned into namespaces.
pub trait IVectorIndex: Send + Sync {
    /// Nearest neighbours of `vector` within one partition, best first.
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        partition: &str,
        include_metadata: bool,
    ) -> SieveResult<Vec<VectorMatch>>;

    /// Dimension and per-partition counts.
    fn describe_stats(&self) -> SieveResult<IndexStats>;
}
