use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fused_result::FusedResult;
use super::lexical_status::LexicalStatus;

/// A partition that failed or timed out during one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionFailure {
    pub partition: String,
    pub reason: String,
}

/// Everything a single hybrid search produced.
///
/// Shared as `Arc<SearchOutcome>`; a query cache hit returns the very same
/// allocation, so whether a call was served from cache is recorded in the
/// query log rather than here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub request_id: Uuid,
    /// Trimmed, lowercased query text.
    pub query: String,
    pub top_k: usize,
    pub results: Vec<FusedResult>,
    pub selected_tags: Vec<String>,
    pub partitions_searched: Vec<String>,
    pub partitions_failed: Vec<PartitionFailure>,
    pub lexical_status: LexicalStatus,
}

impl SearchOutcome {
    /// Whether this outcome is complete enough to be served again from cache.
    pub fn is_cacheable(&self) -> bool {
        self.partitions_failed.is_empty() && self.lexical_status != LexicalStatus::Building
    }
}
