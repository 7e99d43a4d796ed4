/// Vector backend errors.
#[derive(Debug, thiserror::Error)]
pub enum VectorError {
    #[error("vector backend unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("partition {partition} query failed: {reason}")]
    PartitionFailed { partition: String, reason: String },

    #[error("partition {partition} timed out after {timeout_ms}ms")]
    Timeout { partition: String, timeout_ms: u64 },

    #[error("invalid response from vector backend: {reason}")]
    InvalidResponse { reason: String },
}
