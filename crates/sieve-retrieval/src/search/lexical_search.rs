//! Lexical candidates from the shared [`LexicalHandle`].

use std::time::Duration;

use sieve_core::models::{LexicalHit, LexicalStatus};
use sieve_lexical::LexicalHandle;
use tracing::debug;

/// Score `query` lexically. While the index is building, waits up to `wait`
/// for it to settle; a zero wait returns `Building` immediately.
pub fn search_lexical(
    handle: &LexicalHandle,
    query: &str,
    top_k: usize,
    wait: Duration,
) -> (LexicalStatus, Vec<LexicalHit>) {
    if handle.status() == LexicalStatus::Building && !wait.is_zero() {
        let status = handle.wait_ready(wait);
        debug!(status = status.label(), wait_ms = wait.as_millis() as u64, "waited for lexical index");
    }
    let (status, hits) = handle.search(query, top_k);
    debug!(status = status.label(), hits = hits.len(), "lexical search");
    (status, hits)
}
