//! Vector fan-out across routed partitions.
//!
//! Sequential mode queries partitions one after another on the caller's
//! thread. Concurrent mode starts one detached worker per partition and
//! collects replies over a channel until a shared deadline; workers that
//! miss it are abandoned and their partition is recorded as timed out.

use std::collections::{BTreeSet, HashMap};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sieve_core::config::RetrievalConfig;
use sieve_core::errors::{SieveResult, VectorError};
use sieve_core::models::{PartitionFailure, VectorHit, VectorMatch};
use sieve_core::traits::IVectorIndex;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOutMode {
    Sequential,
    Concurrent { timeout: Duration },
}

impl From<&RetrievalConfig> for FanOutMode {
    fn from(config: &RetrievalConfig) -> Self {
        if config.concurrent_fanout {
            FanOutMode::Concurrent {
                timeout: config.partition_timeout(),
            }
        } else {
            FanOutMode::Sequential
        }
    }
}

/// Merged hits plus the partitions that contributed nothing because they failed.
#[derive(Debug, Clone, Default)]
pub struct FanOutResult {
    pub hits: Vec<VectorHit>,
    pub failures: Vec<PartitionFailure>,
}

impl FanOutResult {
    pub fn all_failed(&self, attempted: usize) -> bool {
        attempted > 0 && self.failures.len() == attempted
    }
}

pub struct PartitionFanOut {
    index: Arc<dyn IVectorIndex>,
    mode: FanOutMode,
}

impl PartitionFanOut {
    pub fn new(index: Arc<dyn IVectorIndex>, mode: FanOutMode) -> Self {
        Self { index, mode }
    }

    pub fn mode(&self) -> FanOutMode {
        self.mode
    }

    /// Query every partition for `top_k` matches and merge them.
    pub fn search(&self, vector: &Arc<[f32]>, partitions: &[String], top_k: usize) -> FanOutResult {
        let replies = match self.mode {
            FanOutMode::Sequential => partitions
                .iter()
                .map(|p| (p.clone(), self.index.query(vector, top_k, p, true)))
                .collect(),
            FanOutMode::Concurrent { timeout } => self.concurrent(vector, partitions, top_k, timeout),
        };
        collect(partitions, replies, top_k, self.mode)
    }

    fn concurrent(
        &self,
        vector: &Arc<[f32]>,
        partitions: &[String],
        top_k: usize,
        timeout: Duration,
    ) -> HashMap<String, SieveResult<Vec<VectorMatch>>> {
        let (tx, rx) = mpsc::channel();
        let mut replies = HashMap::new();
        let mut pending = 0usize;

        for partition in partitions {
            let tx = tx.clone();
            let index = Arc::clone(&self.index);
            let vector = Arc::clone(vector);
            let name = partition.clone();
            let spawned = std::thread::Builder::new()
                .name(format!("sieve-partition-{partition}"))
                .spawn(move || {
                    let reply = index.query(&vector, top_k, &name, true);
                    // The receiver is gone once the deadline passes.
                    let _ = tx.send((name, reply));
                });
            match spawned {
                Ok(_) => pending += 1,
                Err(e) => {
                    replies.insert(
                        partition.clone(),
                        Err(VectorError::PartitionFailed {
                            partition: partition.clone(),
                            reason: format!("failed to spawn worker: {e}"),
                        }
                        .into()),
                    );
                }
            }
        }
        drop(tx);

        let deadline = Instant::now() + timeout;
        while pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((partition, reply)) => {
                    pending -= 1;
                    replies.insert(partition, reply);
                }
                Err(_) => break,
            }
        }
        replies
    }
}

fn collect(
    partitions: &[String],
    mut replies: HashMap<String, SieveResult<Vec<VectorMatch>>>,
    top_k: usize,
    mode: FanOutMode,
) -> FanOutResult {
    let mut result = FanOutResult::default();
    let mut lists = Vec::with_capacity(partitions.len());

    for partition in partitions {
        match replies.remove(partition) {
            Some(Ok(matches)) => {
                debug!(partition = %partition, matches = matches.len(), "partition answered");
                lists.push(
                    matches
                        .into_iter()
                        .map(|m| VectorHit {
                            id: m.id,
                            score: m.score,
                            partition: partition.clone(),
                            metadata: m.metadata,
                        })
                        .collect::<Vec<_>>(),
                );
            }
            Some(Err(e)) => result.failures.push(PartitionFailure {
                partition: partition.clone(),
                reason: e.to_string(),
            }),
            None => {
                let timeout_ms = match mode {
                    FanOutMode::Concurrent { timeout } => timeout.as_millis() as u64,
                    FanOutMode::Sequential => 0,
                };
                let e = VectorError::Timeout {
                    partition: partition.clone(),
                    timeout_ms,
                };
                warn!(partition = %partition, timeout_ms, "partition missed the fan-out deadline");
                result.failures.push(PartitionFailure {
                    partition: partition.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    result.hits = merge_hits(lists.into_iter().flatten().collect(), top_k);
    result
}

/// Order by score descending, then partition and id; keep each id once; cap at `top_k`.
pub fn merge_hits(mut hits: Vec<VectorHit>, top_k: usize) -> Vec<VectorHit> {
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.partition.cmp(&b.partition))
            .then_with(|| a.id.cmp(&b.id))
    });
    let mut seen = BTreeSet::new();
    hits.retain(|h| seen.insert(h.id.clone()));
    hits.truncate(top_k);
    hits
}
