//! Lexical index construction.
//!
//! [`build_index`] does the work synchronously and checks a cancellation flag
//! between partitions. [`spawn_build`] runs it on a worker thread under a
//! supervisor that enforces the wall-clock budget and publishes the outcome
//! to a [`LexicalHandle`].

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use sieve_core::config::LexicalConfig;
use sieve_core::errors::LexicalError;
use sieve_core::traits::IVectorIndex;
use sieve_observability::tracing_setup::events;
use tracing::{debug, info, warn};

use crate::bm25::Bm25Params;
use crate::handle::LexicalHandle;
use crate::index::{IndexedDocument, LexicalIndex};
use crate::persist;
use crate::sampler::{sample_partition, sample_vector, SampledDocument};
use crate::tokenizer::Tokenizer;

/// Everything a build needs, owned so it can move onto a worker thread.
#[derive(Clone)]
pub struct BuildRequest {
    pub vector_index: Arc<dyn IVectorIndex>,
    pub partitions: Vec<String>,
    pub dimension: usize,
    pub config: LexicalConfig,
    pub tokenizer: Tokenizer,
    /// Where to persist a successful build. `None` skips persistence.
    pub cache_dir: Option<PathBuf>,
}

/// Sample every partition, tokenize, and index.
///
/// Partitions that fail to sample are skipped. Returns `EmptyCorpus` when no
/// document survives filtering and `BuildCancelled` once `cancel` is set.
pub fn build_index(req: &BuildRequest, cancel: &AtomicBool) -> Result<LexicalIndex, LexicalError> {
    let query_vector = sample_vector(req.dimension, req.config.sample_value);
    let mut sampled: Vec<SampledDocument> = Vec::new();

    for partition in &req.partitions {
        if cancel.load(Ordering::Relaxed) {
            return Err(LexicalError::BuildCancelled);
        }
        match sample_partition(
            req.vector_index.as_ref(),
            partition,
            &query_vector,
            req.config.sample_size,
            req.config.min_text_chars,
        ) {
            Ok(docs) => {
                debug!(partition = %partition, documents = docs.len(), "partition sampled");
                sampled.extend(docs);
            }
            Err(e) => events::partition_failed(partition, &e.to_string()),
        }
    }

    if cancel.load(Ordering::Relaxed) {
        return Err(LexicalError::BuildCancelled);
    }

    let texts: Vec<&str> = sampled.iter().map(|d| d.text.as_str()).collect();
    let tokenized = req
        .tokenizer
        .tokenize_documents(&texts, req.config.min_doc_tokens);

    let documents: Vec<IndexedDocument> = sampled
        .into_iter()
        .zip(tokenized)
        .filter_map(|(doc, tokens)| {
            tokens.map(|tokens| IndexedDocument {
                id: doc.id,
                partition: doc.partition,
                text: doc.text,
                tokens,
            })
        })
        .collect();

    if documents.is_empty() {
        return Err(LexicalError::EmptyCorpus);
    }

    Ok(LexicalIndex::from_documents(
        documents,
        Bm25Params::from(&req.config),
        req.tokenizer.clone(),
    ))
}

/// Build in the background under `req.config.build_timeout()`.
///
/// The returned handle belongs to the supervisor thread. On expiry the worker
/// is told to stop and whatever it produces later is dropped.
pub fn spawn_build(handle: Arc<LexicalHandle>, req: BuildRequest) -> JoinHandle<()> {
    thread::spawn(move || {
        let span = sieve_observability::lexical_build_span!(req.partitions.len());
        let _guard = span.enter();

        let started = Instant::now();
        let budget = req.config.build_timeout();
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        {
            let req = req.clone();
            let cancel = cancel.clone();
            thread::spawn(move || {
                let _ = tx.send(build_index(&req, &cancel));
            });
        }

        match rx.recv_timeout(budget) {
            Ok(Ok(index)) => {
                if let Some(dir) = &req.cache_dir {
                    if req.config.persist {
                        if let Err(e) = persist::save(dir, index.bm25(), index.documents()) {
                            warn!(error = %e, "failed to persist lexical index");
                        }
                    }
                }
                let documents = index.len();
                if handle.publish_ready(Arc::new(index)) {
                    events::lexical_ready(documents, false, started.elapsed().as_millis() as u64);
                }
            }
            Ok(Err(e)) => {
                handle.publish_disabled(e.to_string());
            }
            Err(RecvTimeoutError::Timeout) => {
                cancel.store(true, Ordering::Relaxed);
                let err = LexicalError::BuildTimedOut {
                    budget_ms: budget.as_millis() as u64,
                };
                handle.publish_disabled(err.to_string());
            }
            Err(RecvTimeoutError::Disconnected) => {
                handle.publish_disabled("lexical build worker exited without a result".to_string());
            }
        }
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            status = handle.status().label(),
            "lexical build finished"
        );
    })
}
