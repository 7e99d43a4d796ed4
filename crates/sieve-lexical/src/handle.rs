//! Shared, one-shot view of the lexical index lifecycle.
//!
//! A handle starts `Building` and settles exactly once into `Ready` or
//! `Disabled`. Readers never block unless they call [`LexicalHandle::wait_ready`].

use std::path::Path;
use std::sync::{Arc, Condvar, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use sieve_core::config::LexicalConfig;
use sieve_core::errors::LexicalError;
use sieve_core::models::{LexicalHit, LexicalStatus};
use sieve_core::traits::IVectorIndex;
use sieve_observability::tracing_setup::events;
use tracing::{info, warn};

use crate::builder::{spawn_build, BuildRequest};
use crate::index::LexicalIndex;
use crate::persist;
use crate::stopwords::StopwordSet;
use crate::tokenizer::Tokenizer;

#[derive(Debug, Clone)]
enum State {
    Building,
    Ready(Arc<LexicalIndex>),
    Disabled(String),
}

#[derive(Debug)]
pub struct LexicalHandle {
    state: RwLock<State>,
    settled: Mutex<bool>,
    changed: Condvar,
}

impl LexicalHandle {
    pub fn building() -> Self {
        Self::with_state(State::Building, false)
    }

    pub fn ready(index: LexicalIndex) -> Self {
        Self::with_state(State::Ready(Arc::new(index)), true)
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self::with_state(State::Disabled(reason.into()), true)
    }

    fn with_state(state: State, settled: bool) -> Self {
        Self {
            state: RwLock::new(state),
            settled: Mutex::new(settled),
            changed: Condvar::new(),
        }
    }

    /// Load persisted artifacts or start a background build.
    ///
    /// Returns immediately. Corrupt or missing artifacts trigger a rebuild;
    /// a disabled config yields a `Disabled` handle.
    pub fn start(
        vector_index: Arc<dyn IVectorIndex>,
        partitions: Vec<String>,
        dimension: usize,
        config: &LexicalConfig,
    ) -> Arc<Self> {
        if !config.enabled {
            let reason = "disabled by configuration";
            events::lexical_disabled(reason);
            return Arc::new(Self::disabled(reason));
        }

        let tokenizer = Tokenizer::new(StopwordSet::resolve(config.stopwords_path.as_deref()));
        let cache_dir = persist::resolve_cache_dir(&config.cache_dir);

        if let Some(handle) = Self::try_load(&cache_dir, &tokenizer) {
            return Arc::new(handle);
        }

        let handle = Arc::new(Self::building());
        spawn_build(
            handle.clone(),
            BuildRequest {
                vector_index,
                partitions,
                dimension,
                config: config.clone(),
                tokenizer,
                cache_dir: Some(cache_dir),
            },
        );
        handle
    }

    fn try_load(dir: &Path, tokenizer: &Tokenizer) -> Option<Self> {
        let started = Instant::now();
        match persist::load(dir) {
            Ok((bm25, documents)) => {
                let index = LexicalIndex::from_parts(bm25, documents, tokenizer.clone());
                events::lexical_ready(index.len(), true, started.elapsed().as_millis() as u64);
                Some(Self::ready(index))
            }
            Err(LexicalError::CacheMissing { path }) => {
                info!(path = %path, "no lexical artifacts, building");
                None
            }
            Err(e) => {
                warn!(error = %e, "lexical artifacts unusable, rebuilding");
                None
            }
        }
    }

    /// Settle as `Ready`. Returns `false` if already settled.
    pub fn publish_ready(&self, index: Arc<LexicalIndex>) -> bool {
        self.settle(State::Ready(index))
    }

    /// Settle as `Disabled`. Returns `false` if already settled.
    pub fn publish_disabled(&self, reason: String) -> bool {
        let published = self.settle(State::Disabled(reason.clone()));
        if published {
            events::lexical_disabled(&reason);
        }
        published
    }

    fn settle(&self, next: State) -> bool {
        let mut settled = self.settled.lock().unwrap_or_else(PoisonError::into_inner);
        if *settled {
            return false;
        }
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        *settled = true;
        self.changed.notify_all();
        true
    }

    fn read(&self) -> State {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn status(&self) -> LexicalStatus {
        self.snapshot().0
    }

    pub fn index(&self) -> Option<Arc<LexicalIndex>> {
        self.snapshot().1
    }

    pub fn snapshot(&self) -> (LexicalStatus, Option<Arc<LexicalIndex>>) {
        match self.read() {
            State::Building => (LexicalStatus::Building, None),
            State::Ready(index) => (LexicalStatus::Ready, Some(index)),
            State::Disabled(reason) => (LexicalStatus::Disabled { reason }, None),
        }
    }

    /// Block up to `timeout` for the handle to settle, then report status.
    pub fn wait_ready(&self, timeout: Duration) -> LexicalStatus {
        if !timeout.is_zero() {
            let guard = self.settled.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = self
                .changed
                .wait_timeout_while(guard, timeout, |settled| !*settled)
                .unwrap_or_else(PoisonError::into_inner);
        }
        self.status()
    }

    /// Search if ready; otherwise report why there are no lexical hits.
    pub fn search(&self, query: &str, top_k: usize) -> (LexicalStatus, Vec<LexicalHit>) {
        match self.snapshot() {
            (status, Some(index)) => (status, index.search(query, top_k)),
            (status, None) => (status, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn settles_only_once() {
        let h = LexicalHandle::building();
        assert_eq!(h.status(), LexicalStatus::Building);
        assert!(h.publish_disabled("timed out".into()));
        assert!(!h.publish_disabled("again".into()));
        assert_eq!(
            h.status(),
            LexicalStatus::Disabled {
                reason: "timed out".into()
            }
        );
    }

    #[test]
    fn wait_ready_wakes_on_publish() {
        let h = Arc::new(LexicalHandle::building());
        let publisher = {
            let h = h.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                h.publish_disabled("empty corpus".into());
            })
        };
        let status = h.wait_ready(Duration::from_secs(5));
        publisher.join().unwrap();
        assert!(matches!(status, LexicalStatus::Disabled { .. }));
    }

    #[test]
    fn wait_ready_times_out_while_building() {
        let h = LexicalHandle::building();
        assert_eq!(h.wait_ready(Duration::from_millis(10)), LexicalStatus::Building);
    }

    #[test]
    fn search_while_building_is_empty_and_labelled() {
        let h = LexicalHandle::building();
        let (status, hits) = h.search("anything", 4);
        assert_eq!(status, LexicalStatus::Building);
        assert!(hits.is_empty());
    }
}
