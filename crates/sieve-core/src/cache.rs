//! Bounded, insertion-ordered cache shared by the embedding and query caches.
//!
//! Backed by `lru::LruCache`, but lookups use `peek`, so entries are never
//! promoted and eviction always removes the oldest-inserted entry.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

/// A thread-safe FIFO cache with a fixed capacity. Capacity 0 disables it.
pub struct FifoCache<K: Hash + Eq, V: Clone> {
    inner: Option<Mutex<LruCache<K, V>>>,
    capacity: usize,
}

impl<K: Hash + Eq, V: Clone> FifoCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            capacity,
        }
    }

    /// Look up a value without touching insertion order.
    pub fn get(&self, key: &K) -> Option<V> {
        let guard = self.lock()?;
        guard.peek(key).cloned()
    }

    /// Insert a value. If the key is already present the existing entry is
    /// kept. Returns the entry evicted to make room, if any.
    pub fn insert(&self, key: K, value: V) -> Option<(K, V)> {
        let mut guard = self.lock()?;
        if guard.contains(&key) {
            return None;
        }
        guard.push(key, value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().is_some_and(|guard| guard.contains(key))
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |guard| guard.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub fn clear(&self) {
        if let Some(mut guard) = self.lock() {
            guard.clear();
        }
    }

    /// Keys in insertion order, oldest first.
    pub fn keys_oldest_first(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.lock()
            .map(|guard| guard.iter().rev().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<K, V>>> {
        self.inner
            .as_ref()
            .map(|m| m.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<K: Hash + Eq, V: Clone> std::fmt::Debug for FifoCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}
