use proptest::prelude::*;
use sieve_core::FifoCache;

proptest! {
    #[test]
    fn never_exceeds_capacity(capacity in 1usize..16, keys in prop::collection::vec(0u32..64, 0..200)) {
        let cache = FifoCache::new(capacity);
        for k in keys {
            cache.insert(k, k);
            prop_assert!(cache.len() <= capacity);
        }
    }

    #[test]
    fn eviction_removes_oldest_inserted(capacity in 1usize..8, extra in 1usize..8) {
        let cache = FifoCache::new(capacity);
        for k in 0..capacity {
            cache.insert(k, k);
        }
        for (i, k) in (capacity..capacity + extra).enumerate() {
            let evicted = cache.insert(k, k);
            prop_assert_eq!(evicted, Some((i, i)));
        }
        let expected: Vec<usize> = (extra..capacity + extra).collect();
        prop_assert_eq!(cache.keys_oldest_first(), expected);
    }

    #[test]
    fn lookups_never_change_eviction_order(capacity in 2usize..8, lookups in prop::collection::vec(0usize..8, 0..32)) {
        let cache = FifoCache::new(capacity);
        for k in 0..capacity {
            cache.insert(k, k);
        }
        for p in lookups {
            let _ = cache.get(&p);
        }
        prop_assert_eq!(cache.insert(capacity, capacity), Some((0, 0)));
    }
}
