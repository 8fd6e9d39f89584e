//! A bounded, thread-safe cache mapping a hashable key to a cheaply-clonable
//! value, generic over both so it can sit underneath the root `uaparse`
//! crate's `Analyzer` without that crate's `Result` type being visible down
//! here (§6 "parse cache").
//!
//! Adapted from a `thread_local!`/`RefCell`-guarded `lru::LruCache` model
//! cache to a `Mutex`-guarded one shared across threads, since the
//! analyzer's cache is meant to be shared by every caller of a single
//! `Analyzer`.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// A bounded LRU cache keyed on `K`, storing `V`. A capacity of `0` disables
/// caching outright: every lookup misses and `get_or_compute` always calls
/// its loader.
pub struct ParseCache<K, V> {
    inner: Option<Mutex<LruCache<K, V>>>,
}

impl<K, V> ParseCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Builds a cache holding at most `capacity` entries. `capacity == 0`
    /// yields a cache that never stores anything.
    pub fn new(capacity: usize) -> Self {
        let inner = NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self { inner }
    }

    /// Returns the cached value for `key`, computing and storing it via
    /// `loader` on a miss. Concurrent callers racing on the same key may
    /// both invoke `loader`; only one result survives in the cache, but both
    /// callers get a correct value (best-effort, not at-most-once, per §6).
    pub fn get_or_compute(&self, key: K, loader: impl FnOnce() -> V) -> V {
        let Some(lock) = &self.inner else {
            return loader();
        };

        if let Some(hit) = lock.lock().expect("cache mutex poisoned").get(&key).cloned() {
            tracing::trace!("parse cache hit");
            return hit;
        }

        let value = loader();
        lock.lock()
            .expect("cache mutex poisoned")
            .put(key, value.clone());
        tracing::trace!("parse cache miss, value stored");
        value
    }

    /// Evicts every entry. A no-op on a disabled (`capacity == 0`) cache.
    pub fn clear(&self) {
        if let Some(lock) = &self.inner {
            lock.lock().expect("cache mutex poisoned").clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .as_ref()
            .map(|lock| lock.lock().expect("cache mutex poisoned").len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn caches_across_calls() {
        let cache = ParseCache::new(4);
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            cache.get_or_compute("ua".to_string(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                42
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = ParseCache::new(0);
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            cache.get_or_compute("ua".to_string(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                42
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ParseCache::new(4);
        cache.get_or_compute("ua".to_string(), || 1);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn evicts_least_recently_used_beyond_capacity() {
        let cache: ParseCache<u32, u32> = ParseCache::new(2);
        cache.get_or_compute(1, || 1);
        cache.get_or_compute(2, || 2);
        cache.get_or_compute(3, || 3);
        assert_eq!(cache.len(), 2);
    }

    proptest::proptest! {
        #[test]
        fn len_never_exceeds_capacity(capacity in 0usize..16, keys in proptest::collection::vec(0u32..8, 0..64)) {
            let cache: ParseCache<u32, u32> = ParseCache::new(capacity);
            for key in keys {
                cache.get_or_compute(key, || key);
            }
            proptest::prop_assert!(cache.len() <= capacity);
        }

        #[test]
        fn zero_capacity_always_recomputes(keys in proptest::collection::vec(0u32..8, 0..32)) {
            let cache: ParseCache<u32, u32> = ParseCache::new(0);
            let calls = std::sync::atomic::AtomicUsize::new(0);
            for key in &keys {
                cache.get_or_compute(*key, || {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    *key
                });
            }
            proptest::prop_assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), keys.len());
            proptest::prop_assert!(cache.is_empty());
        }

        #[test]
        fn a_value_just_inserted_is_always_a_hit(capacity in 1usize..16, key in 0u32..100) {
            let cache: ParseCache<u32, u32> = ParseCache::new(capacity);
            let calls = std::sync::atomic::AtomicUsize::new(0);
            let load = || {
                calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                key
            };
            cache.get_or_compute(key, load);
            cache.get_or_compute(key, load);
            proptest::prop_assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        }
    }
}
