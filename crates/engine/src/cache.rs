use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use lru::LruCache;
use renewal_aggregate::AggregateBundle;

const CACHE_CAPACITY: usize = 32;

/// Cache key: scope, report date, and the dataset generation the bundle was
/// computed from. A reload bumps the generation, so stale bundles simply
/// stop matching instead of needing eviction.
pub type CacheKey = (String, NaiveDate, u64);

/// Small LRU over computed aggregate bundles. Aggregation is cheap but a
/// session that flips between the same handful of scopes re-renders often,
/// and identical inputs must yield identical numbers.
pub struct AggregateCache {
    inner: Mutex<LruCache<CacheKey, AggregateBundle>>,
}

impl AggregateCache {
    #[must_use]
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<AggregateBundle> {
        self.lock().get(key).cloned()
    }

    pub fn put(&self, key: CacheKey, bundle: AggregateBundle) {
        self.lock().put(key, bundle);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, AggregateBundle>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AggregateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use renewal_aggregate::AggregateBundle;

    fn bundle(date: NaiveDate) -> AggregateBundle {
        AggregateBundle::compute(&[], &[], date)
    }

    fn key(scope: &str, generation: u64) -> CacheKey {
        (
            scope.to_string(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            generation,
        )
    }

    #[test]
    fn put_then_get_round_trips() {
        let cache = AggregateCache::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        cache.put(key("*", 0), bundle(date));
        assert_eq!(cache.get(&key("*", 0)), Some(bundle(date)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn generation_bump_misses_old_entries() {
        let cache = AggregateCache::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        cache.put(key("*", 0), bundle(date));
        assert_eq!(cache.get(&key("*", 1)), None);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = AggregateCache::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        cache.put(key("ACME", 0), bundle(date));
        cache.clear();
        assert!(cache.is_empty());
    }
}
