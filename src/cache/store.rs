//! Mutex-guarded cache of completed lookups.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::LawyerRecord;

/// One cached lookup result with its insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub record: LawyerRecord,
    pub timestamp: DateTime<Utc>,
}

/// Monotonic effectiveness counters. Survive persistence so long-running
/// deployments keep their history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub expired_evictions: u64,
    pub duplicates_avoided: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    counters: CacheCounters,
}

/// Expiring map from canonical cache key to completed record.
///
/// Negative results (failed lookups) are cached too, so a known-missing
/// registration is not re-fetched until its entry expires.
#[derive(Debug)]
pub struct QueryCache {
    inner: Mutex<CacheInner>,
    expiry: Option<Duration>,
}

impl QueryCache {
    /// `expiry_hours` of 0 (or less) means entries never expire.
    pub fn new(expiry_hours: i64) -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
            expiry: (expiry_hours > 0).then(|| Duration::hours(expiry_hours)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|d| now - entry.timestamp > d)
    }

    /// Fetch a cached record, evicting it first if it has expired.
    pub fn lookup(&self, key: &str) -> Option<LawyerRecord> {
        self.lookup_at(key, Utc::now())
    }

    pub fn lookup_at(&self, key: &str, now: DateTime<Utc>) -> Option<LawyerRecord> {
        let mut inner = self.lock();

        let expired = inner.entries.get(key).is_some_and(|e| self.is_expired(e, now));
        if expired {
            inner.entries.remove(key);
            inner.counters.expired_evictions += 1;
            inner.counters.misses += 1;
            debug!(key, "cache entry expired");
            return None;
        }

        match inner.entries.get(key).map(|e| e.record.clone()) {
            Some(record) => {
                inner.counters.hits += 1;
                Some(record)
            }
            None => {
                inner.counters.misses += 1;
                None
            }
        }
    }

    /// Store a completed record, replacing any previous entry for the key.
    pub fn store(&self, key: &str, record: LawyerRecord) {
        self.store_at(key, record, Utc::now());
    }

    pub fn store_at(&self, key: &str, record: LawyerRecord, now: DateTime<Utc>) {
        let mut inner = self.lock();
        inner
            .entries
            .insert(key.to_string(), CacheEntry { record, timestamp: now });
        inner.counters.stores += 1;
    }

    pub fn record_duplicates_avoided(&self, n: u64) {
        self.lock().counters.duplicates_avoided += n;
    }

    pub fn counters(&self) -> CacheCounters {
        self.lock().counters.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of entries and counters for persistence.
    pub(crate) fn snapshot(&self) -> (HashMap<String, CacheEntry>, CacheCounters) {
        let inner = self.lock();
        (inner.entries.clone(), inner.counters.clone())
    }

    /// Replace contents from a persisted snapshot, dropping entries already
    /// expired at `now`. Returns how many entries were kept.
    pub(crate) fn restore(
        &self,
        mut entries: HashMap<String, CacheEntry>,
        counters: CacheCounters,
        now: DateTime<Utc>,
    ) -> usize {
        entries.retain(|_, e| !self.is_expired(e, now));
        let kept = entries.len();
        let mut inner = self.lock();
        inner.entries = entries;
        inner.counters = counters;
        kept
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn record(name: &str) -> LawyerRecord {
        let mut r = LawyerRecord::new("123456", "SP");
        r.name = name.to_string();
        r.success = true;
        r
    }

    #[test]
    fn store_then_lookup_hits() {
        let cache = QueryCache::new(24);
        cache.store("123456/SP", record("JOAO SILVA"));

        let found = cache.lookup("123456/SP").unwrap();
        assert_eq!(found.name, "JOAO SILVA");

        let counters = cache.counters();
        assert_eq!(counters.stores, 1);
        assert_eq!(counters.hits, 1);
        assert_eq!(counters.misses, 0);
    }

    #[test]
    fn miss_on_unknown_key() {
        let cache = QueryCache::new(24);
        assert!(cache.lookup("999/RJ").is_none());
        assert_eq!(cache.counters().misses, 1);
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = QueryCache::new(24);
        let stored_at = Utc::now();
        cache.store_at("123456/SP", record("JOAO SILVA"), stored_at);

        let later = stored_at + Duration::hours(25);
        assert!(cache.lookup_at("123456/SP", later).is_none());
        assert!(cache.is_empty());

        let counters = cache.counters();
        assert_eq!(counters.expired_evictions, 1);
        assert_eq!(counters.misses, 1);
    }

    #[test]
    fn entry_just_inside_expiry_still_hits() {
        let cache = QueryCache::new(24);
        let stored_at = Utc::now();
        cache.store_at("123456/SP", record("JOAO SILVA"), stored_at);

        let almost = stored_at + Duration::hours(24);
        assert!(cache.lookup_at("123456/SP", almost).is_some());
    }

    #[test]
    fn zero_expiry_never_evicts() {
        let cache = QueryCache::new(0);
        let stored_at = Utc::now();
        cache.store_at("123456/SP", record("JOAO SILVA"), stored_at);

        let far_future = stored_at + Duration::days(3650);
        assert!(cache.lookup_at("123456/SP", far_future).is_some());
    }

    #[test]
    fn store_replaces_previous_entry() {
        let cache = QueryCache::new(24);
        cache.store("123456/SP", record("FIRST NAME"));
        cache.store("123456/SP", record("SECOND NAME"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup("123456/SP").unwrap().name, "SECOND NAME");
        assert_eq!(cache.counters().stores, 2);
    }

    #[test]
    fn concurrent_access_is_safe() {
        let cache = Arc::new(QueryCache::new(24));
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                let key = format!("{i}/SP");
                cache.store(&key, record("JOAO SILVA"));
                assert!(cache.lookup(&key).is_some());
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 8);
        assert_eq!(cache.counters().hits, 8);
    }
}
