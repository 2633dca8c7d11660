//! Cache Store Module
//!
//! TTL cache over a swappable storage backend. Entries are never mutated in
//! place: every write replaces the envelope with a fresh timestamp, and reads
//! only observe.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, Clock, StorageBackend, SystemClock};
use crate::error::Result;

// == Cache Store ==
/// Key-value cache with expiry semantics.
///
/// Concurrent writers to the same key race with last-write-wins; the store
/// adds no locking of its own.
#[derive(Debug)]
pub struct CacheStore<S, C = SystemClock> {
    /// Underlying medium
    storage: S,
    /// Time source for stamping and validity checks
    clock: C,
    /// TTL in milliseconds used by `set`
    default_ttl_ms: u64,
    /// Activity counters
    stats: StatsRecorder,
}

impl<S: StorageBackend> CacheStore<S> {
    // == Constructor ==
    /// Creates a store on the wall clock.
    ///
    /// # Arguments
    /// * `storage` - Backend holding the entries
    /// * `default_ttl_ms` - TTL applied by [`CacheStore::set`]
    pub fn new(storage: S, default_ttl_ms: u64) -> Self {
        Self::with_clock(storage, SystemClock, default_ttl_ms)
    }
}

impl<S: StorageBackend, C: Clock> CacheStore<S, C> {
    /// Creates a store with an explicit time source.
    pub fn with_clock(storage: S, clock: C, default_ttl_ms: u64) -> Self {
        Self {
            storage,
            clock,
            default_ttl_ms,
            stats: StatsRecorder::default(),
        }
    }

    pub fn default_ttl_ms(&self) -> u64 {
        self.default_ttl_ms
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // == Set ==
    /// Stores `data` under `key` with the default TTL.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        let ttl = i64::try_from(self.default_ttl_ms).unwrap_or(i64::MAX);
        self.set_with_ttl(key, data, ttl)
    }

    /// Stores `data` under `key`, replacing any previous entry.
    ///
    /// Negative TTLs are clamped to zero, which writes an entry that is
    /// already expired.
    pub fn set_with_ttl<T: Serialize + ?Sized>(&self, key: &str, data: &T, ttl_ms: i64) -> Result<()> {
        let entry = CacheEntry::new(serde_json::to_value(data)?, ttl_ms, self.clock.now_ms());
        let ttl = entry.ttl;

        self.storage.set_item(key, serde_json::to_value(entry)?)?;
        self.stats.record_write();

        debug!("Cache write: key={}, ttl={}ms", key, ttl);
        Ok(())
    }

    // == Get ==
    /// Returns the cached value if present, well-formed and unexpired.
    ///
    /// Expired entries are left in storage.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = self.clock.now_ms();
        let Some(entry) = self.load(key).filter(|entry| entry.is_valid_at(now)) else {
            self.stats.record_miss();
            debug!("Cache miss: key={}", key);
            return None;
        };

        match serde_json::from_value(entry.data) {
            Ok(data) => {
                self.stats.record_hit();
                debug!("Cache hit: key={}", key);
                Some(data)
            }
            Err(err) => {
                self.stats.record_miss();
                warn!("Cached data for key={} has unexpected shape: {}", key, err);
                None
            }
        }
    }

    // == Get Stale ==
    /// Returns the cached value regardless of age.
    ///
    /// Malformed entries are still a miss. Used to serve last-known-good data
    /// after a failed refresh; does not count towards hit statistics.
    pub fn get_stale<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.load(key)?;
        serde_json::from_value(entry.data).ok()
    }

    // == Is Valid ==
    /// Checks freshness without decoding the data.
    pub fn is_valid(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.load(key).is_some_and(|entry| entry.is_valid_at(now))
    }

    // == Force Refresh ==
    /// Fetches fresh data, writes it and returns it.
    ///
    /// When `fetch` fails its error is returned as is and the stored entry is
    /// not touched.
    pub async fn force_refresh<T, F, Fut>(&self, key: &str, fetch: F) -> anyhow::Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match fetch().await {
            Ok(data) => {
                self.set(key, &data)?;
                self.stats.record_refresh();
                info!("Cache refreshed: key={}", key);
                Ok(data)
            }
            Err(err) => {
                self.stats.record_refresh_failure();
                warn!("Cache refresh failed for key={}: {:#}", key, err);
                Err(err)
            }
        }
    }

    // == Get Or Fetch ==
    /// Serves from cache, falling back to [`CacheStore::force_refresh`] on a miss.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        if let Some(data) = self.get(key) {
            return Ok(data);
        }
        self.force_refresh(key, fetch).await
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    fn load(&self, key: &str) -> Option<CacheEntry<Value>> {
        let raw = self.storage.get_item(key)?;
        let entry = CacheEntry::from_stored(&raw);
        if entry.is_none() {
            warn!("Ignoring malformed cache entry for key={}", key);
        }
        entry
    }
}
