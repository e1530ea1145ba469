//! Process-local conversion cache with lazy TTL expiry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::fingerprint::Fingerprint;
use crate::request::ConversionResult;

/// Default lifetime of a cached conversion (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default minimum interval between expiry sweeps (1 minute).
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Cached conversion with its insertion time.
struct CacheEntry {
    value: ConversionResult,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing or an expired entry.
    pub misses: u64,
    /// Live (unexpired) entries.
    pub size: usize,
    /// Entries dropped because they outlived their TTL.
    pub expired: u64,
}

/// In-memory conversion cache.
///
/// Uses a HashMap behind an RwLock so concurrent conversions can read while
/// one writer inserts. Counters are atomics and never block.
pub struct ConversionCache {
    entries: RwLock<HashMap<Fingerprint, CacheEntry>>,
    ttl: Duration,
    sweep_interval: Duration,
    last_sweep: Mutex<Instant>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl ConversionCache {
    /// Create a cache with the default 5 minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL, DEFAULT_SWEEP_INTERVAL)
    }

    /// Create a cache with a custom TTL and sweep interval.
    pub fn with_ttl(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            sweep_interval,
            last_sweep: Mutex::new(Instant::now()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    /// Look up a conversion by fingerprint.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    pub fn get(&self, key: &Fingerprint) -> Option<ConversionResult> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have refreshed the entry since the read lock was dropped.
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
            self.expired.fetch_add(1, Ordering::Relaxed);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert or replace a conversion.
    pub fn put(&self, key: Fingerprint, value: ConversionResult) {
        {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            entries.insert(key, CacheEntry { value, inserted_at: Instant::now(), ttl: self.ttl });
        }
        self.maybe_sweep();
    }

    /// Drop every entry immediately. Returns the number of entries removed.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Remove all expired entries. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let removed = before - entries.len();
        self.expired.fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        let size = {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            entries.values().filter(|entry| !entry.is_expired()).count()
        };
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size,
            expired: self.expired.load(Ordering::Relaxed),
        }
    }

    fn maybe_sweep(&self) {
        {
            let mut last_sweep = self.last_sweep.lock().unwrap_or_else(PoisonError::into_inner);
            if last_sweep.elapsed() < self.sweep_interval {
                return;
            }
            *last_sweep = Instant::now();
        }

        let removed = self.purge_expired();
        if removed > 0 {
            tracing::debug!(removed, "swept expired conversions");
        }
    }
}

impl Default for ConversionCache {
    fn default() -> Self {
        Self::new()
    }
}
