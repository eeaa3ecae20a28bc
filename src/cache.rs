//! Time-bounded cache of analysis results
//!
//! Keys are the exact request text. Each slot is a `OnceCell`, so concurrent
//! misses on the same key await a single computation instead of each running
//! the orchestrator. A failed computation leaves the slot empty and the next
//! caller retries. Expired entries behave as absent on lookup; `purge_expired`
//! is the optional active sweep.

use crate::types::AnalysisResult;
use lru::LruCache;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::debug;

/// Cached value with its insertion time
#[derive(Debug, Clone)]
pub struct CachedResult<T> {
    /// The cached data
    pub data: T,

    /// When this was cached
    pub cached_at: Instant,
}

impl<T> CachedResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
        }
    }

    /// Check if this result is still valid given TTL
    pub fn is_valid(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

type Slot<T> = Arc<OnceCell<CachedResult<Arc<T>>>>;

/// Concurrency-safe TTL cache with LRU capacity bound
pub struct ResultCache<T> {
    entries: Mutex<LruCache<String, Slot<T>>>,
    ttl: Duration,
}

/// Process-wide cache of merged analyses
pub type AnalysisCache = ResultCache<AnalysisResult>;

impl<T> ResultCache<T> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // Critical sections never panic mid-update, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, Slot<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let mut entries = self.lock();
        let slot = Arc::clone(entries.get(key)?);

        match slot.get() {
            Some(cached) if cached.is_valid(self.ttl) => Some(Arc::clone(&cached.data)),
            Some(_) => {
                debug!("Cache entry expired");
                entries.pop(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key`, replacing any previous entry
    pub fn put(&self, key: impl Into<String>, value: Arc<T>) {
        let slot = Arc::new(OnceCell::new_with(Some(CachedResult::new(value))));
        self.lock().put(key.into(), slot);
    }

    /// Return the fresh value for `key`, or run `compute` once and cache its output
    ///
    /// Callers racing on the same missing key share one `compute` run. Errors are
    /// returned to the caller that ran `compute` and nothing is cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let slot = {
            let mut entries = self.lock();
            let live = entries
                .get(key)
                .filter(|slot| slot.get().map_or(true, |cached| cached.is_valid(self.ttl)))
                .cloned();

            match live {
                Some(slot) => slot,
                None => {
                    let slot: Slot<T> = Arc::new(OnceCell::new());
                    entries.put(key.to_string(), Arc::clone(&slot));
                    slot
                }
            }
        };

        let cached = slot
            .get_or_try_init(move || async move {
                debug!("Cache miss, computing");
                compute().await.map(|value| CachedResult::new(Arc::new(value)))
            })
            .await?;

        Ok(Arc::clone(&cached.data))
    }

    /// Drop expired entries and abandoned empty slots; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let stale: Vec<String> = entries
            .iter()
            .filter(|(_, slot)| match slot.get() {
                Some(cached) => !cached.is_valid(self.ttl),
                None => Arc::strong_count(slot) == 1,
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            entries.pop(key);
        }
        stale.len()
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let size = entries
            .iter()
            .filter(|(_, slot)| slot.get().is_some_and(|cached| cached.is_valid(self.ttl)))
            .count();

        CacheStats {
            size,
            capacity: entries.cap().get(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of fresh entries
    pub size: usize,

    /// Maximum capacity
    pub capacity: usize,
}

impl CacheStats {
    pub fn utilization(&self) -> f32 {
        if self.capacity == 0 {
            0.0
        } else {
            self.size as f32 / self.capacity as f32
        }
    }
}
