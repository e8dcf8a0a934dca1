//! TTL-based caching with in-memory storage

use crate::types::CacheStats;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// A single cached value with its expiry deadline
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// An in-memory cache with per-entry TTL expiry
///
/// Cloning the cache produces another handle to the same underlying map,
/// so one handle can be held by request handlers while another drives the
/// background sweeper.
pub struct ExpiringCache<V> {
    /// In-memory storage for cached entries
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    /// Cache hit counter
    hits: Arc<AtomicU64>,
    /// Cache miss counter
    misses: Arc<AtomicU64>,
}

impl<V> Clone for ExpiringCache<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

impl<V> Default for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a new, empty cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a value from the cache, returns None if absent or expired
    ///
    /// An entry whose deadline has passed is treated as absent and is
    /// removed on the spot rather than waiting for the next sweep.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    trace!(key = %key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Expired: re-check under the write lock before removing, so a
        // racing put that just refreshed the entry is never discarded.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at > now {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            entries.remove(key);
            debug!(key = %key, "Removed expired cache entry on read");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert or overwrite a value with the given time-to-live
    pub async fn put(&self, key: &str, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), entry);
        trace!(key = %key, ttl_secs = ttl.as_secs(), "Cached entry");
    }

    /// Remove all expired entries, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Swept expired cache entries");
        }
        removed
    }

    /// Spawn a background task that purges expired entries every `period`
    ///
    /// The caller owns the returned handle and aborts it on shutdown.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; skip it so a fresh
            // cache is not swept before anything can be written.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.purge_expired().await;
            }
        })
    }

    /// Number of entries physically present, including not-yet-swept ones
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
