//! Bounded TTL+LRU store for raw API responses
//!
//! Backs the optional client-side caching of [`crate::TargetClient`].
//! Clients built from freshly issued credentials never carry one.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

/// Cached response bodies keyed by request path
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CachedResponse>>,
    ttl: Duration,
}

#[derive(Clone, Debug)]
struct CachedResponse {
    body: String,
    stored_at: Instant,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` responses, each valid for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least one");
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fetch a cached body. Stale entries are evicted on access.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        let stale = match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => return Some(entry.body.clone()),
            Some(_) => true,
            None => false,
        };
        if stale {
            entries.pop(key);
            debug!("Evicted stale cache entry: {}", key);
        }
        None
    }

    /// Store a response body.
    pub async fn insert(&self, key: &str, body: String) {
        let mut entries = self.entries.lock().await;
        entries.put(
            key.to_string(),
            CachedResponse {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &str) {
        self.entries.lock().await.pop(key);
    }

    /// Number of stored entries, stale ones included until touched.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_bodies() {
        let cache = ResponseCache::new(8, Duration::from_secs(30));
        cache.insert("/api/v1/namespaces", "body".to_string()).await;

        assert_eq!(cache.get("/api/v1/namespaces").await.as_deref(), Some("body"));
        assert_eq!(cache.get("/api/v1/nodes").await, None);
    }

    #[tokio::test]
    async fn stale_entries_are_evicted_on_access() {
        let cache = ResponseCache::new(8, Duration::from_millis(5));
        cache.insert("/api/v1/namespaces", "body".to_string()).await;

        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("/api/v1/namespaces").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn capacity_bounds_the_store() {
        let cache = ResponseCache::new(2, Duration::from_secs(30));
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;
        cache.insert("c", "3".to_string()).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("c").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn invalidate_drops_single_entry() {
        let cache = ResponseCache::new(8, Duration::from_secs(30));
        cache.insert("a", "1".to_string()).await;
        cache.insert("b", "2".to_string()).await;

        cache.invalidate("a").await;

        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await.as_deref(), Some("2"));
    }
}
