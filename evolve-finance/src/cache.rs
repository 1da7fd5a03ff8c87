//! Prediction cache collaborator.
//!
//! The predictor only sees [`PredictionCache`]; the composition root picks
//! the backend and owns its connection lifecycle.

use crate::error::CacheError;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Key-value store for serialized predictions
pub trait PredictionCache: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CacheError>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;
}

impl<C: PredictionCache> PredictionCache for Arc<C> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CacheError>> + Send {
        (**self).get(key)
    }

    fn set(
        &self,
        key: &str,
        value: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), CacheError>> + Send {
        (**self).set(key, value, ttl_secs)
    }
}

/// Exact-match key: no trimming or case folding, so "Rent" and "rent " are
/// different entries.
pub fn cache_key(description: &str, amount: f64) -> String {
    format!("ml_category:{description}:{amount}")
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl PredictionCache for NoCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), CacheError> {
        Ok(())
    }
}

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Map size that triggers the first expiry sweep on `set`
const SWEEP_MIN: usize = 64;

#[derive(Debug)]
struct State {
    entries: HashMap<String, Entry>,
    /// Sweep expired entries once the map reaches this size
    next_sweep: usize,
}

/// In-process cache with per-entry expiry.
///
/// Expired entries are dropped when read, and swept in bulk by `set` each
/// time the map doubles past the last sweep.
#[derive(Debug)]
pub struct MemoryCache {
    state: Mutex<State>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                entries: HashMap::new(),
                next_sweep: SWEEP_MIN,
            }),
        }
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let state = self.state.lock().await;
        state.entries.values().filter(|e| e.expires_at > now).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut state = self.state.lock().await;
        purge(&mut state.entries)
    }
}

fn purge(entries: &mut HashMap<String, Entry>) -> usize {
    let now = Instant::now();
    let before = entries.len();
    entries.retain(|_, e| e.expires_at > now);
    before - entries.len()
}

impl PredictionCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut state = self.state.lock().await;
        match state.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                state.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
        };
        let mut state = self.state.lock().await;
        state.entries.insert(key.to_string(), entry);
        if state.entries.len() >= state.next_sweep {
            let removed = purge(&mut state.entries);
            state.next_sweep = (state.entries.len() * 2).max(SWEEP_MIN);
            tracing::debug!(removed, live = state.entries.len(), "swept expired cache entries");
        }
        Ok(())
    }
}

#[cfg(feature = "redis")]
pub use redis_cache::RedisCache;

#[cfg(feature = "redis")]
mod redis_cache {
    use super::PredictionCache;
    use crate::error::CacheError;
    use redis::AsyncCommands;
    use redis::aio::MultiplexedConnection;
    use std::time::Duration;
    use tokio::time::timeout;

    /// Redis-backed cache using `GET` / `SETEX`
    #[derive(Clone)]
    pub struct RedisCache {
        conn: MultiplexedConnection,
    }

    impl RedisCache {
        /// Open a multiplexed connection, giving up after `limit`
        pub async fn connect(url: &str, limit: Duration) -> Result<Self, CacheError> {
            let client = redis::Client::open(url)?;
            let conn = timeout(limit, client.get_multiplexed_async_connection())
                .await
                .map_err(|_| CacheError::Timeout(limit))??;
            Ok(Self { conn })
        }
    }

    impl PredictionCache for RedisCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            let mut conn = self.conn.clone();
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        }

        async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
            let mut conn = self.conn.clone();
            let _: () = conn.set_ex(key, value, ttl_secs).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_literal() {
        assert_eq!(cache_key("Salary deposit", 3000.0), "ml_category:Salary deposit:3000");
        assert_eq!(cache_key("Grocery Store", 45.99), "ml_category:Grocery Store:45.99");
        assert_ne!(cache_key("rent", 1.0), cache_key("Rent", 1.0));
        assert_ne!(cache_key("rent", 1.0), cache_key("rent ", 1.0));
    }

    #[tokio::test]
    async fn test_no_cache_never_hits() {
        let cache = NoCache;
        cache.set("k", "v", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_expires_entries() {
        let cache = MemoryCache::new();
        cache.set("k", "v", 10).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(cache.len().await, 1);

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let cache = MemoryCache::new();
        cache.set("short", "1", 1).await.unwrap();
        cache.set("long", "2", 100).await.unwrap();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.get("long").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_sweeps_expired_entries() {
        let cache = MemoryCache::new();
        for i in 0..SWEEP_MIN - 1 {
            cache.set(&format!("old-{i}"), "x", 1).await.unwrap();
        }
        assert_eq!(cache.state.lock().await.entries.len(), SWEEP_MIN - 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.set("fresh", "y", 60).await.unwrap();

        let state = cache.state.lock().await;
        assert_eq!(state.entries.len(), 1);
        assert!(state.entries.contains_key("fresh"));
        assert_eq!(state.next_sweep, SWEEP_MIN);
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_entries() {
        let cache = MemoryCache::new();
        for i in 0..SWEEP_MIN {
            cache.set(&format!("k-{i}"), "v", 60).await.unwrap();
        }
        assert_eq!(cache.len().await, SWEEP_MIN);
        assert_eq!(cache.state.lock().await.next_sweep, SWEEP_MIN * 2);
    }

    #[cfg(feature = "redis")]
    #[tokio::test]
    async fn test_redis_connect_is_bounded() {
        let limit = Duration::from_millis(200);
        let started = std::time::Instant::now();
        // non-routable address: the SYN is never answered
        let result = RedisCache::connect("redis://10.255.255.1:6379", limit).await;
        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache = Arc::new(MemoryCache::new());
        cache.set("k", "a", 60).await.unwrap();
        cache.set("k", "b", 60).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("b"));
    }
}
