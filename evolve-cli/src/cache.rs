//! Cache backend selection. The CLI owns the connection for its lifetime.

use evolve_finance::{CacheError, MemoryCache, NoCache, PredictionCache, RedisCache};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{CacheBackend, CacheSection};

pub enum AnyCache {
    Memory(MemoryCache),
    Redis(RedisCache),
    Disabled(NoCache),
}

impl AnyCache {
    /// Build the configured backend. A redis that refuses or does not answer
    /// within `limit` degrades to no caching rather than failing the command.
    pub async fn connect(section: &CacheSection, limit: Duration) -> Self {
        match section.backend {
            CacheBackend::Memory => AnyCache::Memory(MemoryCache::new()),
            CacheBackend::None => AnyCache::Disabled(NoCache),
            CacheBackend::Redis => {
                let url = section.redis.url();
                match RedisCache::connect(&url, limit).await {
                    Ok(cache) => {
                        info!(host = %section.redis.host, port = section.redis.port, "connected to redis");
                        AnyCache::Redis(cache)
                    }
                    Err(e) => {
                        warn!(error = %e, "redis unavailable; running without cache");
                        AnyCache::Disabled(NoCache)
                    }
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AnyCache::Memory(_) => "memory",
            AnyCache::Redis(_) => "redis",
            AnyCache::Disabled(_) => "none",
        }
    }
}

impl PredictionCache for AnyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            AnyCache::Memory(c) => c.get(key).await,
            AnyCache::Redis(c) => c.get(key).await,
            AnyCache::Disabled(c) => c.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        match self {
            AnyCache::Memory(c) => c.set(key, value, ttl_secs).await,
            AnyCache::Redis(c) => c.set(key, value, ttl_secs).await,
            AnyCache::Disabled(c) => c.set(key, value, ttl_secs).await,
        }
    }
}
