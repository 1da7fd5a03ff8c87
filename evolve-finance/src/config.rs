use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.65;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 250;

/// Tunables read by the predictor at construction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Minimum top confidence to keep the predicted label instead of "Other"
    pub confidence_threshold: f64,
    /// Lifetime of cached predictions
    pub cache_ttl_secs: u64,
    /// Upper bound on each cache read or write
    pub cache_timeout_ms: u64,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_timeout_ms: DEFAULT_CACHE_TIMEOUT_MS,
        }
    }
}

impl CategorizerConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    pub fn with_cache_ttl(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }
}
