use std::time::Duration;
use thiserror::Error;

/// Failures talking to the prediction cache. Never surfaced to callers of the
/// predictor; they are logged and the call continues uncached.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache call timed out after {0:?}")]
    Timeout(Duration),

    #[error("cache payload error: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

/// Failures inside the scoring pipeline
#[derive(Error, Debug)]
pub enum CategorizeError {
    #[error("amount is not a finite number: {0}")]
    InvalidAmount(f64),
}

/// Failures reading or writing the CSV transaction store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
