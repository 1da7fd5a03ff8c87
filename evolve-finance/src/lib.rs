//! evolve-finance: confidence scoring, the cached category predictor,
//! batch categorization, summaries and the CSV transaction store

pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod predictor;
pub mod scorer;
pub mod store;
pub mod summary;

#[cfg(feature = "redis")]
pub use cache::RedisCache;
pub use cache::{MemoryCache, NoCache, PredictionCache, cache_key};
pub use config::CategorizerConfig;
pub use error::{CacheError, CategorizeError, StoreError};
pub use features::{AmountFeatures, Features};
pub use predictor::Predictor;
pub use scorer::{SCORED_CATEGORIES, score};
pub use store::{read_transactions_csv, write_transactions_csv};
pub use summary::category_summary;
