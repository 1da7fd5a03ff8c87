//! Category predictor: scores every profiled category, keeps the best one
//! above the confidence threshold, and caches the result.
//!
//! Cache trouble never blocks categorization. A failed or slow read is a
//! miss, a failed or slow write is dropped. If the scoring pipeline itself
//! fails, the public entry points fall back to the basic categorizer.

use crate::cache::{PredictionCache, cache_key};
use crate::config::CategorizerConfig;
use crate::error::{CacheError, CategorizeError};
use crate::features::Features;
use crate::scorer::{SCORED_CATEGORIES, score};
use evolve_core::{Category, CategoryPrediction, Transaction, categorize_basic};
use futures_util::{StreamExt, stream};
use tokio::time::timeout;
use tracing::{debug, warn};

pub struct Predictor<C> {
    cache: C,
    config: CategorizerConfig,
}

impl<C: PredictionCache> Predictor<C> {
    pub fn new(cache: C, config: CategorizerConfig) -> Self {
        Self { cache, config }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn config(&self) -> &CategorizerConfig {
        &self.config
    }

    /// Every scored candidate, highest confidence first. Ties keep the
    /// candidate order of [`SCORED_CATEGORIES`].
    pub fn score_all(
        &self,
        description: &str,
        amount: f64,
    ) -> Result<Vec<CategoryPrediction>, CategorizeError> {
        if !amount.is_finite() {
            return Err(CategorizeError::InvalidAmount(amount));
        }
        let features = Features::extract(description, amount);
        let mut candidates: Vec<CategoryPrediction> = SCORED_CATEGORIES
            .iter()
            .filter_map(|&cat| score(cat, &features).map(|c| CategoryPrediction::new(cat, c)))
            .collect();
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Ok(candidates)
    }

    /// Best prediction for a description and amount, served from the cache
    /// when possible.
    pub async fn predict(
        &self,
        description: &str,
        amount: f64,
    ) -> Result<CategoryPrediction, CategorizeError> {
        if !amount.is_finite() {
            return Err(CategorizeError::InvalidAmount(amount));
        }
        let key = cache_key(description, amount);

        if let Some(cached) = self.read_cache(&key).await {
            debug!(description, category = %cached.category, "using cached prediction");
            return Ok(cached);
        }

        let candidates = self.score_all(description, amount)?;
        let mut top = candidates
            .first()
            .copied()
            .unwrap_or(CategoryPrediction::new(Category::Other, 0.0));
        if top.confidence < self.config.confidence_threshold {
            top.category = Category::Other;
        }

        self.write_cache(&key, &top).await;
        Ok(top)
    }

    /// Category for one transaction. Never fails: pipeline errors fall back
    /// to the basic categorizer.
    pub async fn categorize_transaction(&self, description: &str, amount: f64) -> Category {
        match self.predict(description, amount).await {
            Ok(prediction) => {
                debug!(
                    description,
                    category = %prediction.category,
                    confidence = format_args!("{:.2}", prediction.confidence),
                    "prediction"
                );
                prediction.category
            }
            Err(e) => {
                warn!(description, error = %e, "prediction failed; using basic categorizer");
                categorize_basic(description, amount)
            }
        }
    }

    /// Fill in missing categories one transaction at a time. Length and order
    /// are preserved and existing categories are left untouched.
    pub async fn categorize_transactions(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let mut out = Vec::with_capacity(transactions.len());
        for txn in transactions {
            out.push(self.fill_category(txn).await);
        }
        out
    }

    /// Same contract as [`Self::categorize_transactions`], with up to `limit`
    /// predictions in flight. Results come back in input order.
    pub async fn categorize_transactions_concurrent(
        &self,
        transactions: Vec<Transaction>,
        limit: usize,
    ) -> Vec<Transaction> {
        stream::iter(transactions)
            .map(|txn| self.fill_category(txn))
            .buffered(limit.max(1))
            .collect()
            .await
    }

    async fn fill_category(&self, mut txn: Transaction) -> Transaction {
        if txn.needs_category() {
            let category = self.categorize_transaction(&txn.description, txn.amount).await;
            txn.category = Some(category.to_string());
        }
        txn
    }

    async fn read_cache(&self, key: &str) -> Option<CategoryPrediction> {
        match self.try_read_cache(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(key, error = %e, "cache read failed; continuing uncached");
                None
            }
        }
    }

    async fn try_read_cache(&self, key: &str) -> Result<Option<CategoryPrediction>, CacheError> {
        let limit = self.config.cache_timeout();
        let raw = timeout(limit, self.cache.get(key))
            .await
            .map_err(|_| CacheError::Timeout(limit))??;
        let Some(raw) = raw else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    async fn write_cache(&self, key: &str, prediction: &CategoryPrediction) {
        if let Err(e) = self.try_write_cache(key, prediction).await {
            warn!(key, error = %e, "cache write failed; result not cached");
        }
    }

    async fn try_write_cache(
        &self,
        key: &str,
        prediction: &CategoryPrediction,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(prediction)?;
        let limit = self.config.cache_timeout();
        timeout(limit, self.cache.set(key, &payload, self.config.cache_ttl_secs))
            .await
            .map_err(|_| CacheError::Timeout(limit))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCache, NoCache};

    fn predictor() -> Predictor<MemoryCache> {
        Predictor::new(MemoryCache::new(), CategorizerConfig::default())
    }

    #[tokio::test]
    async fn test_salary_deposit_is_income() {
        let p = predictor();
        let prediction = p.predict("Salary deposit", 3000.0).await.unwrap();
        assert_eq!(prediction.category, Category::Income);
        assert!(prediction.confidence >= 0.65);
    }

    #[tokio::test]
    async fn test_no_keywords_zero_amount_is_other() {
        let p = predictor();
        let prediction = p.predict("zzz qqq", 0.0).await.unwrap();
        assert_eq!(prediction.category, Category::Other);
        assert!(prediction.confidence < 0.65);
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let p = predictor();
        // grocery + food + market = 0.45, amount in [10, 300] = +0.20
        let at = p.predict("grocery food market", 50.0).await.unwrap();
        assert_eq!(at.confidence, 0.65);
        assert_eq!(at.category, Category::Groceries);

        let below = p.predict("grocery market", 50.0).await.unwrap();
        assert_eq!(below.confidence, 0.5);
        assert_eq!(below.category, Category::Other);
    }

    #[tokio::test]
    async fn test_override_keeps_confidence() {
        let p = Predictor::new(NoCache, CategorizerConfig::default().with_threshold(0.9));
        let prediction = p.predict("Salary deposit", 3000.0).await.unwrap();
        assert_eq!(prediction.category, Category::Other);
        assert_eq!(prediction.confidence, 0.7);
    }

    #[tokio::test]
    async fn test_ties_keep_candidate_order() {
        let p = Predictor::new(NoCache, CategorizerConfig::default().with_threshold(0.0));
        // gas scores 0.35 for both utilities and transportation
        let ranked = p.score_all("gas", 40.0).unwrap();
        assert_eq!(ranked[0].category, Category::BillsUtilities);
        assert_eq!(ranked[1].category, Category::Transportation);
        assert_eq!(ranked.len(), SCORED_CATEGORIES.len());
    }

    #[tokio::test]
    async fn test_non_finite_amount_falls_back_to_basic() {
        let p = predictor();
        assert!(p.predict("Rent", f64::NAN).await.is_err());
        let cat = p.categorize_transaction("Coffee shop", f64::INFINITY).await;
        assert_eq!(cat, categorize_basic("Coffee shop", f64::INFINITY));
        assert_eq!(cat, Category::DiningOut);
    }

    #[tokio::test]
    async fn test_prediction_is_cached() {
        let p = predictor();
        p.predict("Apartment rent", 1500.0).await.unwrap();
        let raw = p
            .cache()
            .get(&cache_key("Apartment rent", 1500.0))
            .await
            .unwrap()
            .unwrap();
        let cached: CategoryPrediction = serde_json::from_str(&raw).unwrap();
        assert_eq!(cached, CategoryPrediction::new(Category::Housing, 0.7));
    }

    #[tokio::test]
    async fn test_cached_value_is_returned_unchanged() {
        let p = predictor();
        let planted = CategoryPrediction::new(Category::Shopping, 0.99);
        p.cache()
            .set(
                &cache_key("Salary deposit", 3000.0),
                &serde_json::to_string(&planted).unwrap(),
                60,
            )
            .await
            .unwrap();
        assert_eq!(p.predict("Salary deposit", 3000.0).await.unwrap(), planted);
    }

    #[tokio::test]
    async fn test_garbage_cache_entry_is_a_miss() {
        let p = predictor();
        let key = cache_key("Salary deposit", 3000.0);
        p.cache().set(&key, "not json", 60).await.unwrap();
        let prediction = p.predict("Salary deposit", 3000.0).await.unwrap();
        assert_eq!(prediction.category, Category::Income);
    }
}
