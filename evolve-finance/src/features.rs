//! Feature extraction for the confidence scorer.
//!
//! A bag of words from the description plus a handful of derived amount
//! features. Recomputed on every prediction, never stored.

use std::collections::HashMap;

/// Amount-derived features. The four bucket flags are disjoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountFeatures {
    pub amount: f64,
    /// ln(max(amount, 1))
    pub amount_log: f64,
    pub amount_squared: f64,
    /// amount < 20
    pub is_small: bool,
    /// 20 <= amount < 100
    pub is_medium: bool,
    /// 100 <= amount < 500
    pub is_large: bool,
    /// amount >= 500
    pub is_very_large: bool,
}

impl AmountFeatures {
    pub fn from_amount(amount: f64) -> Self {
        Self {
            amount,
            amount_log: amount.max(1.0).ln(),
            amount_squared: amount * amount,
            is_small: amount < 20.0,
            is_medium: (20.0..100.0).contains(&amount),
            is_large: (100.0..500.0).contains(&amount),
            is_very_large: amount >= 500.0,
        }
    }
}

/// Everything the scorer looks at for one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Lower-cased description; keyword matching runs against this
    pub description: String,
    /// word -> occurrence count, words shorter than 3 chars dropped
    pub words: HashMap<String, u32>,
    pub amount: AmountFeatures,
}

impl Features {
    pub fn extract(description: &str, amount: f64) -> Self {
        let description = description.to_lowercase();
        let words = bag_of_words(&description);
        Self {
            description,
            words,
            amount: AmountFeatures::from_amount(amount),
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }

    pub fn word_count(&self, word: &str) -> u32 {
        self.words.get(word).copied().unwrap_or(0)
    }
}

fn bag_of_words(lower: &str) -> HashMap<String, u32> {
    let mut words = HashMap::new();
    for word in lower
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| w.len() > 2)
    {
        *words.entry(word.to_string()).or_insert(0) += 1;
    }
    words
}
