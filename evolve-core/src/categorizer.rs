//! Basic keyword categorizer.
//!
//! Synchronous and uncached. Used directly by callers that don't need
//! confidences, and as the fallback when the scoring pipeline fails.

use crate::finance::Category;
use crate::rules::CATEGORY_RULES;

/// Amount-only buckets, checked in this order when no keyword rule applies.
/// The ranges overlap; the first hit wins.
const AMOUNT_BUCKETS: &[(f64, f64, Category)] = &[
    (500.0, 5000.0, Category::Housing),
    (200.0, 1000.0, Category::MajorExpense),
    (50.0, 200.0, Category::ModerateExpense),
];

/// Categorize a description using the keyword table, then amount buckets.
///
/// Negative and NaN amounts behave like 0. Always returns a category.
pub fn categorize_basic(description: &str, amount: f64) -> Category {
    let amount = normalize_amount(amount);
    let desc = description.to_lowercase();

    for rule in CATEGORY_RULES {
        if rule.matched_keyword(&desc).is_some() && rule.accepts_amount(amount) {
            return rule.category;
        }
    }

    bucket_for_amount(amount)
}

/// Same as [`categorize_basic`] with an amount of 0
pub fn categorize_description(description: &str) -> Category {
    categorize_basic(description, 0.0)
}

fn bucket_for_amount(amount: f64) -> Category {
    for (min, max, category) in AMOUNT_BUCKETS {
        if amount >= *min && amount <= *max {
            return *category;
        }
    }
    // (0, 50), exclusive on both ends
    if amount > 0.0 && amount < 50.0 {
        return Category::MinorExpense;
    }
    Category::Other
}

fn normalize_amount(amount: f64) -> f64 {
    if amount.is_nan() || amount < 0.0 { 0.0 } else { amount }
}
