//! Confidence scorer.
//!
//! Deterministic, hand-tuned heuristics: each scored category adds a fixed
//! increment per keyword found in the description, then a bonus or penalty
//! depending on where the amount falls. Scores are independent, so several
//! categories can be confident at once; the predictor picks one.
//!
//! Arithmetic runs in integer hundredths and is converted once at the end,
//! so equal inputs always give bit-identical confidences.

use crate::features::Features;
use evolve_core::Category;

/// Categories with a scoring profile, in candidate order
pub const SCORED_CATEGORIES: [Category; 7] = [
    Category::Groceries,
    Category::DiningOut,
    Category::Housing,
    Category::BillsUtilities,
    Category::Transportation,
    Category::Shopping,
    Category::Income,
];

struct ScoreProfile {
    keywords: &'static [&'static str],
    /// Added once per matching keyword, in hundredths
    per_keyword: i32,
    /// Amount adjustment in hundredths
    amount_adjust: fn(f64) -> i32,
}

fn profile(category: Category) -> Option<ScoreProfile> {
    let p = match category {
        Category::Groceries => ScoreProfile {
            keywords: &[
                "grocery", "groceries", "food", "supermarket", "market", "fruit", "vegetable",
                "meat", "dairy",
            ],
            per_keyword: 15,
            amount_adjust: |a| {
                if (10.0..=300.0).contains(&a) {
                    20
                } else if a < 10.0 || a > 400.0 {
                    -10
                } else {
                    0
                }
            },
        },
        Category::DiningOut => ScoreProfile {
            keywords: &[
                "restaurant", "cafe", "coffee", "dinner", "lunch", "breakfast", "takeout", "bar",
                "grill",
            ],
            per_keyword: 15,
            amount_adjust: |a| {
                if (5.0..=200.0).contains(&a) {
                    20
                } else if a > 300.0 {
                    -20
                } else {
                    0
                }
            },
        },
        Category::Housing => ScoreProfile {
            keywords: &["rent", "mortgage", "housing", "apartment", "condo", "lease"],
            per_keyword: 20,
            amount_adjust: |a| {
                if (500.0..=5000.0).contains(&a) {
                    30
                } else if a < 300.0 {
                    -30
                } else {
                    0
                }
            },
        },
        Category::BillsUtilities => ScoreProfile {
            keywords: &[
                "electric", "water", "gas", "internet", "phone", "utility", "cable", "bill",
                "subscription",
            ],
            per_keyword: 15,
            amount_adjust: |a| {
                if (10.0..=300.0).contains(&a) {
                    20
                } else if a > 500.0 {
                    -20
                } else {
                    0
                }
            },
        },
        Category::Transportation => ScoreProfile {
            keywords: &[
                "gas", "fuel", "uber", "lyft", "taxi", "bus", "train", "transit", "car", "auto",
            ],
            per_keyword: 15,
            amount_adjust: |a| {
                if (5.0..=150.0).contains(&a) {
                    20
                } else if a > 300.0 {
                    -10
                } else {
                    0
                }
            },
        },
        Category::Shopping => ScoreProfile {
            keywords: &[
                "shop", "store", "buy", "purchase", "mall", "clothing", "clothes", "shoes",
                "apparel",
            ],
            per_keyword: 15,
            amount_adjust: |a| {
                if (20.0..=500.0).contains(&a) {
                    20
                } else if a < 5.0 {
                    -20
                } else {
                    0
                }
            },
        },
        Category::Income => ScoreProfile {
            keywords: &[
                "salary", "income", "payment", "paycheck", "deposit", "wage", "earnings",
            ],
            per_keyword: 20,
            amount_adjust: |a| if a >= 500.0 { 30 } else { 0 },
        },
        _ => return None,
    };
    Some(p)
}

/// Confidence in [0, 1] that the transaction belongs to `category`.
///
/// Returns `None` for categories without a scoring profile; those can only
/// come out of the basic categorizer.
pub fn score(category: Category, features: &Features) -> Option<f64> {
    let profile = profile(category)?;
    let hits = profile
        .keywords
        .iter()
        .filter(|kw| features.contains(kw))
        .count() as i32;
    let hundredths = hits * profile.per_keyword + (profile.amount_adjust)(features.amount.amount);
    Some(f64::from(hundredths.clamp(0, 100)) / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(category: Category, desc: &str, amount: f64) -> f64 {
        score(category, &Features::extract(desc, amount)).unwrap()
    }

    #[test]
    fn test_unscored_categories() {
        let f = Features::extract("movie ticket", 20.0);
        assert_eq!(score(Category::Entertainment, &f), None);
        assert_eq!(score(Category::Other, &f), None);
    }

    #[test]
    fn test_grocery_keywords_and_amount() {
        // grocery + market, amount in [10, 300]
        assert_eq!(s(Category::Groceries, "Grocery market", 50.0), 0.5);
        // out of range penalty clamps at 0
        assert_eq!(s(Category::Groceries, "nothing", 5.0), 0.0);
        // between 300 and 400 there is neither bonus nor penalty
        assert_eq!(s(Category::Groceries, "supermarket", 350.0), 0.3);
    }

    #[test]
    fn test_housing_uses_larger_increments() {
        assert_eq!(s(Category::Housing, "Apartment rent", 1500.0), 0.7);
        assert_eq!(s(Category::Housing, "rent", 100.0), 0.0);
        assert_eq!(s(Category::Housing, "rent", 400.0), 0.2);
    }

    #[test]
    fn test_dining_penalty_above_300() {
        assert_eq!(s(Category::DiningOut, "restaurant dinner", 50.0), 0.5);
        assert_eq!(s(Category::DiningOut, "restaurant dinner", 350.0), 0.1);
    }

    #[test]
    fn test_income_salary_deposit() {
        assert_eq!(s(Category::Income, "Salary deposit", 3000.0), 0.7);
        assert_eq!(s(Category::Income, "Salary deposit", 100.0), 0.4);
    }

    #[test]
    fn test_transportation_and_utilities_share_gas() {
        assert_eq!(s(Category::Transportation, "gas", 40.0), 0.35);
        assert_eq!(s(Category::BillsUtilities, "gas", 40.0), 0.35);
    }

    #[test]
    fn test_shopping_small_amount_penalty() {
        assert_eq!(s(Category::Shopping, "shoe store", 2.0), 0.0);
        assert_eq!(s(Category::Shopping, "clothing store purchase", 80.0), 0.65);
    }

    #[test]
    fn test_scores_are_clamped() {
        let desc = "grocery groceries food supermarket market fruit vegetable meat dairy";
        assert_eq!(s(Category::Groceries, desc, 50.0), 1.0);
        for cat in SCORED_CATEGORIES {
            for amount in [-100.0, 0.0, 3.0, 75.0, 450.0, 1e9] {
                let c = s(cat, "rent salary uber cafe shop bill", amount);
                assert!((0.0..=1.0).contains(&c), "{cat} at {amount} gave {c}");
            }
        }
    }
}
