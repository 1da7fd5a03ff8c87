//! Static keyword rule table.
//!
//! Rules are checked in table order by the basic categorizer, so a
//! description like "rent payment" lands in Housing before Income sees it.

use crate::finance::Category;

/// Inclusive amount bounds; a missing end is unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// A category with the lowercase keywords that suggest it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pub amount_range: Option<AmountRange>,
}

impl CategoryRule {
    /// First keyword found as a substring of an already lower-cased description
    pub fn matched_keyword(&self, lower_desc: &str) -> Option<&'static str> {
        self.keywords.iter().copied().find(|kw| lower_desc.contains(kw))
    }

    /// True when the amount passes the rule's range filter (or there is none)
    pub fn accepts_amount(&self, amount: f64) -> bool {
        self.amount_range.is_none_or(|range| range.contains(amount))
    }
}

pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Groceries,
        keywords: &[
            "grocery", "groceries", "food", "supermarket", "market", "fruit", "vegetable", "meat",
            "dairy", "bread", "milk", "egg",
        ],
        amount_range: Some(AmountRange::between(5.0, 300.0)),
    },
    CategoryRule {
        category: Category::DiningOut,
        keywords: &[
            "restaurant", "cafe", "coffee", "dinner", "lunch", "breakfast", "takeout", "takeaway",
            "delivery", "uber eats", "doordash",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Housing,
        keywords: &["rent", "mortgage", "housing", "apartment", "condo", "house payment"],
        amount_range: Some(AmountRange::between(500.0, 5000.0)),
    },
    CategoryRule {
        category: Category::BillsUtilities,
        keywords: &[
            "electricity", "water", "gas", "internet", "phone", "utility", "bill", "subscription",
            "netflix", "spotify", "hulu", "disney",
        ],
        amount_range: Some(AmountRange::between(10.0, 300.0)),
    },
    CategoryRule {
        category: Category::Transportation,
        keywords: &[
            "transport", "transportation", "gas", "fuel", "uber", "lyft", "taxi", "bus", "train",
            "subway", "transit", "car", "vehicle",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Healthcare,
        keywords: &[
            "health", "medical", "doctor", "hospital", "clinic", "pharmacy", "medicine",
            "prescription", "insurance",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Entertainment,
        keywords: &[
            "entertainment", "movie", "game", "gaming", "concert", "theatre", "theater", "show",
            "event", "ticket",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Shopping,
        keywords: &[
            "clothing", "clothes", "shoes", "apparel", "fashion", "accessory", "accessories",
            "jewelry",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Income,
        keywords: &[
            "salary", "income", "payment", "paycheck", "deposit", "wage", "earnings", "tax return",
            "bonus", "commission",
        ],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Transfers,
        keywords: &["transfer", "wire", "send", "zelle", "venmo", "paypal", "cash app"],
        amount_range: None,
    },
    CategoryRule {
        category: Category::Education,
        keywords: &[
            "education", "school", "college", "university", "tuition", "course", "class", "book",
            "textbook",
        ],
        amount_range: None,
    },
];

/// Look up the rule for a category, if the table has one
pub fn rule_for(category: Category) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|r| r.category == category)
}
