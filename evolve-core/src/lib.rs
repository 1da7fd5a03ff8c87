//! evolve-core: transaction types, the keyword rule table and the basic categorizer

pub mod categorizer;
pub mod finance;
pub mod rules;

pub use categorizer::{categorize_basic, categorize_description};
pub use finance::{Category, CategoryPrediction, Transaction, TransactionType};
pub use rules::{AmountRange, CategoryRule, CATEGORY_RULES};
