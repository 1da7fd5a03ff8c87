//! Per-category spending totals for the dashboard

use evolve_core::{Category, Transaction};
use std::collections::BTreeMap;

/// Total expense amount per category label.
///
/// Income transactions still register their category, with a zero total.
/// Transactions without a category are counted under "Other".
pub fn category_summary(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();
    for txn in transactions {
        let label = match txn.category.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => Category::Other.to_string(),
        };
        let contribution = if txn.is_expense() { txn.amount } else { 0.0 };
        *summary.entry(label).or_insert(0.0) += contribution;
    }
    summary
}
