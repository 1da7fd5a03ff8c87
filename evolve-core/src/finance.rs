//! Finance record types: transactions, categories and predictions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded balance movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Free-text description entered by the user
    pub description: String,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Assigned by the categorizer when absent
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(
        id: i64,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionType,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
            kind,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// True when no category has been assigned yet (empty counts as missing)
    pub fn needs_category(&self) -> bool {
        self.category.as_deref().is_none_or(str::is_empty)
    }
}

/// Spending categories the engine can assign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Dining Out")]
    DiningOut,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Transfers")]
    Transfers,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Major Expense")]
    MajorExpense,
    #[serde(rename = "Moderate Expense")]
    ModerateExpense,
    #[serde(rename = "Minor Expense")]
    MinorExpense,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Display label, also used on the wire and in stored transactions
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::DiningOut => "Dining Out",
            Category::Housing => "Housing",
            Category::BillsUtilities => "Bills & Utilities",
            Category::Transportation => "Transportation",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Income => "Income",
            Category::Transfers => "Transfers",
            Category::Education => "Education",
            Category::MajorExpense => "Major Expense",
            Category::ModerateExpense => "Moderate Expense",
            Category::MinorExpense => "Minor Expense",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored guess for a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryPrediction {
    pub category: Category,
    /// Always within [0, 1]
    pub confidence: f64,
}

impl CategoryPrediction {
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_creation() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let txn = Transaction::new(1, date, "Grocery Store", 45.99, TransactionType::Expense);
        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert!(txn.needs_category());

        let txn = txn.with_category("Groceries");
        assert!(!txn.needs_category());
    }

    #[test]
    fn test_empty_category_counts_as_missing() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let txn = Transaction::new(1, date, "x", 1.0, TransactionType::Expense).with_category("");
        assert!(txn.needs_category());
    }

    #[test]
    fn test_category_labels_match_serde() {
        for cat in [Category::DiningOut, Category::BillsUtilities, Category::MinorExpense] {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
        assert_eq!(Category::BillsUtilities.to_string(), "Bills & Utilities");
    }

    #[test]
    fn test_prediction_clamps_confidence() {
        assert_eq!(CategoryPrediction::new(Category::Income, 1.4).confidence, 1.0);
        assert_eq!(CategoryPrediction::new(Category::Income, -0.2).confidence, 0.0);
    }

    #[test]
    fn test_transaction_json_uses_type_field() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let txn = Transaction::new(7, date, "Salary", 3000.0, TransactionType::Income);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json["category"].is_null());
    }
}
