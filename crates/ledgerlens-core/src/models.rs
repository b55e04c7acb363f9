//! Domain models for Ledgerlens

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Expense categories seeded for every new user
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing/Telecom",
    "Shopping",
    "Culture/Leisure",
    "Medical/Health",
    "Education",
    "Gifts/Events",
    "Insurance",
    "Other Expense",
];

/// Income categories seeded for every new user
pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Side Income",
    "Allowance",
    "Investment",
    "Other Income",
];

pub const DEFAULT_PAYMENT_METHODS: &[&str] = &["Cash", "Card", "Transfer", "Other"];

/// Direction of a cash flow. Amounts are always non-negative; the sign lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction record as supplied by the store (or a JSON file).
///
/// `date` stays a string until the record enters a
/// [`TransactionTable`](crate::table::TransactionTable), where it is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub memo: String,
}

/// A transaction to insert or to overwrite an existing record with
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub memo: String,
}

impl NewTransaction {
    /// Check the record invariants before it reaches the store
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("Category must not be empty".to_string()));
        }
        Ok(())
    }

    /// The record this transaction becomes once stored under `id`
    pub fn into_record(self, id: i64) -> TransactionRecord {
        TransactionRecord {
            id,
            date: self.date.format("%Y-%m-%d").to_string(),
            tx_type: self.tx_type,
            amount: self.amount,
            category: self.category,
            payment_method: self.payment_method,
            memo: self.memo,
        }
    }
}

/// A spending ceiling for one month, optionally scoped to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub id: i64,
    /// `YYYY-MM`
    pub month: String,
    /// Empty string means the budget covers all expenses of the month
    #[serde(default)]
    pub category: String,
    pub budget_amount: f64,
}

impl Budget {
    pub fn is_overall(&self) -> bool {
        self.category.is_empty()
    }
}

/// A user-defined label for transactions of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub tx_type: TransactionType,
    pub name: String,
}

/// Validate a `YYYY-MM` month key
pub fn validate_month(month: &str) -> Result<()> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .ok()
        .filter(|_| month.len() == 7)
        .map(|_| ())
        .ok_or_else(|| Error::InvalidData(format!("Invalid month {:?} (use YYYY-MM)", month)))
}
