//! Ledgerlens Core Library
//!
//! Shared functionality for the Ledgerlens household ledger:
//! - Transaction table with derived month and weekday columns
//! - Aggregations (summary, category, date, payment method, weekday, month)
//! - Rule-based insight engine with configurable thresholds
//! - SQLite store for transactions, categories and budgets
//! - CSV export and demo data generation

pub mod analysis;
pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod format;
pub mod insights;
pub mod models;
pub mod sample;
pub mod table;

/// Shared fixtures for unit tests
#[cfg(test)]
pub mod test_utils;

pub use analysis::{analyze, generate_insights, AnalysisReport};
pub use analytics::{Aggregates, Summary};
pub use db::{Database, SortField, SortOrder, TransactionFilter};
pub use error::{Error, Result};
pub use export::write_transactions_csv;
pub use format::format_amount;
pub use insights::{Insight, InsightConfig, InsightEngine, InsightKind, Rule};
pub use models::{Budget, Category, NewTransaction, TransactionRecord, TransactionType};
pub use table::{TableRow, TransactionTable};
