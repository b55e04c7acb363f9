//! Insight Engine - templated observations about a user's money
//!
//! The engine turns an aggregated transaction table into a short, ordered list
//! of human-readable insights. Each rule is an independent detector; the engine
//! runs all of them in a fixed order and concatenates what they find.
//!
//! ## Rules
//!
//! - **Top Category** - Largest expense category and its share
//! - **Monthly Trend** - Latest month against the one before
//! - **Budget Usage** - Current month against budgets
//! - **Unusual Expenses** - Outliers within a category
//! - **Recurring Expenses** - Similar charges about a month apart
//! - **Savings Rate** - Share of income kept
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledgerlens_core::insights::{InsightConfig, InsightEngine};
//!
//! let engine = InsightEngine::new(InsightConfig::load(None)?);
//! let insights = engine.generate(&table, Some(&budgets), today);
//! ```

pub mod budget_usage;
pub mod config;
pub mod engine;
pub mod month_trend;
pub mod outliers;
pub mod recurring;
pub mod savings_rate;
pub mod top_category;
pub mod types;

pub use config::{
    default_config_path, BudgetConfig, InsightConfig, OutlierConfig, RecurringConfig,
    SavingsConfig, TrendConfig,
};
pub use engine::{empty_data_insight, AnalysisContext, InsightEngine};
pub use types::{Insight, InsightKind, Rule};
