//! Shared fixtures for unit tests

use chrono::NaiveDate;

use crate::analytics::Aggregates;
use crate::insights::{AnalysisContext, Insight, InsightConfig, Rule};
use crate::models::{Budget, TransactionRecord, TransactionType};
use crate::table::TransactionTable;

fn record(
    id: i64,
    date: &str,
    tx_type: TransactionType,
    amount: f64,
    category: &str,
) -> TransactionRecord {
    TransactionRecord {
        id,
        date: date.to_string(),
        tx_type,
        amount,
        category: category.to_string(),
        payment_method: "Card".to_string(),
        memo: String::new(),
    }
}

pub fn expense(id: i64, date: &str, amount: f64, category: &str) -> TransactionRecord {
    record(id, date, TransactionType::Expense, amount, category)
}

pub fn income(id: i64, date: &str, amount: f64, category: &str) -> TransactionRecord {
    record(id, date, TransactionType::Income, amount, category)
}

pub fn budget(month: &str, category: &str, amount: f64) -> Budget {
    Budget {
        id: 0,
        month: month.to_string(),
        category: category.to_string(),
        budget_amount: amount,
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Evaluate a single rule with default thresholds
pub fn run_rule(
    rule: Rule,
    records: &[TransactionRecord],
    budgets: Option<&[Budget]>,
    today: &str,
) -> Vec<Insight> {
    run_rule_with(rule, records, budgets, today, &InsightConfig::default())
}

pub fn run_rule_with(
    rule: Rule,
    records: &[TransactionRecord],
    budgets: Option<&[Budget]>,
    today: &str,
    config: &InsightConfig,
) -> Vec<Insight> {
    let table = TransactionTable::build(records).unwrap();
    let aggregates = Aggregates::compute(&table);
    let ctx = AnalysisContext::new(&table, &aggregates, budgets, date(today), config);
    rule.evaluate(&ctx).unwrap()
}
