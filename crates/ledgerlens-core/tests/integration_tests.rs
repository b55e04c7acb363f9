//! Integration tests for ledgerlens-core
//!
//! These tests exercise the full store → table → insights workflow.

use chrono::NaiveDate;
use ledgerlens_core::{
    analyze,
    db::Database,
    insights::{InsightConfig, InsightKind, Rule},
    models::{NewTransaction, TransactionRecord, TransactionType},
    TransactionFilter,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(d: &str, tx_type: TransactionType, amount: f64, category: &str, memo: &str) -> NewTransaction {
    NewTransaction {
        date: date(d),
        tx_type,
        amount,
        category: category.to_string(),
        payment_method: "Card".to_string(),
        memo: memo.to_string(),
    }
}

/// Three months of a small household ledger:
/// - a 9,900 streaming subscription billed roughly monthly
/// - ordinary dining in March plus one expensive dinner
/// - a salary every month
fn seed_ledger(db: &Database, user_id: i64) {
    let expense = TransactionType::Expense;
    let income = TransactionType::Income;

    let txs = vec![
        tx("2024-01-05", expense, 9_900.0, "Subscriptions", "Streaming"),
        tx("2024-02-04", expense, 9_900.0, "Subscriptions", "Streaming"),
        tx("2024-03-05", expense, 9_900.0, "Subscriptions", "Streaming"),
        tx("2024-03-01", expense, 10_000.0, "Food", "Lunch"),
        tx("2024-03-03", expense, 10_000.0, "Food", "Lunch"),
        tx("2024-03-08", expense, 10_000.0, "Food", "Lunch"),
        tx("2024-03-12", expense, 10_000.0, "Food", "Lunch"),
        tx("2024-03-15", expense, 50_000.0, "Food", "Anniversary dinner"),
        tx("2024-01-25", income, 3_000_000.0, "Salary", "Paycheck"),
        tx("2024-02-25", income, 3_000_000.0, "Salary", "Paycheck"),
        tx("2024-03-25", income, 3_000_000.0, "Salary", "Paycheck"),
    ];

    db.insert_transactions(user_id, &txs)
        .expect("Failed to insert transactions");
}

// =============================================================================
// Store → Insights
// =============================================================================

#[test]
fn test_full_insight_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    seed_ledger(&db, 1);
    db.set_budget(1, "2024-03", "", 100_000.0).unwrap();

    let records = db.list_transactions(1, &TransactionFilter::new()).unwrap();
    assert_eq!(records.len(), 11);

    let budgets = db.list_budgets(1, Some("2024-03")).unwrap();
    let report = analyze(
        &records,
        Some(&budgets),
        date("2024-03-28"),
        &InsightConfig::default(),
    )
    .expect("Analysis failed");

    assert_eq!(report.summary.total_income, 9_000_000.0);
    assert_eq!(report.summary.total_expense, 119_700.0);
    assert_eq!(report.summary.net, 9_000_000.0 - 119_700.0);

    let rules: Vec<Rule> = report.insights.iter().filter_map(|i| i.rule).collect();
    assert_eq!(rules, Rule::ALL.to_vec());

    let by_rule = |rule: Rule| {
        report
            .insights
            .iter()
            .find(|i| i.rule == Some(rule))
            .unwrap()
    };

    assert!(by_rule(Rule::TopCategory).message.contains("**Food**"));
    assert_eq!(by_rule(Rule::MonthTrend).kind, InsightKind::Warning);
    assert!(by_rule(Rule::BudgetUsage).message.contains("99.9%"));
    assert!(by_rule(Rule::Outliers).message.contains("2024-03-15"));
    assert!(by_rule(Rule::Recurring).message.contains("'Subscriptions'"));
    assert_eq!(by_rule(Rule::SavingsRate).kind, InsightKind::Success);
}

#[test]
fn test_period_filter_narrows_analysis() {
    let db = Database::in_memory().unwrap();
    seed_ledger(&db, 1);

    let filter = TransactionFilter::new().date_range(Some((date("2024-03-01"), date("2024-03-31"))));
    let records = db.list_transactions(1, &filter).unwrap();
    let report = analyze(&records, None, date("2024-03-31"), &InsightConfig::default()).unwrap();

    assert_eq!(report.summary.tx_count, 7);
    // Only one month of data: no trend, no recurrence
    assert!(report
        .insights
        .iter()
        .all(|i| i.rule != Some(Rule::MonthTrend) && i.rule != Some(Rule::Recurring)));
}

#[test]
fn test_users_are_isolated() {
    let db = Database::in_memory().unwrap();
    seed_ledger(&db, 1);

    let records = db.list_transactions(2, &TransactionFilter::new()).unwrap();
    let report = analyze(&records, None, date("2024-03-31"), &InsightConfig::default()).unwrap();

    assert_eq!(report.insights.len(), 1);
    assert_eq!(report.insights[0].kind, InsightKind::Info);
    assert_eq!(report.insights[0].rule, None);
}

// =============================================================================
// JSON input
// =============================================================================

#[test]
fn test_analyze_json_records() {
    let json = r#"[
        {"id": 1, "date": "2024-06-03", "type": "expense", "amount": 120000, "category": "Shopping"},
        {"id": 2, "date": "2024-06-04", "type": "expense", "amount": 30000, "category": "Food", "memo": "Groceries"},
        {"id": 3, "date": "2024-06-25", "type": "income", "amount": 1000000, "category": "Salary"}
    ]"#;
    let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();

    let report = analyze(&records, None, date("2024-06-30"), &InsightConfig::default()).unwrap();

    assert_eq!(report.summary.top_categories[0].category, "Shopping");
    // Savings rate 85%
    let savings = report
        .insights
        .iter()
        .find(|i| i.rule == Some(Rule::SavingsRate))
        .unwrap();
    assert!(savings.message.contains("85.0%"));
}

#[test]
fn test_custom_thresholds_change_outcome() {
    let records: Vec<TransactionRecord> = vec![
        tx("2024-01-10", TransactionType::Expense, 100_000.0, "Food", "").into_record(1),
        tx("2024-02-10", TransactionType::Expense, 115_000.0, "Food", "").into_record(2),
    ];

    let default = analyze(&records, None, date("2024-02-28"), &InsightConfig::default()).unwrap();
    let trend = default.insights.iter().find(|i| i.rule == Some(Rule::MonthTrend)).unwrap();
    assert_eq!(trend.kind, InsightKind::Info);

    let config = InsightConfig::from_toml_str("[trend]\nincrease_pct = 10.0\n").unwrap();
    let strict = analyze(&records, None, date("2024-02-28"), &config).unwrap();
    let trend = strict.insights.iter().find(|i| i.rule == Some(Rule::MonthTrend)).unwrap();
    assert_eq!(trend.kind, InsightKind::Warning);
}
