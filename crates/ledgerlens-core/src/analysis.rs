//! One-call analysis: records in, summary + breakdowns + insights out

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::analytics::{
    self, Aggregates, CategoryAmount, DateAmount, MonthlyAmount, PaymentMethodAmount, Summary,
    WeekdayAverage,
};
use crate::error::Result;
use crate::insights::{AnalysisContext, Insight, InsightConfig, InsightEngine};
use crate::models::{Budget, TransactionRecord};
use crate::table::TransactionTable;

/// Everything the presentation layer needs for a dashboard view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub by_category: Vec<CategoryAmount>,
    pub by_date: Vec<DateAmount>,
    pub by_payment_method: Vec<PaymentMethodAmount>,
    pub by_month: Vec<MonthlyAmount>,
    pub by_weekday: Vec<WeekdayAverage>,
    pub insights: Vec<Insight>,
}

/// Build the table once and compute every view over it.
///
/// Fails only when a record cannot enter the table (bad date or amount).
pub fn analyze(
    records: &[TransactionRecord],
    budgets: Option<&[Budget]>,
    today: NaiveDate,
    config: &InsightConfig,
) -> Result<AnalysisReport> {
    let table = TransactionTable::build(records)?;
    let aggregates = Aggregates::compute(&table);

    let engine = InsightEngine::new(config.clone());
    let ctx = AnalysisContext::new(&table, &aggregates, budgets, today, engine.config());
    let insights = engine.run(&ctx);

    tracing::debug!(
        records = table.len(),
        insights = insights.len(),
        "Analysis complete"
    );

    Ok(AnalysisReport {
        summary: aggregates.summary.clone(),
        by_category: aggregates.by_category.clone(),
        by_date: analytics::expense_by_date(&table),
        by_payment_method: analytics::expense_by_payment_method(&table),
        by_month: analytics::income_expense_by_month(&table),
        by_weekday: analytics::expense_by_weekday(&table),
        insights,
    })
}

/// Insights for `records` with default thresholds, judged as of today
pub fn generate_insights(
    records: &[TransactionRecord],
    budgets: Option<&[Budget]>,
) -> Result<Vec<Insight>> {
    let table = TransactionTable::build(records)?;
    let today = Local::now().date_naive();
    Ok(InsightEngine::default().generate(&table, budgets, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{InsightKind, Rule};
    use crate::test_utils::{budget, date, expense, income};
    use crate::Error;

    #[test]
    fn test_empty_records_report() {
        let report = analyze(&[], None, date("2024-05-01"), &InsightConfig::default()).unwrap();

        assert_eq!(report.summary, Summary::default());
        assert!(report.by_category.is_empty());
        assert!(report.by_weekday.is_empty());
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].kind, InsightKind::Info);
    }

    #[test]
    fn test_generate_insights_on_empty_input() {
        let insights = generate_insights(&[], None).unwrap();
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
    }

    #[test]
    fn test_full_report() {
        let records = vec![
            income(1, "2024-04-25", 3_000_000.0, "Salary"),
            expense(2, "2024-04-02", 100_000.0, "Food"),
            expense(3, "2024-05-02", 400_000.0, "Food"),
            expense(4, "2024-05-03", 60_000.0, "Transport"),
        ];
        let budgets = vec![budget("2024-05", "Food", 420_000.0)];

        let report = analyze(
            &records,
            Some(&budgets),
            date("2024-05-20"),
            &InsightConfig::default(),
        )
        .unwrap();

        assert_eq!(report.summary.tx_count, 4);
        assert_eq!(report.by_category[0].category, "Food");
        assert_eq!(report.by_date.len(), 3);
        assert_eq!(report.by_month.len(), 3);

        let rules: Vec<Rule> = report.insights.iter().filter_map(|i| i.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::TopCategory,
                Rule::MonthTrend,
                Rule::BudgetUsage,
                Rule::SavingsRate
            ]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["insights"].is_array());
        assert_eq!(json["summary"]["tx_count"], 4);
    }

    #[test]
    fn test_bad_date_fails_analysis() {
        let records = vec![expense(9, "2024-02-30", 1.0, "Food")];
        let result = analyze(&records, None, date("2024-05-01"), &InsightConfig::default());
        assert!(matches!(result, Err(Error::DataFormat { id: 9, .. })));
    }
}
