//! Insight Engine - runs the rule pipeline over one analysis context

use chrono::NaiveDate;

use crate::analytics::Aggregates;
use crate::models::Budget;
use crate::table::TransactionTable;
use crate::Result;

use super::config::InsightConfig;
use super::types::{Insight, InsightKind, Rule};
use super::{budget_usage, month_trend, outliers, recurring, savings_rate, top_category};

/// Everything a rule may look at. Built once per analysis call.
pub struct AnalysisContext<'a> {
    pub table: &'a TransactionTable,
    pub aggregates: &'a Aggregates,
    /// Budgets for the user, if the caller supplied any
    pub budgets: Option<&'a [Budget]>,
    /// Reference date; its month is the "current month" for budget checks
    pub today: NaiveDate,
    pub config: &'a InsightConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        table: &'a TransactionTable,
        aggregates: &'a Aggregates,
        budgets: Option<&'a [Budget]>,
        today: NaiveDate,
        config: &'a InsightConfig,
    ) -> Self {
        Self {
            table,
            aggregates,
            budgets,
            today,
            config,
        }
    }

    /// `YYYY-MM` of the reference date
    pub fn current_month(&self) -> String {
        self.today.format("%Y-%m").to_string()
    }
}

impl Rule {
    /// Run this rule against the context
    pub fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        match self {
            Rule::TopCategory => top_category::evaluate(ctx),
            Rule::MonthTrend => month_trend::evaluate(ctx),
            Rule::BudgetUsage => budget_usage::evaluate(ctx),
            Rule::Outliers => outliers::evaluate(ctx),
            Rule::Recurring => recurring::evaluate(ctx),
            Rule::SavingsRate => savings_rate::evaluate(ctx),
        }
    }
}

/// The notice returned instead of any rule output when there is no data
pub fn empty_data_insight() -> Insight {
    Insight::new(
        InsightKind::Info,
        "ℹ️",
        "No transactions yet. Add a few income or expense entries to see insights here.",
    )
}

/// The main insight engine that orchestrates the rules
#[derive(Debug, Clone, Default)]
pub struct InsightEngine {
    config: InsightConfig,
}

impl InsightEngine {
    pub fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Build aggregates for `table` and run every rule
    pub fn generate(
        &self,
        table: &TransactionTable,
        budgets: Option<&[Budget]>,
        today: NaiveDate,
    ) -> Vec<Insight> {
        let aggregates = Aggregates::compute(table);
        let ctx = AnalysisContext::new(table, &aggregates, budgets, today, &self.config);
        self.run(&ctx)
    }

    /// Run every rule in pipeline order and concatenate their output.
    ///
    /// A rule that fails is logged and skipped; the others still run.
    pub fn run(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        if ctx.table.is_empty() {
            return vec![empty_data_insight()];
        }

        assemble(Rule::ALL.into_iter().map(|rule| (rule, rule.evaluate(ctx))))
    }
}

/// Concatenate rule outputs in the order given, tagging each insight with its
/// rule. Failed rules contribute nothing.
fn assemble(outputs: impl IntoIterator<Item = (Rule, Result<Vec<Insight>>)>) -> Vec<Insight> {
    let mut all_insights = Vec::new();

    for (rule, output) in outputs {
        match output {
            Ok(insights) => {
                tracing::debug!(
                    rule = rule.as_str(),
                    count = insights.len(),
                    "Insight rule complete"
                );
                all_insights.extend(insights.into_iter().map(|i| i.with_rule(rule)));
            }
            Err(e) => {
                tracing::warn!(
                    rule = rule.as_str(),
                    error = %e,
                    "Insight rule failed"
                );
            }
        }
    }

    all_insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{TransactionRecord, TransactionType};

    fn expense(id: i64, date: &str, amount: f64, category: &str) -> TransactionRecord {
        TransactionRecord {
            id,
            date: date.to_string(),
            tx_type: TransactionType::Expense,
            amount,
            category: category.to_string(),
            payment_method: "Card".to_string(),
            memo: String::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn test_empty_table_short_circuits() {
        let engine = InsightEngine::default();
        let insights = engine.generate(&TransactionTable::default(), None, today());

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert_eq!(insights[0].rule, None);
    }

    #[test]
    fn test_output_follows_rule_order() {
        let table = TransactionTable::build(&[
            expense(1, "2024-02-10", 100_000.0, "Food"),
            expense(2, "2024-03-10", 130_000.0, "Food"),
        ])
        .unwrap();
        let budgets = vec![Budget {
            id: 1,
            month: "2024-03".to_string(),
            category: String::new(),
            budget_amount: 140_000.0,
        }];

        let insights = InsightEngine::default().generate(&table, Some(&budgets), today());
        let rules: Vec<Rule> = insights.iter().filter_map(|i| i.rule).collect();

        assert_eq!(
            rules,
            vec![Rule::TopCategory, Rule::MonthTrend, Rule::BudgetUsage]
        );
    }

    #[test]
    fn test_failing_rule_does_not_abort_pipeline() {
        let outputs = vec![
            (
                Rule::TopCategory,
                Ok(vec![Insight::new(InsightKind::Info, "📊", "top")]),
            ),
            (
                Rule::MonthTrend,
                Err(Error::InvalidData("broken".to_string())),
            ),
            (
                Rule::SavingsRate,
                Ok(vec![Insight::new(InsightKind::Success, "🎉", "saved")]),
            ),
        ];

        let insights = assemble(outputs);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].rule, Some(Rule::TopCategory));
        assert_eq!(insights[1].rule, Some(Rule::SavingsRate));
    }

    #[test]
    fn test_malformed_budget_does_not_hide_other_insights() {
        let table = TransactionTable::build(&[expense(1, "2024-03-02", 5_000.0, "Food")]).unwrap();
        let budgets = vec![Budget {
            id: 1,
            month: "March".to_string(),
            category: String::new(),
            budget_amount: 1.0,
        }];

        let insights = InsightEngine::default().generate(&table, Some(&budgets), today());

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].rule, Some(Rule::TopCategory));
    }
}
