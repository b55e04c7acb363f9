//! Recurring Expense Insight
//!
//! Looks for charges of a similar amount that repeat roughly once a month
//! within the same category (subscriptions, rent, phone bills).

use std::collections::HashSet;

use crate::error::Result;
use crate::format::format_amount;
use crate::table::TableRow;

use super::engine::AnalysisContext;
use super::outliers::group_by_category;
use super::types::{Insight, InsightKind};

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let config = &ctx.config.recurring;
    if ctx.aggregates.summary.expense_count < config.min_expenses {
        return Ok(vec![]);
    }

    let mut expenses: Vec<&TableRow> = ctx.table.expenses().collect();
    expenses.sort_by_key(|r| r.date);

    let mut seen: HashSet<(String, i64)> = HashSet::new();
    let mut insights = Vec::new();

    for rows in group_by_category(expenses.into_iter()) {
        for (i, first) in rows.iter().enumerate() {
            if first.amount <= 0.0 {
                continue;
            }
            let window_end = (i + 1 + config.lookahead).min(rows.len());

            for next in &rows[i + 1..window_end] {
                let drift = (first.amount - next.amount).abs() / first.amount;
                if drift > config.amount_tolerance {
                    continue;
                }

                let gap = (next.date - first.date).num_days();
                if gap < config.min_gap_days || gap > config.max_gap_days {
                    continue;
                }

                let bucket = (first.amount / config.amount_bucket).floor() as i64;
                if !seen.insert((first.category.clone(), bucket)) {
                    continue;
                }

                insights.push(Insight::new(
                    InsightKind::Info,
                    "🔄",
                    format!(
                        "**Recurring expense**: about {} in '{}' repeats every month.",
                        format_amount(first.amount),
                        first.category
                    ),
                ));
                if insights.len() >= config.limit {
                    return Ok(insights);
                }
            }
        }
    }

    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Rule;
    use crate::insights::InsightConfig;
    use crate::test_utils::{expense, run_rule, run_rule_with};

    fn filler() -> Vec<crate::models::TransactionRecord> {
        vec![
            expense(10, "2024-01-10", 4_500.0, "Food"),
            expense(11, "2024-01-20", 12_000.0, "Transport"),
        ]
    }

    #[test]
    fn test_monthly_subscription_detected() {
        let mut records = vec![
            expense(1, "2024-01-05", 9_900.0, "subscription"),
            expense(2, "2024-02-04", 9_900.0, "subscription"),
        ];
        records.extend(filler());

        let insights = run_rule(Rule::Recurring, &records, None, "2024-03-01");
        assert_eq!(insights.len(), 1);
        assert!(insights[0].message.contains("'subscription'"));
        assert!(insights[0].message.contains("9,900"));
    }

    #[test]
    fn test_same_bucket_reported_once() {
        let mut records = vec![
            expense(1, "2024-01-05", 9_900.0, "subscription"),
            expense(2, "2024-02-04", 9_900.0, "subscription"),
            // 31 days after the second charge
            expense(3, "2024-03-06", 9_900.0, "subscription"),
        ];
        records.extend(filler());

        let insights = run_rule(Rule::Recurring, &records, None, "2024-03-31");
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn test_unsorted_input_is_ordered_by_date() {
        let mut records = vec![
            expense(2, "2024-02-04", 9_900.0, "subscription"),
            expense(1, "2024-01-05", 9_900.0, "subscription"),
        ];
        records.extend(filler());

        assert_eq!(run_rule(Rule::Recurring, &records, None, "2024-03-01").len(), 1);
    }

    #[test]
    fn test_gap_and_amount_bounds() {
        // Weekly charges are not monthly
        let mut weekly = vec![
            expense(1, "2024-01-01", 9_900.0, "subscription"),
            expense(2, "2024-01-08", 9_900.0, "subscription"),
        ];
        weekly.extend(filler());
        assert!(run_rule(Rule::Recurring, &weekly, None, "2024-03-01").is_empty());

        // Amount drifted by more than 20%
        let mut drifted = vec![
            expense(1, "2024-01-05", 10_000.0, "subscription"),
            expense(2, "2024-02-04", 12_500.0, "subscription"),
        ];
        drifted.extend(filler());
        assert!(run_rule(Rule::Recurring, &drifted, None, "2024-03-01").is_empty());
    }

    #[test]
    fn test_needs_four_expenses() {
        let records = vec![
            expense(1, "2024-01-05", 9_900.0, "subscription"),
            expense(2, "2024-02-04", 9_900.0, "subscription"),
            expense(3, "2024-02-10", 1_000.0, "Food"),
        ];
        assert!(run_rule(Rule::Recurring, &records, None, "2024-03-01").is_empty());
    }

    /// Four categories, each charged twice 30 days apart
    fn four_recurring_categories() -> Vec<crate::models::TransactionRecord> {
        vec![
            expense(1, "2024-01-01", 13_900.0, "Streaming"),
            expense(2, "2024-01-02", 650_000.0, "Rent"),
            expense(3, "2024-01-03", 55_000.0, "Gym"),
            expense(4, "2024-01-04", 45_000.0, "Phone"),
            expense(5, "2024-01-31", 13_900.0, "Streaming"),
            expense(6, "2024-02-01", 650_000.0, "Rent"),
            expense(7, "2024-02-02", 55_000.0, "Gym"),
            expense(8, "2024-02-03", 45_000.0, "Phone"),
        ]
    }

    #[test]
    fn test_output_capped_at_three() {
        let insights = run_rule(Rule::Recurring, &four_recurring_categories(), None, "2024-02-10");

        assert_eq!(insights.len(), 3);
        assert!(insights[0].message.contains("'Streaming'"));
        assert!(insights[1].message.contains("'Rent'"));
        assert!(insights[2].message.contains("'Gym'"));
        assert!(!insights.iter().any(|i| i.message.contains("'Phone'")));
    }

    #[test]
    fn test_custom_limit_keeps_first_seen_category() {
        let mut config = InsightConfig::default();
        config.recurring.limit = 1;

        let insights = run_rule_with(
            Rule::Recurring,
            &four_recurring_categories(),
            None,
            "2024-02-10",
            &config,
        );

        assert_eq!(insights.len(), 1);
        assert!(insights[0].message.contains("'Streaming'"));
    }
}
