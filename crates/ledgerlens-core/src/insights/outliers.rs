//! Outlier Detection Insight
//!
//! Flags expenses that are far above what is normal for their category.
//! An amount is unusual when it sits at least two standard deviations above
//! the category mean and is also at least twice the mean.

use std::collections::HashMap;

use crate::error::Result;
use crate::format::format_amount;
use crate::table::TableRow;

use super::engine::AnalysisContext;
use super::types::{Insight, InsightKind};

/// Absorbs float rounding when an amount lands exactly on the threshold
const EPSILON: f64 = 1e-9;

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let config = &ctx.config.outliers;
    if ctx.aggregates.summary.expense_count < config.min_expenses {
        return Ok(vec![]);
    }

    let mut insights = Vec::new();

    for rows in group_by_category(ctx.table.expenses()) {
        if rows.len() < config.min_category_records {
            continue;
        }

        let (mean, std) = mean_and_std(&rows);
        if std <= 0.0 || mean <= 0.0 {
            continue;
        }

        let threshold = mean + config.stddev_multiplier * std;

        for row in rows {
            if row.amount >= threshold - EPSILON && row.amount >= mean * config.min_mean_ratio {
                insights.push(Insight::new(
                    InsightKind::Info,
                    "🔍",
                    format!(
                        "**Unusual expense**: {} '{}' spend of {} is **{:.1}x** the category average.",
                        row.date.format("%Y-%m-%d"),
                        row.category,
                        format_amount(row.amount),
                        row.amount / mean
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

/// Group rows by category, keeping categories in order of first appearance
pub(crate) fn group_by_category<'a>(
    rows: impl Iterator<Item = &'a TableRow>,
) -> Vec<Vec<&'a TableRow>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&TableRow>> = Vec::new();

    for row in rows {
        match index.get(row.category.as_str()) {
            Some(&i) => groups[i].push(row),
            None => {
                index.insert(row.category.as_str(), groups.len());
                groups.push(vec![row]);
            }
        }
    }

    groups
}

/// Mean and population standard deviation
fn mean_and_std(rows: &[&TableRow]) -> (f64, f64) {
    let n = rows.len() as f64;
    let mean = rows.iter().map(|r| r.amount).sum::<f64>() / n;
    let variance = rows.iter().map(|r| (r.amount - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{InsightConfig, Rule};
    use crate::test_utils::{expense, run_rule, run_rule_with};

    #[test]
    fn test_single_outlier_in_category() {
        let records = vec![
            expense(1, "2024-03-01", 10_000.0, "dining"),
            expense(2, "2024-03-05", 10_000.0, "dining"),
            expense(3, "2024-03-09", 10_000.0, "dining"),
            expense(4, "2024-03-13", 10_000.0, "dining"),
            expense(5, "2024-03-17", 50_000.0, "dining"),
        ];
        let insights = run_rule(Rule::Outliers, &records, None, "2024-03-31");

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert!(insights[0].message.contains("2024-03-17"));
        assert!(insights[0].message.contains("50,000"));
        assert!(insights[0].message.contains("2.8x"));
    }

    #[test]
    fn test_too_few_expenses() {
        let records = vec![
            expense(1, "2024-03-01", 10_000.0, "dining"),
            expense(2, "2024-03-05", 10_000.0, "dining"),
            expense(3, "2024-03-09", 10_000.0, "dining"),
            expense(4, "2024-03-17", 90_000.0, "dining"),
        ];
        assert!(run_rule(Rule::Outliers, &records, None, "2024-03-31").is_empty());
    }

    #[test]
    fn test_uniform_category_is_skipped() {
        let records: Vec<_> = (1..=6)
            .map(|i| expense(i, "2024-03-01", 7_000.0, "Transport"))
            .collect();
        assert!(run_rule(Rule::Outliers, &records, None, "2024-03-31").is_empty());
    }

    #[test]
    fn test_small_categories_ignored() {
        let records = vec![
            expense(1, "2024-03-01", 1_000.0, "Food"),
            expense(2, "2024-03-02", 1_000.0, "Food"),
            expense(3, "2024-03-03", 1_000.0, "Food"),
            expense(4, "2024-03-04", 5_000.0, "Gifts/Events"),
            expense(5, "2024-03-05", 500_000.0, "Gifts/Events"),
        ];
        assert!(run_rule(Rule::Outliers, &records, None, "2024-03-31").is_empty());
    }

    #[test]
    fn test_limit_caps_output() {
        let mut records = Vec::new();
        let mut id = 0;
        for category in ["A", "B", "C", "D"] {
            for _ in 0..4 {
                id += 1;
                records.push(expense(id, "2024-03-01", 10_000.0, category));
            }
            id += 1;
            records.push(expense(id, "2024-03-02", 50_000.0, category));
        }

        assert_eq!(run_rule(Rule::Outliers, &records, None, "2024-03-31").len(), 3);

        let mut config = InsightConfig::default();
        config.outliers.limit = 1;
        let insights = run_rule_with(Rule::Outliers, &records, None, "2024-03-31", &config);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].message.contains("'A'"));
    }
}
