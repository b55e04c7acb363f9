//! Savings Rate Insight

use crate::error::Result;
use crate::format::format_amount;

use super::engine::AnalysisContext;
use super::types::{Insight, InsightKind};

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let summary = &ctx.aggregates.summary;
    if summary.total_income <= 0.0 || summary.total_expense <= 0.0 {
        return Ok(vec![]);
    }

    let config = &ctx.config.savings;
    let save_rate = summary.net / summary.total_income * 100.0;

    let insight = if save_rate >= config.target_pct {
        Insight::new(
            InsightKind::Success,
            "🎉",
            format!(
                "Your savings rate is **{:.1}%**. Great work, keep it up!",
                save_rate
            ),
        )
    } else if save_rate >= config.floor_pct {
        Insight::new(
            InsightKind::Info,
            "💰",
            format!(
                "Your savings rate is **{:.1}%**. Trim a little more to reach the {:.0}% goal.",
                save_rate, config.target_pct
            ),
        )
    } else if save_rate < 0.0 {
        Insight::new(
            InsightKind::Warning,
            "🚨",
            format!(
                "You spent **{}** more than you earned this period. Time to review your expenses.",
                format_amount(summary.net.abs())
            ),
        )
    } else {
        return Ok(vec![]);
    };

    Ok(vec![insight])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Rule;
    use crate::test_utils::{expense, income, run_rule};

    fn with(income_amount: f64, expense_amount: f64) -> Vec<Insight> {
        run_rule(
            Rule::SavingsRate,
            &[
                income(1, "2024-06-01", income_amount, "Salary"),
                expense(2, "2024-06-02", expense_amount, "Food"),
            ],
            None,
            "2024-06-30",
        )
    }

    #[test]
    fn test_high_savings_rate() {
        let insights = with(3_000_000.0, 1_500_000.0);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Success);
        assert!(insights[0].message.contains("50.0%"));
    }

    #[test]
    fn test_moderate_savings_rate() {
        let insights = with(1_000_000.0, 800_000.0);
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert!(insights[0].message.contains("20.0%"));
        assert!(insights[0].message.contains("30% goal"));
    }

    #[test]
    fn test_low_savings_rate_is_silent() {
        assert!(with(1_000_000.0, 950_000.0).is_empty());
    }

    #[test]
    fn test_overspending_warns_with_shortfall() {
        let insights = with(1_000_000.0, 1_250_000.0);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(insights[0].message.contains("250,000"));
    }

    #[test]
    fn test_requires_income_and_expense() {
        let insights = run_rule(
            Rule::SavingsRate,
            &[expense(1, "2024-06-02", 10_000.0, "Food")],
            None,
            "2024-06-30",
        );
        assert!(insights.is_empty());
    }
}
