//! Budget Usage Insight
//!
//! Checks the reference month's spending against every budget set for that
//! month. Budgets for other months are ignored, as are budgets whose month
//! is not `YYYY-MM`.

use crate::error::Result;
use crate::format::format_amount;
use crate::models::{validate_month, Budget};

use super::engine::AnalysisContext;
use super::types::{Insight, InsightKind};

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let budgets = match ctx.budgets {
        Some(budgets) if !budgets.is_empty() => budgets,
        _ => return Ok(vec![]),
    };

    let current_month = ctx.current_month();
    let mut insights = Vec::new();

    for budget in budgets {
        if let Err(e) = validate_month(&budget.month) {
            tracing::warn!(
                budget_id = budget.id,
                month = %budget.month,
                error = %e,
                "Skipping budget with malformed month"
            );
            continue;
        }
        if budget.month != current_month {
            continue;
        }

        let spent = spent_in_month(ctx, budget, &current_month);
        let usage_pct = if budget.budget_amount > 0.0 {
            spent / budget.budget_amount * 100.0
        } else {
            0.0
        };

        let label = if budget.is_overall() {
            "Overall".to_string()
        } else {
            format!("'{}' category", budget.category)
        };

        if usage_pct >= 100.0 {
            insights.push(Insight::new(
                InsightKind::Warning,
                "🚨",
                format!(
                    "{} budget **exceeded**! {} spent of {} ({:.1}%), {} over.",
                    label,
                    format_amount(spent),
                    format_amount(budget.budget_amount),
                    usage_pct,
                    format_amount(spent - budget.budget_amount)
                ),
            ));
        } else if usage_pct >= ctx.config.budget.warn_pct {
            insights.push(Insight::new(
                InsightKind::Warning,
                "⚠️",
                format!(
                    "{} budget is **{:.1}%** used. Only {} left this month.",
                    label,
                    usage_pct,
                    format_amount(budget.budget_amount - spent)
                ),
            ));
        }
    }

    Ok(insights)
}

/// Expense total for the month, narrowed to the budget's category unless it
/// is an overall budget
fn spent_in_month(ctx: &AnalysisContext<'_>, budget: &Budget, month: &str) -> f64 {
    ctx.table
        .expenses()
        .filter(|r| r.year_month == month)
        .filter(|r| budget.is_overall() || r.category == budget.category)
        .map(|r| r.amount)
        .sum()
}
