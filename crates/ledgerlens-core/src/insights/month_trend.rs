//! Month-over-month Trend Insight
//!
//! Compares expense totals of the two most recent months present in the data.
//! The comparison is against the previous month *in the data*, not the
//! calendar month before today.

use crate::error::Result;
use crate::format::format_amount;

use super::engine::AnalysisContext;
use super::types::{Insight, InsightKind};

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let monthly = &ctx.aggregates.monthly_expense;
    let [.., previous, current] = monthly.as_slice() else {
        return Ok(vec![]);
    };

    if previous.amount <= 0.0 {
        return Ok(vec![]);
    }

    let change_pct = (current.amount - previous.amount) / previous.amount * 100.0;
    let thresholds = &ctx.config.trend;

    let insight = if change_pct > thresholds.increase_pct {
        Insight::new(
            InsightKind::Warning,
            "📈",
            format!(
                "{} spending rose **{:+.1}%** compared with {} ({} → {}).",
                current.year_month,
                change_pct,
                previous.year_month,
                format_amount(previous.amount),
                format_amount(current.amount)
            ),
        )
    } else if change_pct < -thresholds.decrease_pct {
        Insight::new(
            InsightKind::Success,
            "📉",
            format!(
                "{} spending changed by **{:+.1}%** compared with {} ({} → {}). Your cutbacks are paying off!",
                current.year_month,
                change_pct,
                previous.year_month,
                format_amount(previous.amount),
                format_amount(current.amount)
            ),
        )
    } else {
        Insight::new(
            InsightKind::Info,
            "➡️",
            format!(
                "{} spending is about the same as {} (change: {:+.1}%).",
                current.year_month, previous.year_month, change_pct
            ),
        )
    };

    Ok(vec![insight])
}
