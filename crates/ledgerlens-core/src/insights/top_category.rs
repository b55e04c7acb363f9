//! Top Category Insight
//!
//! Names the largest expense category and its share of total spending.

use crate::error::Result;
use crate::format::format_amount;

use super::engine::AnalysisContext;
use super::types::{Insight, InsightKind};

pub fn evaluate(ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
    let summary = &ctx.aggregates.summary;
    let Some(top) = summary.top_categories.first() else {
        return Ok(vec![]);
    };

    let share = if summary.total_expense > 0.0 {
        top.amount / summary.total_expense * 100.0
    } else {
        0.0
    };

    Ok(vec![Insight::new(
        InsightKind::Info,
        "📊",
        format!(
            "Your largest expense category is **{}**, making up **{:.1}%** of total spending ({}).",
            top.category,
            share,
            format_amount(top.amount)
        ),
    )])
}
