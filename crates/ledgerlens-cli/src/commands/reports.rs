//! Report command implementations
//!
//! Summary, breakdowns and insights over the stored ledger, plus `analyze`
//! for a JSON export that never touches the database.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use ledgerlens_core::analytics;
use ledgerlens_core::{
    analyze, format_amount, Budget, Database, Insight, InsightConfig, InsightEngine,
    InsightKind, Summary, TransactionFilter, TransactionRecord, TransactionTable, TransactionType,
};

use super::{render_emphasis, truncate};
use crate::cli::{BreakdownKind, PeriodArgs};

/// Resolve a named period (or an explicit `--from`/`--to` pair) to an inclusive date range.
///
/// `None` means no date restriction.
pub fn resolve_period(
    period: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<(NaiveDate, NaiveDate)>> {
    match (from, to) {
        (Some(from), Some(to)) => {
            if from > to {
                bail!("--from {} is after --to {}", from, to);
            }
            return Ok(Some((from, to)));
        }
        (Some(_), None) | (None, Some(_)) => {
            bail!("--from and --to must be given together");
        }
        (None, None) => {}
    }

    let first_of_month = today
        .with_day(1)
        .context("Failed to compute start of month")?;

    let range = match period {
        "this-month" => Some((first_of_month, today)),
        "last-month" => {
            let start = first_of_month
                .checked_sub_months(Months::new(1))
                .context("Date out of range")?;
            let end = first_of_month
                .pred_opt()
                .context("Date out of range")?;
            Some((start, end))
        }
        "last-3-months" => {
            let start = first_of_month
                .checked_sub_months(Months::new(2))
                .context("Date out of range")?;
            Some((start, today))
        }
        "this-year" => {
            let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .context("Failed to compute start of year")?;
            Some((start, today))
        }
        "all" => None,
        other => bail!(
            "Unknown period: {}. Use: this-month, last-month, last-3-months, this-year, all",
            other
        ),
    };

    Ok(range)
}

/// [`resolve_period`] relative to the local date
pub fn resolve_period_args(args: &PeriodArgs) -> Result<Option<(NaiveDate, NaiveDate)>> {
    resolve_period(&args.period, args.from, args.to, Local::now().date_naive())
}

fn load_records(
    db: &Database,
    user_id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<Vec<TransactionRecord>> {
    let filter = TransactionFilter::new().date_range(range);
    Ok(db.list_transactions(user_id, &filter)?)
}

fn period_label(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        Some((from, to)) => format!("{} to {}", from, to),
        None => "all time".to_string(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!("   Income:           {:>14}", format_amount(summary.total_income));
    println!("   Expenses:         {:>14}", format_amount(summary.total_expense));
    let net = if summary.net < 0.0 {
        format!("\x1b[31m-{}\x1b[0m", format_amount(-summary.net))
    } else {
        format!("\x1b[32m{}\x1b[0m", format_amount(summary.net))
    };
    println!("   Net:              {:>14}", net);
    println!(
        "   Avg daily spend:  {:>14}",
        format_amount(summary.daily_avg_expense)
    );
    println!(
        "   Transactions:     {:>14}",
        format!(
            "{} ({} expense, {} income)",
            summary.tx_count, summary.expense_count, summary.income_count
        )
    );

    if !summary.top_categories.is_empty() {
        println!();
        println!("   Top spending categories:");
        for (i, top) in summary.top_categories.iter().enumerate() {
            println!(
                "     {}. {:20} {:>12}",
                i + 1,
                truncate(&top.category, 20),
                format_amount(top.amount)
            );
        }
    }
}

pub fn print_insights(insights: &[Insight]) {
    for insight in insights {
        let color = match insight.kind {
            InsightKind::Warning => "\x1b[33m",
            InsightKind::Success => "\x1b[32m",
            InsightKind::Info => "\x1b[36m",
            InsightKind::Error => "\x1b[31m",
        };
        println!(
            "   {} {}{:<7}\x1b[0m {}",
            insight.icon,
            color,
            insight.kind.as_str(),
            render_emphasis(&insight.message)
        );
    }
}

pub fn cmd_summary(
    db: &Database,
    user_id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
    json: bool,
) -> Result<()> {
    let records = load_records(db, user_id, range)?;
    let table = TransactionTable::build(&records).context("Stored data is invalid")?;
    let summary = analytics::summary(&table);

    if json {
        return print_json(&summary);
    }

    println!();
    println!("📊 Summary ({})", period_label(range));
    println!("   ─────────────────────────────────────────");
    print_summary(&summary);

    Ok(())
}

/// Print a bar chart row: label, amount and a bar scaled to `max`
fn print_bar(label: &str, amount: f64, max: f64) {
    let width = if max > 0.0 {
        ((amount / max) * 30.0).round() as usize
    } else {
        0
    };
    println!(
        "   {:20} │ {:>12} │ {}",
        truncate(label, 20),
        format_amount(amount),
        "█".repeat(width)
    );
}

pub fn cmd_breakdown(
    db: &Database,
    user_id: i64,
    by: BreakdownKind,
    range: Option<(NaiveDate, NaiveDate)>,
    json: bool,
) -> Result<()> {
    let records = load_records(db, user_id, range)?;
    let table = TransactionTable::build(&records).context("Stored data is invalid")?;

    match by {
        BreakdownKind::Category => {
            let rows = analytics::expense_by_category(&table);
            if json {
                return print_json(&rows);
            }
            println!();
            println!("🏷️  Spending by category ({})", period_label(range));
            println!("   ─────────────────────────────────────────");
            let max = rows.first().map(|r| r.amount).unwrap_or(0.0);
            for row in &rows {
                print_bar(&row.category, row.amount, max);
            }
        }
        BreakdownKind::Payment => {
            let rows = analytics::expense_by_payment_method(&table);
            if json {
                return print_json(&rows);
            }
            println!();
            println!("💳 Spending by payment method ({})", period_label(range));
            println!("   ─────────────────────────────────────────");
            let max = rows.iter().map(|r| r.amount).fold(0.0, f64::max);
            for row in &rows {
                print_bar(&row.payment_method, row.amount, max);
            }
        }
        BreakdownKind::Date => {
            let rows = analytics::expense_by_date(&table);
            if json {
                return print_json(&rows);
            }
            println!();
            println!("📅 Daily spending ({})", period_label(range));
            println!("   ─────────────────────────────────────────");
            let max = rows.iter().map(|r| r.amount).fold(0.0, f64::max);
            for row in &rows {
                print_bar(&row.date.to_string(), row.amount, max);
            }
        }
        BreakdownKind::Weekday => {
            let rows = analytics::expense_by_weekday(&table);
            if json {
                return print_json(&rows);
            }
            println!();
            println!("🗓️  Average spend per weekday ({})", period_label(range));
            println!("   ─────────────────────────────────────────");
            let max = rows.iter().map(|r| r.amount).fold(0.0, f64::max);
            for row in &rows {
                print_bar(&row.label, row.amount, max);
            }
        }
        BreakdownKind::Month => {
            let rows = analytics::income_expense_by_month(&table);
            if json {
                return print_json(&rows);
            }
            println!();
            println!("📆 Income and expenses by month ({})", period_label(range));
            println!("   ─────────────────────────────────────────");
            println!("   {:8} │ {:>12} │ {:>12}", "Month", "Income", "Expense");
            let mut months: Vec<&str> = rows.iter().map(|r| r.year_month.as_str()).collect();
            months.dedup();
            for month in months {
                let amount_for = |kind: TransactionType| {
                    rows.iter()
                        .find(|r| r.year_month == month && r.tx_type == kind)
                        .map(|r| r.amount)
                        .unwrap_or(0.0)
                };
                println!(
                    "   {:8} │ {:>12} │ {:>12}",
                    month,
                    format_amount(amount_for(TransactionType::Income)),
                    format_amount(amount_for(TransactionType::Expense))
                );
            }
        }
    }

    Ok(())
}

pub fn cmd_insights(
    db: &Database,
    user_id: i64,
    range: Option<(NaiveDate, NaiveDate)>,
    config: &InsightConfig,
    json: bool,
) -> Result<()> {
    let records = load_records(db, user_id, range)?;
    let budgets = db.list_budgets(user_id, None)?;
    let table = TransactionTable::build(&records).context("Stored data is invalid")?;

    let engine = InsightEngine::new(config.clone());
    let insights = engine.generate(&table, Some(budgets.as_slice()), Local::now().date_naive());

    if json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Insights ({})", period_label(range));
    println!("   ─────────────────────────────────────────");
    print_insights(&insights);

    Ok(())
}

/// Analyze a JSON array of transaction records, with optional JSON budgets
pub fn cmd_analyze(
    file: &Path,
    budgets_file: Option<&Path>,
    today: Option<NaiveDate>,
    config: &InsightConfig,
    json: bool,
) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<TransactionRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse transactions in {}", file.display()))?;

    let budgets: Option<Vec<Budget>> = match budgets_file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let budgets = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse budgets in {}", path.display()))?;
            Some(budgets)
        }
        None => None,
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let report = analyze(&records, budgets.as_deref(), today, config)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("📊 Analysis of {} ({} records)", file.display(), records.len());
    println!("   ─────────────────────────────────────────");
    print_summary(&report.summary);

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────");
    print_insights(&report.insights);

    Ok(())
}

