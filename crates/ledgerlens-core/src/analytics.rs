//! Aggregation layer
//!
//! Pure functions over a [`TransactionTable`]. None of them fail: an empty
//! table produces zeroes or empty vectors of the documented shape.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TransactionType;
use crate::table::TransactionTable;

/// Weekday labels indexed by `TableRow::weekday`
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const TOP_CATEGORY_LIMIT: usize = 3;

/// Headline figures for a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub daily_avg_expense: f64,
    /// Up to three largest expense categories, largest first
    pub top_categories: Vec<CategoryAmount>,
    pub tx_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodAmount {
    pub payment_method: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAmount {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub year_month: String,
    pub tx_type: TransactionType,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year_month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u32,
    pub label: String,
    pub amount: f64,
}

/// Aggregates shared by the insight rules, computed once per run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub summary: Summary,
    pub by_category: Vec<CategoryAmount>,
    pub monthly_expense: Vec<MonthTotal>,
}

impl Aggregates {
    pub fn compute(table: &TransactionTable) -> Self {
        let by_category = expense_by_category(table);
        Self {
            summary: summary_with_categories(table, &by_category),
            by_category,
            monthly_expense: monthly_expense_totals(table),
        }
    }
}

/// Compute the headline [`Summary`]
pub fn summary(table: &TransactionTable) -> Summary {
    summary_with_categories(table, &expense_by_category(table))
}

fn summary_with_categories(table: &TransactionTable, by_category: &[CategoryAmount]) -> Summary {
    let total_income: f64 = table.incomes().map(|r| r.amount).sum();
    let total_expense: f64 = table.expenses().map(|r| r.amount).sum();
    let expense_count = table.expenses().count();
    let income_count = table.incomes().count();

    let (daily_avg_expense, top_categories) = if expense_count == 0 {
        (0.0, Vec::new())
    } else {
        (
            total_expense / table.day_span() as f64,
            by_category.iter().take(TOP_CATEGORY_LIMIT).cloned().collect(),
        )
    };

    Summary {
        total_income,
        total_expense,
        net: total_income - total_expense,
        daily_avg_expense,
        top_categories,
        tx_count: table.len(),
        expense_count,
        income_count,
    }
}

/// Expense totals per category, largest first
pub fn expense_by_category(table: &TransactionTable) -> Vec<CategoryAmount> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in table.expenses() {
        *totals.entry(row.category.as_str()).or_insert(0.0) += row.amount;
    }

    let mut result: Vec<CategoryAmount> = totals
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect();
    result.sort_by(|a, b| descending(a.amount, b.amount).then_with(|| a.category.cmp(&b.category)));
    result
}

/// Expense totals per payment method, largest first
pub fn expense_by_payment_method(table: &TransactionTable) -> Vec<PaymentMethodAmount> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in table.expenses() {
        *totals.entry(row.payment_method.as_str()).or_insert(0.0) += row.amount;
    }

    let mut result: Vec<PaymentMethodAmount> = totals
        .into_iter()
        .map(|(payment_method, amount)| PaymentMethodAmount {
            payment_method: payment_method.to_string(),
            amount,
        })
        .collect();
    result.sort_by(|a, b| {
        descending(a.amount, b.amount).then_with(|| a.payment_method.cmp(&b.payment_method))
    });
    result
}

/// Daily expense series, oldest first
pub fn expense_by_date(table: &TransactionTable) -> Vec<DateAmount> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in table.expenses() {
        *totals.entry(row.date).or_insert(0.0) += row.amount;
    }

    totals
        .into_iter()
        .map(|(date, amount)| DateAmount { date, amount })
        .collect()
}

/// Income and expense sums per month, oldest month first
///
/// Within a month the income row precedes the expense row. A row only exists
/// for a type that has records in that month.
pub fn income_expense_by_month(table: &TransactionTable) -> Vec<MonthlyAmount> {
    let mut totals: BTreeMap<(&str, TransactionType), f64> = BTreeMap::new();
    for row in table.rows() {
        *totals
            .entry((row.year_month.as_str(), row.tx_type))
            .or_insert(0.0) += row.amount;
    }

    totals
        .into_iter()
        .map(|((year_month, tx_type), amount)| MonthlyAmount {
            year_month: year_month.to_string(),
            tx_type,
            amount,
        })
        .collect()
}

/// Expense sums per month, oldest month first
pub fn monthly_expense_totals(table: &TransactionTable) -> Vec<MonthTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in table.expenses() {
        *totals.entry(row.year_month.as_str()).or_insert(0.0) += row.amount;
    }

    totals
        .into_iter()
        .map(|(year_month, amount)| MonthTotal {
            year_month: year_month.to_string(),
            amount,
        })
        .collect()
}

/// Mean expense amount per weekday, Monday first
///
/// Weekdays without any expense record are left out rather than reported as 0.
pub fn expense_by_weekday(table: &TransactionTable) -> Vec<WeekdayAverage> {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for row in table.expenses() {
        let idx = row.weekday as usize;
        sums[idx] += row.amount;
        counts[idx] += 1;
    }

    (0..7)
        .filter(|&idx| counts[idx] > 0)
        .map(|idx| WeekdayAverage {
            weekday: idx as u32,
            label: WEEKDAY_NAMES[idx].to_string(),
            amount: sums[idx] / counts[idx] as f64,
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
