//! Demo data generator
//!
//! Produces a plausible household ledger for the last few months so the
//! analytics and insights have something to chew on. Pass a seeded RNG for
//! reproducible output.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{NewTransaction, TransactionType, DEFAULT_PAYMENT_METHODS};

/// Category, minimum amount, maximum amount, typical count per month
type Pattern = (&'static str, u32, u32, u32);

const EXPENSE_PATTERNS: &[Pattern] = &[
    ("Food", 5_000, 30_000, 15),
    ("Transport", 1_000, 10_000, 8),
    ("Housing/Telecom", 50_000, 150_000, 2),
    ("Shopping", 10_000, 100_000, 3),
    ("Culture/Leisure", 10_000, 50_000, 2),
    ("Medical/Health", 5_000, 80_000, 1),
    ("Education", 30_000, 200_000, 1),
    ("Gifts/Events", 30_000, 100_000, 1),
    ("Other Expense", 5_000, 30_000, 2),
];

const INCOME_PATTERNS: &[Pattern] = &[
    ("Salary", 2_500_000, 3_500_000, 1),
    ("Side Income", 100_000, 500_000, 1),
];

const EXPENSE_MEMOS: &[&str] = &[
    "Lunch",
    "Coffee",
    "Taxi",
    "Bus",
    "Subway",
    "Groceries",
    "Online order",
    "Movie",
    "Books",
    "Pharmacy",
    "Phone bill",
    "Maintenance fee",
    "Electricity",
    "Birthday gift",
    "Gym",
    "Snacks",
];

const INCOME_MEMOS: &[&str] = &["Paycheck", "Freelance", "Allowance", "Dividend", "Refund"];

/// Generate transactions for `months` calendar months ending with the month
/// of `today`. Days are drawn from 1..=28 so every month is valid.
pub fn generate<R: Rng + ?Sized>(today: NaiveDate, months: u32, rng: &mut R) -> Vec<NewTransaction> {
    let mut transactions = Vec::new();

    for offset in 0..months {
        let (year, month) = month_back(today, offset);

        for &(category, min, max, avg_count) in EXPENSE_PATTERNS {
            let count = rng.gen_range(avg_count.saturating_sub(1).max(1)..=avg_count + 1);
            for _ in 0..count {
                transactions.push(NewTransaction {
                    date: random_day(year, month, rng),
                    tx_type: TransactionType::Expense,
                    amount: round_to(rng.gen_range(min..=max), 100),
                    category: category.to_string(),
                    payment_method: pick(DEFAULT_PAYMENT_METHODS, rng),
                    memo: pick(EXPENSE_MEMOS, rng),
                });
            }
        }

        for &(category, min, max, count) in INCOME_PATTERNS {
            for _ in 0..count {
                transactions.push(NewTransaction {
                    date: random_day(year, month, rng),
                    tx_type: TransactionType::Income,
                    amount: round_to(rng.gen_range(min..=max), 1_000),
                    category: category.to_string(),
                    payment_method: "Transfer".to_string(),
                    memo: pick(INCOME_MEMOS, rng),
                });
            }
        }
    }

    transactions
}

/// Year and month `offset` months before `today`
fn month_back(today: NaiveDate, offset: u32) -> (i32, u32) {
    let index = today.year() * 12 + today.month0() as i32 - offset as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn random_day<R: Rng + ?Sized>(year: i32, month: u32, rng: &mut R) -> NaiveDate {
    let day = rng.gen_range(1..=28);
    // Day 1..=28 exists in every month
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn round_to(amount: u32, step: u32) -> f64 {
    ((amount as f64 / step as f64).round() * step as f64).max(0.0)
}

fn pick<R: Rng + ?Sized>(choices: &[&str], rng: &mut R) -> String {
    choices.choose(rng).copied().unwrap_or_default().to_string()
}
