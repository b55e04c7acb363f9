//! In-memory transaction table
//!
//! Rows are built once per analysis run from raw [`TransactionRecord`]s. Each
//! row carries the parsed date plus the derived month bucket and weekday, so
//! the aggregation layer and the insight rules never re-parse dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{TransactionRecord, TransactionType};

/// One transaction with its derived columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: i64,
    pub date: NaiveDate,
    pub tx_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
    pub memo: String,
    /// `YYYY-MM`
    pub year_month: String,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u32,
}

impl TableRow {
    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }
}

/// Row-oriented view of a user's transactions for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionTable {
    rows: Vec<TableRow>,
}

impl TransactionTable {
    /// Build a table from raw records.
    ///
    /// Fails on the first record whose date is not a calendar date, or whose
    /// amount is negative or not finite. Partial tables are never returned.
    pub fn build(records: &[TransactionRecord]) -> Result<Self> {
        let rows = records
            .iter()
            .map(row_from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn expenses(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.is_expense())
    }

    pub fn incomes(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().filter(|r| r.is_income())
    }

    /// Inclusive number of calendar days between the earliest and latest row,
    /// floored at 1. An empty table spans 1 day.
    pub fn day_span(&self) -> i64 {
        let min = self.rows.iter().map(|r| r.date).min();
        let max = self.rows.iter().map(|r| r.date).max();
        match (min, max) {
            (Some(min), Some(max)) => ((max - min).num_days() + 1).max(1),
            _ => 1,
        }
    }
}

fn row_from_record(record: &TransactionRecord) -> Result<TableRow> {
    let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d").map_err(|_| {
        Error::DataFormat {
            id: record.id,
            value: record.date.clone(),
        }
    })?;

    if !record.amount.is_finite() || record.amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "Transaction {} has invalid amount {}",
            record.id, record.amount
        )));
    }

    Ok(TableRow {
        id: record.id,
        date,
        tx_type: record.tx_type,
        amount: record.amount,
        category: record.category.clone(),
        payment_method: record.payment_method.clone(),
        memo: record.memo.clone(),
        year_month: date.format("%Y-%m").to_string(),
        weekday: date.weekday().num_days_from_monday(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, date: &str, tx_type: TransactionType, amount: f64) -> TransactionRecord {
        TransactionRecord {
            id,
            date: date.to_string(),
            tx_type,
            amount,
            category: "Food".to_string(),
            payment_method: "Card".to_string(),
            memo: String::new(),
        }
    }

    #[test]
    fn test_empty_table() {
        let table = TransactionTable::build(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.expenses().count(), 0);
        assert_eq!(table.day_span(), 1);
    }

    #[test]
    fn test_derived_columns() {
        // 2024-03-04 is a Monday, 2024-03-10 a Sunday
        let table = TransactionTable::build(&[
            record(1, "2024-03-04", TransactionType::Expense, 10.0),
            record(2, "2024-03-10", TransactionType::Income, 20.0),
        ])
        .unwrap();

        let rows = table.rows();
        assert_eq!(rows[0].year_month, "2024-03");
        assert_eq!(rows[0].weekday, 0);
        assert_eq!(rows[1].weekday, 6);
        assert_eq!(table.expenses().count(), 1);
        assert_eq!(table.incomes().count(), 1);
        assert_eq!(table.day_span(), 7);
    }

    #[test]
    fn test_malformed_date_fails_build() {
        let err = TransactionTable::build(&[
            record(1, "2024-03-04", TransactionType::Expense, 10.0),
            record(7, "2024-02-30", TransactionType::Expense, 10.0),
        ])
        .unwrap_err();

        match err {
            Error::DataFormat { id, value } => {
                assert_eq!(id, 7);
                assert_eq!(value, "2024-02-30");
            }
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result =
            TransactionTable::build(&[record(1, "2024-03-04", TransactionType::Expense, -5.0)]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
