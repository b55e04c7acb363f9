//! CSV export of transaction history

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{Database, SortField, SortOrder, TransactionFilter};
use crate::error::Result;
use crate::models::TransactionRecord;

/// One exported line. Field order is the CSV column order.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: &'a str,
    #[serde(rename = "type")]
    tx_type: &'static str,
    amount: f64,
    category: &'a str,
    payment_method: &'a str,
    memo: &'a str,
}

/// Write records as CSV with a header row, in the order given
pub fn write_transactions_csv<W: Write>(records: &[TransactionRecord], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);

    for record in records {
        csv.serialize(CsvRow {
            date: &record.date,
            tx_type: record.tx_type.as_str(),
            amount: record.amount,
            category: &record.category,
            payment_method: &record.payment_method,
            memo: &record.memo,
        })?;
    }

    // An empty export still gets a header
    if records.is_empty() {
        csv.write_record([
            "date",
            "type",
            "amount",
            "category",
            "payment_method",
            "memo",
        ])?;
    }

    csv.flush()?;
    Ok(records.len())
}

impl Database {
    /// Export a user's transactions, oldest first, optionally within a date range
    pub fn export_transactions_csv<W: Write>(
        &self,
        user_id: i64,
        date_range: Option<(NaiveDate, NaiveDate)>,
        writer: W,
    ) -> Result<usize> {
        let filter = TransactionFilter::new()
            .date_range(date_range)
            .sort_field(SortField::Date)
            .sort_order(SortOrder::Asc);
        let records = self.list_transactions(user_id, &filter)?;

        let count = write_transactions_csv(&records, writer)?;
        tracing::info!(user_id, count, "Exported transactions");
        Ok(count)
    }
}
