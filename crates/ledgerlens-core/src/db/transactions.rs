//! Transaction operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::transaction_filter::TransactionFilter;
use super::Database;
use crate::error::{Error, Result};
use crate::models::{NewTransaction, TransactionRecord};

const SELECT_COLUMNS: &str =
    "SELECT t.id, t.date, t.type, t.amount, t.category, t.payment_method, t.memo FROM transactions t";

impl Database {
    /// Insert a transaction for a user, returning the new id
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, date, type, amount, category, payment_method, memo)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.date.to_string(),
                tx.tx_type.as_str(),
                tx.amount,
                tx.category,
                tx.payment_method,
                tx.memo,
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!(user_id, id, "Inserted transaction");
        Ok(id)
    }

    /// Insert many transactions in one SQLite transaction
    pub fn insert_transactions(&self, user_id: i64, txs: &[NewTransaction]) -> Result<usize> {
        for tx in txs {
            tx.validate()?;
        }

        let mut conn = self.conn()?;
        let db_tx = conn.transaction()?;
        {
            let mut stmt = db_tx.prepare(
                r#"
                INSERT INTO transactions (user_id, date, type, amount, category, payment_method, memo)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )?;
            for tx in txs {
                stmt.execute(params![
                    user_id,
                    tx.date.to_string(),
                    tx.tx_type.as_str(),
                    tx.amount,
                    tx.category,
                    tx.payment_method,
                    tx.memo,
                ])?;
            }
        }
        db_tx.commit()?;

        info!(user_id, count = txs.len(), "Inserted transactions");
        Ok(txs.len())
    }

    /// Replace every field of an existing transaction
    ///
    /// Fails with `NotFound` when the id does not belong to the user.
    pub fn update_transaction(&self, user_id: i64, id: i64, tx: &NewTransaction) -> Result<()> {
        tx.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE transactions
            SET date = ?, type = ?, amount = ?, category = ?, payment_method = ?, memo = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                tx.date.to_string(),
                tx.tx_type.as_str(),
                tx.amount,
                tx.category,
                tx.payment_method,
                tx.memo,
                id,
                user_id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }

        info!(user_id, id, "Updated transaction");
        Ok(())
    }

    /// Delete a transaction owned by the user
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }

        info!(user_id, id, "Deleted transaction");
        Ok(())
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<TransactionRecord>> {
        let conn = self.conn()?;
        let sql = format!("{} WHERE t.id = ? AND t.user_id = ?", SELECT_COLUMNS);

        let record = conn
            .query_row(&sql, params![id, user_id], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    /// List a user's transactions matching the filter
    pub fn list_transactions(
        &self,
        user_id: i64,
        filter: &TransactionFilter<'_>,
    ) -> Result<Vec<TransactionRecord>> {
        let conn = self.conn()?;
        let filter = filter.build(user_id);

        let sql = format!(
            "{} {} {}",
            SELECT_COLUMNS, filter.where_clause, filter.order_clause
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(filter.params_refs().as_slice(), Self::row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count a user's transactions matching the filter
    pub fn count_transactions(&self, user_id: i64, filter: &TransactionFilter<'_>) -> Result<i64> {
        let conn = self.conn()?;
        let filter = filter.build(user_id);

        let count: i64 = conn.query_row(
            &filter.build_count_query(),
            filter.params_refs().as_slice(),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub(crate) fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<TransactionRecord> {
        let type_str: String = row.get(2)?;
        let tx_type = type_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(Error::InvalidData(e)),
            )
        })?;

        Ok(TransactionRecord {
            id: row.get(0)?,
            date: row.get(1)?,
            tx_type,
            amount: row.get(3)?,
            category: row.get(4)?,
            payment_method: row.get(5)?,
            memo: row.get(6)?,
        })
    }
}
