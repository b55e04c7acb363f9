//! Budget operations

use rusqlite::params;
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{validate_month, Budget};

impl Database {
    /// Create or replace the budget for `(user, month, category)`.
    ///
    /// An empty `category` sets the overall budget for the month.
    pub fn set_budget(&self, user_id: i64, month: &str, category: &str, amount: f64) -> Result<i64> {
        validate_month(month)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget amount must be positive, got {}",
                amount
            )));
        }

        let category = category.trim();
        let conn = self.conn()?;
        let id: i64 = conn.query_row(
            r#"
            INSERT INTO budgets (user_id, month, category, budget_amount)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id, month, category) DO UPDATE SET budget_amount = excluded.budget_amount
            RETURNING id
            "#,
            params![user_id, month, category, amount],
            |row| row.get(0),
        )?;

        info!(user_id, month, category, amount, "Set budget");
        Ok(id)
    }

    /// List budgets, newest month first, optionally for a single month
    pub fn list_budgets(&self, user_id: i64, month: Option<&str>) -> Result<Vec<Budget>> {
        let conn = self.conn()?;

        let map_row = |row: &rusqlite::Row| -> rusqlite::Result<Budget> {
            Ok(Budget {
                id: row.get(0)?,
                month: row.get(1)?,
                category: row.get(2)?,
                budget_amount: row.get(3)?,
            })
        };

        let budgets = match month {
            Some(month) => {
                validate_month(month)?;
                let mut stmt = conn.prepare(
                    "SELECT id, month, category, budget_amount FROM budgets
                     WHERE user_id = ? AND month = ? ORDER BY category, id",
                )?;
                let rows = stmt.query_map(params![user_id, month], map_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, month, category, budget_amount FROM budgets
                     WHERE user_id = ? ORDER BY month DESC, category, id",
                )?;
                let rows = stmt.query_map(params![user_id], map_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        Ok(budgets)
    }

    pub fn delete_budget(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Budget {}", id)));
        }

        info!(user_id, id, "Deleted budget");
        Ok(())
    }
}
