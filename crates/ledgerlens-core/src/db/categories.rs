//! Category operations

use rusqlite::params;
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{
    Category, TransactionType, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES,
};

impl Database {
    /// Insert the default income and expense categories for a user.
    ///
    /// Idempotent: existing names are left alone. Returns how many were added.
    pub fn seed_default_categories(&self, user_id: i64) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO categories (user_id, type, name) VALUES (?, ?, ?)",
            )?;
            let defaults = DEFAULT_EXPENSE_CATEGORIES
                .iter()
                .map(|name| (TransactionType::Expense, name))
                .chain(
                    DEFAULT_INCOME_CATEGORIES
                        .iter()
                        .map(|name| (TransactionType::Income, name)),
                );
            for (tx_type, name) in defaults {
                added += stmt.execute(params![user_id, tx_type.as_str(), name])?;
            }
        }
        tx.commit()?;

        if added > 0 {
            info!(user_id, added, "Seeded default categories");
        }
        Ok(added)
    }

    /// List categories in creation order, optionally for one type
    pub fn list_categories(
        &self,
        user_id: i64,
        tx_type: Option<TransactionType>,
    ) -> Result<Vec<Category>> {
        let conn = self.conn()?;

        let mut sql =
            String::from("SELECT id, type, name FROM categories WHERE user_id = ?");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];
        if let Some(tx_type) = tx_type {
            sql.push_str(" AND type = ?");
            params.push(Box::new(tx_type.as_str()));
        }
        sql.push_str(" ORDER BY type, id");

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let categories = stmt
            .query_map(params_refs.as_slice(), |row| {
                let type_str: String = row.get(1)?;
                Ok((row.get::<_, i64>(0)?, type_str, row.get::<_, String>(2)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        categories
            .into_iter()
            .map(|(id, type_str, name)| {
                Ok(Category {
                    id,
                    tx_type: type_str.parse().map_err(Error::InvalidData)?,
                    name,
                })
            })
            .collect()
    }

    /// Add a category. Returns `false` if the user already has it.
    pub fn add_category(&self, user_id: i64, tx_type: TransactionType, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name must not be empty".to_string()));
        }

        let conn = self.conn()?;
        let added = conn.execute(
            "INSERT OR IGNORE INTO categories (user_id, type, name) VALUES (?, ?, ?)",
            params![user_id, tx_type.as_str(), name],
        )?;

        if added > 0 {
            info!(user_id, name, "Added category");
        }
        Ok(added > 0)
    }

    /// Delete a category by name. Existing transactions keep their label.
    pub fn delete_category(&self, user_id: i64, tx_type: TransactionType, name: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM categories WHERE user_id = ? AND type = ? AND name = ?",
            params![user_id, tx_type.as_str(), name],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Category {} ({})", name, tx_type)));
        }

        info!(user_id, name, "Deleted category");
        Ok(())
    }
}
