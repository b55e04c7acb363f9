//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledgerlens_core::{
    format_amount, Database, NewTransaction, TransactionFilter, TransactionRecord, TransactionType,
};

use super::truncate;

/// Fields to change on an existing transaction; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct TransactionChanges {
    pub date: Option<NaiveDate>,
    pub tx_type: Option<TransactionType>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub memo: Option<String>,
}

impl TransactionChanges {
    fn apply(self, current: &TransactionRecord) -> Result<NewTransaction> {
        let date = match self.date {
            Some(date) => date,
            None => NaiveDate::parse_from_str(&current.date, "%Y-%m-%d")
                .with_context(|| format!("Stored date {:?} is invalid", current.date))?,
        };

        Ok(NewTransaction {
            date,
            tx_type: self.tx_type.unwrap_or(current.tx_type),
            amount: self.amount.unwrap_or(current.amount),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            payment_method: self
                .payment_method
                .unwrap_or_else(|| current.payment_method.clone()),
            memo: self.memo.unwrap_or_else(|| current.memo.clone()),
        })
    }
}

fn format_signed(record: &TransactionRecord) -> String {
    match record.tx_type {
        TransactionType::Expense => format!("\x1b[31m-{}\x1b[0m", format_amount(record.amount)), // Red for expenses
        TransactionType::Income => format!("\x1b[32m+{}\x1b[0m", format_amount(record.amount)), // Green for income
    }
}

pub fn cmd_add(db: &Database, user_id: i64, tx: &NewTransaction) -> Result<()> {
    let id = db
        .insert_transaction(user_id, tx)
        .context("Failed to add transaction")?;

    println!(
        "✅ Added {} {} │ {} │ {} (id {})",
        tx.tx_type,
        format_amount(tx.amount),
        tx.date,
        tx.category,
        id
    );
    Ok(())
}

pub fn cmd_update(db: &Database, user_id: i64, id: i64, changes: TransactionChanges) -> Result<()> {
    let current = db
        .get_transaction(user_id, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let updated = changes.apply(&current)?;
    db.update_transaction(user_id, id, &updated)
        .with_context(|| format!("Failed to update transaction {}", id))?;

    println!("✅ Updated transaction {}", id);
    Ok(())
}

pub fn cmd_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    db.delete_transaction(user_id, id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;

    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}

pub fn cmd_show(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(user_id, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    println!();
    println!("📄 Transaction {}", tx.id);
    println!("   ─────────────────────────────");
    println!("   Date:           {}", tx.date);
    println!("   Type:           {}", tx.tx_type);
    println!("   Amount:         {}", format_amount(tx.amount));
    println!("   Category:       {}", tx.category);
    println!("   Payment method: {}", tx.payment_method);
    if !tx.memo.is_empty() {
        println!("   Memo:           {}", tx.memo);
    }

    Ok(())
}

pub fn cmd_list(
    db: &Database,
    user_id: i64,
    filter: &TransactionFilter<'_>,
    limit: usize,
) -> Result<()> {
    let transactions = db.list_transactions(user_id, filter)?;

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  ledgerlens add --date 2024-05-01 --type expense --amount 12000 --category Food");
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({} total)", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions.iter().take(limit) {
        println!(
            "   [{:>4}] {} │ {:>12} │ {:15} │ {:8} │ {}",
            tx.id,
            tx.date,
            format_signed(tx),
            truncate(&tx.category, 15),
            truncate(&tx.payment_method, 8),
            truncate(&tx.memo, 30)
        );
    }

    if transactions.len() > limit {
        println!();
        println!("   ... {} more (use --limit to show more)", transactions.len() - limit);
    }

    Ok(())
}
