//! Category command implementations

use anyhow::{Context, Result};
use ledgerlens_core::{Database, TransactionType};

pub fn cmd_categories_list(
    db: &Database,
    user_id: i64,
    tx_type: Option<TransactionType>,
) -> Result<()> {
    let categories = db.list_categories(user_id, tx_type)?;

    if categories.is_empty() {
        println!("No categories yet. Run 'ledgerlens init' to create the defaults.");
        return Ok(());
    }

    for kind in [TransactionType::Expense, TransactionType::Income] {
        let names: Vec<&str> = categories
            .iter()
            .filter(|c| c.tx_type == kind)
            .map(|c| c.name.as_str())
            .collect();
        if names.is_empty() {
            continue;
        }

        println!();
        println!("🏷️  {} categories", kind);
        for name in names {
            println!("   {}", name);
        }
    }

    Ok(())
}

pub fn cmd_categories_add(
    db: &Database,
    user_id: i64,
    tx_type: TransactionType,
    name: &str,
) -> Result<()> {
    let added = db
        .add_category(user_id, tx_type, name)
        .context("Failed to add category")?;

    if added {
        println!("✅ Added {} category '{}'", tx_type, name.trim());
    } else {
        println!("Category '{}' already exists.", name.trim());
    }
    Ok(())
}

pub fn cmd_categories_delete(
    db: &Database,
    user_id: i64,
    tx_type: TransactionType,
    name: &str,
) -> Result<()> {
    db.delete_category(user_id, tx_type, name)
        .with_context(|| format!("Failed to delete category '{}'", name))?;

    println!("🗑️  Deleted {} category '{}'", tx_type, name);
    println!("   Existing transactions keep their category label.");
    Ok(())
}
