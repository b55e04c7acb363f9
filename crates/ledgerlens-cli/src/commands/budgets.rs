//! Budget command implementations

use anyhow::{Context, Result};
use ledgerlens_core::{format_amount, Database};

pub fn cmd_budgets_list(db: &Database, user_id: i64, month: Option<&str>) -> Result<()> {
    let budgets = db.list_budgets(user_id, month)?;

    if budgets.is_empty() {
        println!("No budgets set. Add one with:");
        println!("  ledgerlens budgets set --month 2024-05 --amount 500000");
        return Ok(());
    }

    println!();
    println!("💵 Budgets");
    println!("   ─────────────────────────────────────────");

    for budget in &budgets {
        let scope = if budget.is_overall() {
            "(overall)"
        } else {
            budget.category.as_str()
        };
        println!(
            "   [{:>3}] {} │ {:20} │ {:>12}",
            budget.id,
            budget.month,
            scope,
            format_amount(budget.budget_amount)
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    user_id: i64,
    month: &str,
    category: &str,
    amount: f64,
) -> Result<()> {
    let id = db
        .set_budget(user_id, month, category, amount)
        .context("Failed to set budget")?;

    let scope = if category.trim().is_empty() {
        "Overall".to_string()
    } else {
        format!("'{}'", category.trim())
    };
    println!(
        "✅ {} budget for {} set to {} (id {})",
        scope,
        month,
        format_amount(amount),
        id
    );
    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    db.delete_budget(user_id, id)
        .with_context(|| format!("Failed to delete budget {}", id))?;

    println!("🗑️  Deleted budget {}", id);
    Ok(())
}
