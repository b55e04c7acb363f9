//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Insight threshold resolution
//! - `cmd_init` - Initialize the database
//! - `cmd_reset` - Clear a user's data

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use ledgerlens_core::{Database, InsightConfig};

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

/// Load insight thresholds from `--config`, the user override, or the built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<InsightConfig> {
    InsightConfig::load(path).context("Failed to load insight config")
}

pub fn cmd_init(db_path: &Path, user_id: i64) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;

    let added = db
        .seed_default_categories(user_id)
        .context("Failed to seed default categories")?;
    println!("   Seeded {} default categories for user {}", added, user_id);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: ledgerlens add --date 2024-05-01 --type expense --amount 12000 --category Food");
    println!("  2. Or load demo data:    ledgerlens sample --months 3");
    println!("  3. See insights:         ledgerlens insights");

    Ok(())
}

/// Clear transactions, or with `all` every piece of the user's data
pub fn cmd_reset(db: &Database, user_id: i64, all: bool, yes: bool) -> Result<()> {
    if !yes {
        if all {
            print!("⚠️  This will delete all transactions, budgets and custom categories.\n");
            print!("   Default categories will be restored.\n\n");
        } else {
            print!("⚠️  This will delete all transactions.\n");
            print!("   Categories and budgets will be preserved.\n\n");
        }
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if all {
        db.clear_everything(user_id)
            .context("Failed to clear user data")?;
        println!("✅ All data cleared. Default categories restored.");
    } else {
        let deleted = db
            .clear_transactions(user_id)
            .context("Failed to clear transactions")?;
        println!("✅ Deleted {} transactions.", deleted);
    }

    Ok(())
}
