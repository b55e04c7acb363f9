//! CSV export command

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledgerlens_core::Database;

pub fn cmd_export(
    db: &Database,
    user_id: i64,
    output: &Path,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let count = db
        .export_transactions_csv(user_id, range, BufWriter::new(file))
        .context("Failed to export transactions")?;

    println!("📤 Exported {} transactions to {}", count, output.display());
    Ok(())
}
