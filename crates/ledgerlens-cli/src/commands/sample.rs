//! Demo data command

use anyhow::{bail, Context, Result};
use chrono::Local;
use ledgerlens_core::{sample, Database};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fill the ledger with `months` of generated transactions ending today.
///
/// A fixed `seed` reproduces the same data set.
pub fn cmd_sample(db: &Database, user_id: i64, months: u32, seed: Option<u64>) -> Result<()> {
    if months == 0 {
        bail!("--months must be at least 1");
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let today = Local::now().date_naive();
    let transactions = sample::generate(today, months, &mut rng);
    let inserted = db
        .insert_transactions(user_id, &transactions)
        .context("Failed to insert sample transactions")?;

    println!(
        "🎲 Added {} sample transactions covering the last {} month(s)",
        inserted, months
    );
    println!("   Try: ledgerlens insights");
    Ok(())
}
