//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ledgerlens_core::{SortField, SortOrder, TransactionType};

/// Ledgerlens - See where your money goes
#[derive(Parser)]
#[command(name = "ledgerlens")]
#[command(about = "Household ledger with spending analytics and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "LEDGERLENS_DB", default_value = "ledgerlens.db", global = true)]
    pub db: PathBuf,

    /// User whose ledger to work on
    #[arg(long, env = "LEDGERLENS_USER", default_value_t = 1, global = true)]
    pub user: i64,

    /// Insight threshold config (defaults to ~/.config/ledgerlens/insights.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed default categories
    Init,

    /// Record a transaction
    Add {
        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// income or expense
        #[arg(long = "type")]
        tx_type: TransactionType,

        /// Amount (always positive; the type carries the direction)
        #[arg(long)]
        amount: f64,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "Card")]
        payment_method: String,

        #[arg(long, default_value = "")]
        memo: String,
    },

    /// Change fields of an existing transaction
    Update {
        /// Transaction ID
        id: i64,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long = "type")]
        tx_type: Option<TransactionType>,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        payment_method: Option<String>,

        #[arg(long)]
        memo: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },

    /// Show one transaction
    Show {
        /// Transaction ID
        id: i64,
    },

    /// List transactions
    List {
        #[command(flatten)]
        period: PeriodArgs,

        /// Only income or only expense
        #[arg(long = "type")]
        tx_type: Option<TransactionType>,

        /// Category filter (repeatable)
        #[arg(long)]
        category: Vec<String>,

        #[arg(long)]
        payment_method: Option<String>,

        /// Search memos
        #[arg(long)]
        keyword: Option<String>,

        /// Sort by: date, amount, created_at
        #[arg(long, default_value = "date")]
        sort: SortField,

        /// Sort order: asc or desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,

        /// Maximum rows to print
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage monthly budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Income, expense and savings for a period
    Summary {
        #[command(flatten)]
        period: PeriodArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Expense breakdown for a period
    Breakdown {
        /// Group by
        #[arg(long, value_enum, default_value = "category")]
        by: BreakdownKind,

        #[command(flatten)]
        period: PeriodArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate insights for a period
    Insights {
        #[command(flatten)]
        period: PeriodArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Analyze a JSON file of transaction records without touching the database
    Analyze {
        /// JSON array of transaction records
        #[arg(short, long)]
        file: PathBuf,

        /// JSON array of budgets
        #[arg(long)]
        budgets: Option<PathBuf>,

        /// Reference date for budget checks (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export transactions to CSV
    Export {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Insert demo transactions for recent months
    Sample {
        /// Number of months to generate, ending with the current month
        #[arg(long, default_value = "3")]
        months: u32,

        /// RNG seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Delete transactions (or, with --all, every piece of user data)
    Reset {
        /// Also delete budgets and custom categories
        #[arg(long)]
        all: bool,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Reporting period shared by the read commands
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Time period: this-month, last-month, last-3-months, this-year, all
    #[arg(long, default_value = "all")]
    pub period: String,

    /// Custom start date (YYYY-MM-DD) - overrides period
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Custom end date (YYYY-MM-DD) - overrides period
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List {
        /// Only income or only expense
        #[arg(long = "type")]
        tx_type: Option<TransactionType>,
    },

    /// Add a category
    Add {
        /// income or expense
        #[arg(long = "type")]
        tx_type: TransactionType,

        name: String,
    },

    /// Delete a category
    Delete {
        /// income or expense
        #[arg(long = "type")]
        tx_type: TransactionType,

        name: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List {
        /// Only this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },

    /// Set (or replace) a budget
    Set {
        /// Month (YYYY-MM)
        #[arg(long)]
        month: String,

        /// Category (omit for an overall budget)
        #[arg(long, default_value = "")]
        category: String,

        #[arg(long)]
        amount: f64,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BreakdownKind {
    Category,
    Date,
    Payment,
    Weekday,
    Month,
}
