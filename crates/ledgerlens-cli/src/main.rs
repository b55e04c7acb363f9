//! Ledgerlens CLI - Household ledger with spending insights
//!
//! Usage:
//!   ledgerlens init                          Initialize database
//!   ledgerlens add --date 2024-05-01 --type expense --amount 12000 --category Food
//!   ledgerlens insights --period last-3-months
//!   ledgerlens analyze --file records.json   Analyze a JSON export

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use ledgerlens_core::{NewTransaction, TransactionFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let user = cli.user;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, user),
        Commands::Add {
            date,
            tx_type,
            amount,
            category,
            payment_method,
            memo,
        } => {
            let db = commands::open_db(&cli.db)?;
            let tx = NewTransaction {
                date,
                tx_type,
                amount,
                category,
                payment_method,
                memo,
            };
            commands::cmd_add(&db, user, &tx)
        }
        Commands::Update {
            id,
            date,
            tx_type,
            amount,
            category,
            payment_method,
            memo,
        } => {
            let db = commands::open_db(&cli.db)?;
            let changes = commands::TransactionChanges {
                date,
                tx_type,
                amount,
                category,
                payment_method,
                memo,
            };
            commands::cmd_update(&db, user, id, changes)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, user, id)
        }
        Commands::Show { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_show(&db, user, id)
        }
        Commands::List {
            period,
            tx_type,
            category,
            payment_method,
            keyword,
            sort,
            order,
            limit,
        } => {
            let db = commands::open_db(&cli.db)?;
            let filter = TransactionFilter::new()
                .date_range(commands::resolve_period_args(&period)?)
                .tx_type(tx_type)
                .categories(Some(category.as_slice()))
                .payment_method(payment_method.as_deref())
                .keyword(keyword.as_deref())
                .sort_field(sort)
                .sort_order(order);
            commands::cmd_list(&db, user, &filter, limit)
        }
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_categories_list(&db, user, None),
                Some(CategoriesAction::List { tx_type }) => {
                    commands::cmd_categories_list(&db, user, tx_type)
                }
                Some(CategoriesAction::Add { tx_type, name }) => {
                    commands::cmd_categories_add(&db, user, tx_type, &name)
                }
                Some(CategoriesAction::Delete { tx_type, name }) => {
                    commands::cmd_categories_delete(&db, user, tx_type, &name)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_budgets_list(&db, user, None),
                Some(BudgetsAction::List { month }) => {
                    commands::cmd_budgets_list(&db, user, month.as_deref())
                }
                Some(BudgetsAction::Set {
                    month,
                    category,
                    amount,
                }) => commands::cmd_budgets_set(&db, user, &month, &category, amount),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, user, id),
            }
        }
        Commands::Summary { period, json } => {
            let db = commands::open_db(&cli.db)?;
            let range = commands::resolve_period_args(&period)?;
            commands::cmd_summary(&db, user, range, json)
        }
        Commands::Breakdown { by, period, json } => {
            let db = commands::open_db(&cli.db)?;
            let range = commands::resolve_period_args(&period)?;
            commands::cmd_breakdown(&db, user, by, range, json)
        }
        Commands::Insights { period, json } => {
            let db = commands::open_db(&cli.db)?;
            let range = commands::resolve_period_args(&period)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_insights(&db, user, range, &config, json)
        }
        Commands::Analyze {
            file,
            budgets,
            today,
            json,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_analyze(&file, budgets.as_deref(), today, &config, json)
        }
        Commands::Export { output, period } => {
            let db = commands::open_db(&cli.db)?;
            let range = commands::resolve_period_args(&period)?;
            commands::cmd_export(&db, user, &output, range)
        }
        Commands::Sample { months, seed } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_sample(&db, user, months, seed)
        }
        Commands::Reset { all, yes } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_reset(&db, user, all, yes)
        }
    }
}
