//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, reset) and shared utilities (open_db, load_config)
//! - `transactions` - Transaction CRUD and listing
//! - `categories` - Category management
//! - `budgets` - Budget management
//! - `reports` - Summary, breakdowns, insights and file analysis
//! - `export` - CSV export
//! - `sample` - Demo data

pub mod budgets;
pub mod categories;
pub mod core;
pub mod export;
pub mod reports;
pub mod sample;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use categories::*;
pub use self::core::*;
pub use export::*;
pub use reports::*;
pub use sample::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Turn `**emphasis**` markers into bold terminal text
pub fn render_emphasis(message: &str) -> String {
    message
        .split("**")
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("\x1b[1m{}\x1b[0m", part)
            } else {
                part.to_string()
            }
        })
        .collect()
}
