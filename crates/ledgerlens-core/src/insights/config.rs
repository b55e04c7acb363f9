//! Insight thresholds
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the user override (~/.config/ledgerlens/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../../config/insights.toml");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub trend: TrendConfig,
    pub budget: BudgetConfig,
    pub outliers: OutlierConfig,
    pub recurring: RecurringConfig,
    pub savings: SavingsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub increase_pct: f64,
    pub decrease_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            increase_pct: 20.0,
            decrease_pct: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub warn_pct: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self { warn_pct: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// Minimum expense records overall before the rule runs
    pub min_expenses: usize,
    /// Minimum records a category needs to have a meaningful spread
    pub min_category_records: usize,
    pub stddev_multiplier: f64,
    /// Flagged amounts must also be at least this multiple of the category mean
    pub min_mean_ratio: f64,
    pub limit: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            min_expenses: 5,
            min_category_records: 3,
            stddev_multiplier: 2.0,
            min_mean_ratio: 2.0,
            limit: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringConfig {
    pub min_expenses: usize,
    /// How many later records each record is compared with
    pub lookahead: usize,
    /// Allowed relative amount difference (0.2 = 20%)
    pub amount_tolerance: f64,
    pub min_gap_days: i64,
    pub max_gap_days: i64,
    pub amount_bucket: f64,
    pub limit: usize,
}

impl Default for RecurringConfig {
    fn default() -> Self {
        Self {
            min_expenses: 4,
            lookahead: 4,
            amount_tolerance: 0.2,
            min_gap_days: 25,
            max_gap_days: 35,
            amount_bucket: 1000.0,
            limit: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsConfig {
    pub target_pct: f64,
    pub floor_pct: f64,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            target_pct: 30.0,
            floor_pct: 10.0,
        }
    }
}

impl InsightConfig {
    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: InsightConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config.
    ///
    /// An explicit path must exist. Without one, the user override under the
    /// config dir is used when present, else the embedded defaults.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading insight config");
                fs::read_to_string(path)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    tracing::debug!(path = %path.display(), "Loading insight config override");
                    fs::read_to_string(&path)?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.recurring.amount_bucket <= 0.0 {
            return Err(Error::InvalidData(
                "recurring.amount_bucket must be positive".to_string(),
            ));
        }
        if self.recurring.min_gap_days > self.recurring.max_gap_days {
            return Err(Error::InvalidData(
                "recurring.min_gap_days must not exceed recurring.max_gap_days".to_string(),
            ));
        }
        if self.savings.floor_pct > self.savings.target_pct {
            return Err(Error::InvalidData(
                "savings.floor_pct must not exceed savings.target_pct".to_string(),
            ));
        }
        Ok(())
    }
}

/// Location of the per-user config override
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ledgerlens").join("insights.toml"))
}
