//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of insight rules, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Largest expense category and its share
    TopCategory,
    /// Last month in the data versus the month before it
    MonthTrend,
    /// Current-month spending against budgets
    BudgetUsage,
    /// Unusually large expenses within a category
    Outliers,
    /// Similar amounts repeating roughly monthly
    Recurring,
    /// Share of income left after expenses
    SavingsRate,
}

impl Rule {
    /// Every rule, in the order the engine runs them
    pub const ALL: [Rule; 6] = [
        Rule::TopCategory,
        Rule::MonthTrend,
        Rule::BudgetUsage,
        Rule::Outliers,
        Rule::Recurring,
        Rule::SavingsRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::TopCategory => "top_category",
            Rule::MonthTrend => "month_trend",
            Rule::BudgetUsage => "budget_usage",
            Rule::Outliers => "outliers",
            Rule::Recurring => "recurring",
            Rule::SavingsRate => "savings_rate",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Rule::TopCategory => "Top Category",
            Rule::MonthTrend => "Monthly Trend",
            Rule::BudgetUsage => "Budget Usage",
            Rule::Outliers => "Unusual Expenses",
            Rule::Recurring => "Recurring Expenses",
            Rule::SavingsRate => "Savings Rate",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("Unknown insight rule: {}", s))
    }
}

/// Tone of an insight, used by presentation for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Info,
    Warning,
    Success,
    Error,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Info => "info",
            InsightKind::Warning => "warning",
            InsightKind::Success => "success",
            InsightKind::Error => "error",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(InsightKind::Info),
            "warning" => Ok(InsightKind::Warning),
            "success" => Ok(InsightKind::Success),
            "error" => Ok(InsightKind::Error),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A templated observation produced by one rule.
///
/// `message` may contain `**emphasis**` markers around key figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub icon: String,
    pub message: String,
    /// Rule that produced this insight; `None` for the empty-data notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

impl Insight {
    pub fn new(kind: InsightKind, icon: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            icon: icon.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Tag the insight with the rule that produced it
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Message with emphasis markers removed
    pub fn plain_message(&self) -> String {
        self.message.replace("**", "")
    }
}
