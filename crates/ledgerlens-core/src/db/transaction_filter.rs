//! Transaction filter builder for constructing dynamic SQL queries
//!
//! This module provides a builder pattern for constructing WHERE clauses
//! and related SQL components for transaction queries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::TransactionType;

/// Column a transaction listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    CreatedAt,
}

impl SortField {
    fn column(&self) -> &'static str {
        match self {
            SortField::Date => "t.date",
            SortField::Amount => "t.amount",
            SortField::CreatedAt => "t.created_at",
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "created_at" | "created" => Ok(SortField::CreatedAt),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "ASC"),
            SortOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Builder for constructing transaction query filters
///
/// Shared by `list_transactions` and `count_transactions` so both see the
/// same rows. The lifetime `'query` covers borrowed filter values
/// (category names, payment method, keyword).
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'query> {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub tx_type: Option<TransactionType>,
    pub categories: Option<&'query [String]>,
    pub payment_method: Option<&'query str>,
    pub keyword: Option<&'query str>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

/// Result of building a filter - contains SQL components and parameters
pub struct FilterResult {
    /// WHERE clause including "WHERE" keyword
    pub where_clause: String,
    /// ORDER BY clause including "ORDER BY" keyword
    pub order_clause: String,
    /// Parameters for the query (boxed for rusqlite compatibility)
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl<'query> TransactionFilter<'query> {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set inclusive date range filter
    pub fn date_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.date_range = range;
        self
    }

    /// Set income/expense filter
    pub fn tx_type(mut self, tx_type: Option<TransactionType>) -> Self {
        self.tx_type = tx_type;
        self
    }

    /// Set category filter (matches any of the given names)
    pub fn categories(mut self, categories: Option<&'query [String]>) -> Self {
        self.categories = categories;
        self
    }

    /// Set payment method filter
    pub fn payment_method(mut self, method: Option<&'query str>) -> Self {
        self.payment_method = method;
        self
    }

    /// Set memo keyword filter
    pub fn keyword(mut self, keyword: Option<&'query str>) -> Self {
        self.keyword = keyword;
        self
    }

    pub fn sort_field(mut self, field: SortField) -> Self {
        self.sort_field = field;
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Build the filter components for one user
    pub fn build(&self, user_id: i64) -> FilterResult {
        let mut conditions = vec!["t.user_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        // Date range filter
        if let Some((from_date, to_date)) = self.date_range {
            conditions.push("t.date >= ? AND t.date <= ?".to_string());
            params.push(Box::new(from_date.to_string()));
            params.push(Box::new(to_date.to_string()));
        }

        if let Some(tx_type) = self.tx_type {
            conditions.push("t.type = ?".to_string());
            params.push(Box::new(tx_type.as_str()));
        }

        if let Some(categories) = self.categories {
            if !categories.is_empty() {
                let placeholders: Vec<&str> = categories.iter().map(|_| "?").collect();
                conditions.push(format!("t.category IN ({})", placeholders.join(", ")));
                for category in categories {
                    params.push(Box::new(category.clone()));
                }
            }
        }

        if let Some(method) = self.payment_method {
            if !method.trim().is_empty() {
                conditions.push("t.payment_method = ?".to_string());
                params.push(Box::new(method.trim().to_string()));
            }
        }

        // Keyword filter (memo only)
        if let Some(q) = self.keyword {
            if !q.trim().is_empty() {
                // LIKE is case-insensitive for ASCII already
                conditions.push("t.memo LIKE ? ESCAPE '\\'".to_string());
                params.push(Box::new(format!("%{}%", escape_like(q.trim()))));
            }
        }

        let where_clause = format!("WHERE {}", conditions.join(" AND "));
        let order_clause = format!(
            "ORDER BY {} {}, t.id {}",
            self.sort_field.column(),
            self.sort_order,
            self.sort_order
        );

        FilterResult {
            where_clause,
            order_clause,
            params,
        }
    }
}

impl FilterResult {
    /// Build a COUNT query
    pub fn build_count_query(&self) -> String {
        format!("SELECT COUNT(*) FROM transactions t {}", self.where_clause)
    }

    /// Get parameter references for query execution
    pub fn params_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Escape LIKE wildcards so the keyword matches literally
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_user_and_sorts_by_date_desc() {
        let result = TransactionFilter::new().build(7);
        assert_eq!(result.where_clause, "WHERE t.user_id = ?");
        assert_eq!(result.order_clause, "ORDER BY t.date DESC, t.id DESC");
        assert_eq!(result.params.len(), 1);
    }

    #[test]
    fn test_all_conditions() {
        let categories = vec!["Food".to_string(), "Transport".to_string()];
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let result = TransactionFilter::new()
            .date_range(Some((from, to)))
            .tx_type(Some(TransactionType::Expense))
            .categories(Some(categories.as_slice()))
            .payment_method(Some("Card"))
            .keyword(Some("lunch"))
            .sort_field(SortField::Amount)
            .sort_order(SortOrder::Asc)
            .build(1);

        assert!(result.where_clause.contains("t.category IN (?, ?)"));
        assert!(result.where_clause.contains("t.memo LIKE ?"));
        assert_eq!(result.order_clause, "ORDER BY t.amount ASC, t.id ASC");
        // user, from, to, type, 2 categories, method, keyword
        assert_eq!(result.params.len(), 8);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let empty: Vec<String> = vec![];
        let result = TransactionFilter::new()
            .categories(Some(&empty))
            .payment_method(Some("  "))
            .keyword(Some(""))
            .build(1);
        assert_eq!(result.params.len(), 1);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("amount".parse::<SortField>().unwrap(), SortField::Amount);
        assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert!("size".parse::<SortField>().is_err());
    }

    #[test]
    fn test_keyword_wildcards_escaped() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
        assert_eq!(escape_like("lunch"), "lunch");

        let result = TransactionFilter::new().keyword(Some("100%")).build(1);
        assert!(result.where_clause.contains("t.memo LIKE ? ESCAPE '\\'"));
    }
}
