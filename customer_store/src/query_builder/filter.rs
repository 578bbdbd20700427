//! Filter conditions
//!
//! Conditions are joined with AND by the SQL generator.

use crate::customer::Customer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query condition operators
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOperator {
    Eq,    // =
    ILike, // ILIKE (case insensitive)
}

/// Single condition in WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    pub field: String,
    pub operator: QueryOperator,
    pub value: Value,
}

impl QueryFilter {
    pub fn condition(field: &str, operator: QueryOperator, value: Value) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value,
        }
    }

    /// Equal condition
    pub fn eq(field: &str, value: Value) -> Self {
        Self::condition(field, QueryOperator::Eq, value)
    }

    /// ILIKE condition with a raw pattern
    pub fn ilike(field: &str, pattern: &str) -> Self {
        Self::condition(field, QueryOperator::ILike, Value::String(pattern.to_string()))
    }

    /// Case-insensitive starts-with match; `prefix` is matched literally
    pub fn ilike_prefix(field: &str, prefix: &str) -> Self {
        Self::ilike(field, &format!("{}%", escape_like(prefix)))
    }
}

/// Escape LIKE metacharacters using the default backslash escape
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Name-prefix filter for customer listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerListFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CustomerListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, prefix: impl Into<String>) -> Self {
        self.first_name = Some(prefix.into());
        self
    }

    pub fn last_name(mut self, prefix: impl Into<String>) -> Self {
        self.last_name = Some(prefix.into());
        self
    }

    fn first_name_prefix(&self) -> Option<&str> {
        self.first_name.as_deref().filter(|p| !p.is_empty())
    }

    fn last_name_prefix(&self) -> Option<&str> {
        self.last_name.as_deref().filter(|p| !p.is_empty())
    }

    /// No non-empty prefix set
    pub fn is_empty(&self) -> bool {
        self.first_name_prefix().is_none() && self.last_name_prefix().is_none()
    }

    /// One ILIKE prefix condition per non-empty field
    pub fn to_filters(&self) -> Vec<QueryFilter> {
        let mut filters = Vec::with_capacity(2);
        if let Some(prefix) = self.first_name_prefix() {
            filters.push(QueryFilter::ilike_prefix("firstname", prefix));
        }
        if let Some(prefix) = self.last_name_prefix() {
            filters.push(QueryFilter::ilike_prefix("lastname", prefix));
        }
        filters
    }

    /// In-process equivalent of the generated WHERE clause
    pub fn matches(&self, customer: &Customer) -> bool {
        let starts_with = |value: &str, prefix: &str| {
            value.to_lowercase().starts_with(&prefix.to_lowercase())
        };

        self.first_name_prefix()
            .map_or(true, |prefix| starts_with(&customer.first_name, prefix))
            && self
                .last_name_prefix()
                .map_or(true, |prefix| starts_with(&customer.last_name, prefix))
    }
}
