//! Query builder for customer queries

use crate::errors::StoreError;
use crate::query_builder::filter::{CustomerListFilter, QueryFilter};
use crate::query_builder::ordering::SortOrder;
use crate::query_builder::pagination::Pagination;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::query_builder::view::CustomerViewOptions;
use serde_json::Value;

/// Identity column, always the last sort key so pagination is deterministic
pub const ID_COLUMN: &str = "id";

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<(String, SortOrder)>,
    pub(crate) pagination: Pagination,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing query: name-prefix filter, whitelisted ordering with an id
    /// tie-breaker, and pagination
    pub fn for_listing(
        filter: &CustomerListFilter,
        options: &CustomerViewOptions,
    ) -> Result<Self, StoreError> {
        let mut builder = Self::for_count(filter);

        if let Some(field) = options.order_field()? {
            builder = builder
                .order_by(field.column(), options.sort_order())
                .order_by(ID_COLUMN, SortOrder::Asc);
        }

        builder.pagination = options.pagination();
        Ok(builder)
    }

    /// Counting query: only the filter applies
    pub fn for_count(filter: &CustomerListFilter) -> Self {
        Self::new().filters(filter.to_filters())
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.order_by.push((field.to_string(), order));
        self
    }

    pub fn build_where_clause(&self) -> (String, Vec<Value>) {
        SqlGenerator::build_where_clause(&self.conditions)
    }

    pub fn build_order_clause(&self) -> String {
        SqlGenerator::build_order_clause(&self.order_by)
    }

    pub fn build_limit_clause(&self) -> String {
        SqlGenerator::build_limit_clause(self.pagination.limit, self.pagination.offset)
    }

    /// Build complete query parts (WHERE, ORDER BY, LIMIT, Values)
    pub fn build(&self) -> (String, String, String, Vec<Value>) {
        let (where_clause, values) = self.build_where_clause();
        let order_clause = self.build_order_clause();
        let limit_clause = self.build_limit_clause();

        (where_clause, order_clause, limit_clause, values)
    }

    /// Append the built clauses to `base_sql`
    pub fn to_sql(&self, base_sql: &str) -> (String, Vec<Value>) {
        let (where_clause, order_clause, limit_clause, values) = self.build();

        let mut full_sql = String::with_capacity(
            base_sql.len() + where_clause.len() + order_clause.len() + limit_clause.len() + 3,
        );
        full_sql.push_str(base_sql);
        for clause in [&where_clause, &order_clause, &limit_clause] {
            if !clause.is_empty() {
                full_sql.push(' ');
                full_sql.push_str(clause);
            }
        }

        (full_sql, values)
    }
}
