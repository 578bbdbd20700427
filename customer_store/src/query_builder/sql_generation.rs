//! SQL fragment generation

use crate::query_builder::filter::{QueryFilter, QueryOperator};
use crate::query_builder::ordering::SortOrder;
use serde_json::Value;

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from conditions, numbering parameters from `$1`
    pub fn build_where_clause(conditions: &[QueryFilter]) -> (String, Vec<Value>) {
        if conditions.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut values = Vec::with_capacity(conditions.len());
        let conditions_sql = conditions
            .iter()
            .map(|condition| Self::build_condition_sql(condition, &mut values))
            .collect::<Vec<_>>()
            .join(" AND ");

        (format!("WHERE {}", conditions_sql), values)
    }

    fn build_condition_sql(condition: &QueryFilter, values: &mut Vec<Value>) -> String {
        values.push(condition.value.clone());
        let param = values.len();

        match condition.operator {
            QueryOperator::Eq => format!("{} = ${}", condition.field, param),
            QueryOperator::ILike => format!("{} ILIKE ${}", condition.field, param),
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(order_by: &[(String, SortOrder)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(field, order)| format!("{} {}", field, order.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT/OFFSET clause
    ///
    /// PostgreSQL takes `bigint` here, so values are capped at `i64::MAX`.
    pub fn build_limit_clause(limit: Option<u64>, offset: Option<u64>) -> String {
        let mut clauses = Vec::with_capacity(2);

        if let Some(limit) = limit {
            clauses.push(format!("LIMIT {}", Self::bigint(limit)));
        }

        if let Some(offset) = offset {
            clauses.push(format!("OFFSET {}", Self::bigint(offset)));
        }

        clauses.join(" ")
    }

    fn bigint(value: u64) -> i64 {
        i64::try_from(value).unwrap_or(i64::MAX)
    }
}
