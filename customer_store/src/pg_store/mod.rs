//! PostgreSQL customer store
//!
//! This module provides the sqlx-backed implementation of `CustomerStore`.

/// Bind a JSON-typed query parameter with its native PostgreSQL type
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            serde_json::Value::String(s) => $query.bind(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

pub mod core;
pub mod store;
pub mod transaction;

pub use core::PgCustomerStore;
pub use transaction::CustomerTransaction;

/// Columns in the order `Customer::from_row` reads them
pub(crate) const CUSTOMER_COLUMNS: &str =
    "id, revision, firstname, lastname, birthdate, gender, email, address";
