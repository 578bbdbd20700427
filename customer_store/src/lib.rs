//! Customer Store - persistence and concurrency-control layer for customers
//!
//! This crate provides the customer model, its validation rules, the
//! filter/sort/pagination query builder and the `CustomerStore` trait with a
//! PostgreSQL implementation and an in-memory one.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod customer;
pub mod errors;
pub mod identifier;
pub mod memory_store;
pub mod pg_store;
pub mod prelude;
pub mod query_builder;
pub mod traits;
pub mod validation;


pub use customer::{Customer, Gender};
pub use errors::StoreError;
pub use identifier::{IdentifierError, ValidatedIdentifier};
pub use memory_store::MemoryCustomerStore;
pub use pg_store::{CustomerTransaction, PgCustomerStore};
pub use query_builder::{CustomerListFilter, CustomerViewOptions, OrderField, QueryBuilder, SortOrder};
pub use traits::CustomerStore;
pub use validation::{FieldError, ValidationErrors};

use sqlx::PgPool;

pub type DbPool = PgPool;

/// Name of the table holding customer rows
pub const CUSTOMER_TABLE: &str = "customers";
