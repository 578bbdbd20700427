//! Convenience re-exports for common customer-store usage

// Entity and field types
pub use crate::customer::{Customer, Gender};

// Store contract and implementations
pub use crate::memory_store::MemoryCustomerStore;
pub use crate::pg_store::PgCustomerStore;
pub use crate::traits::CustomerStore;

// Error types
pub use crate::errors::StoreError;
pub use crate::validation::{FieldError, ValidationErrors};

// Validation
pub use crate::validation::{validate, validate_at};

// Listing
pub use crate::query_builder::{CustomerListFilter, CustomerViewOptions, OrderField, SortOrder};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use chrono::NaiveDate;
pub use sqlx::PgPool;
