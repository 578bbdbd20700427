//! Convenience re-exports for common customers usage
//!
//! # Example
//!
//! ```rust
//! use customers::prelude::*;
//!
//! let filter = CustomerListFilter::new().first_name("Jo");
//! assert!(!filter.is_empty());
//! ```

// Core components
pub use crate::core::Customers;
pub use crate::errors::CustomersError;
pub use crate::manager::CustomerManager;
pub use crate::migration;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export commonly used customer-store types
pub use customer_store::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;
