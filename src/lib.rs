//! # Customers
//!
//! Customer persistence for PostgreSQL: validated writes, prefix-filtered and
//! sorted listing with pagination, and optimistic concurrency control on
//! updates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use customers::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "customers".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 10, 30, 600, 3600,
//!     );
//!
//!     // Creates the database and schema on first use
//!     let customers = Customers::prepare(config).await?;
//!     let manager = customers.manager();
//!
//!     let created = manager.create(customers::testing::random_customer()).await?;
//!
//!     let mut edit = created.clone();
//!     edit.address = "12 Harbour Road".to_string();
//!     match manager.update(edit).await {
//!         Ok(updated) => println!("revision {}", updated.revision),
//!         Err(e) if e.is_retryable() => println!("changed concurrently, refetch and retry"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     let page = manager
//!         .list(
//!             &CustomerListFilter::new().last_name("Smi"),
//!             &CustomerViewOptions::new().order_by("birthdate", true).page(0, 20),
//!         )
//!         .await?;
//!     println!("{} customers on the first page", page.len());
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod manager;
pub mod migration;
pub mod prelude;
pub mod testing;

// Re-export the main public types for convenience
pub use core::Customers;
pub use errors::CustomersError;
pub use manager::CustomerManager;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export the store crate used by the public API
pub use customer_store;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
