//! Error types for the customers crate
//!
//! This module contains the errors returned while connecting to and preparing
//! the customer database.

use config::ConfigError;
use customer_store::{IdentifierError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CustomersError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(#[from] IdentifierError),
}
