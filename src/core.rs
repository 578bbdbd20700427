//! Core customers functionality
//!
//! This module contains the `Customers` coordinator: it owns the connection
//! pool and hands out stores and managers configured from `DatabaseConfig`.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

use crate::errors::CustomersError;
use crate::manager::CustomerManager;
use config::{AppConfig, DatabaseConfig};
use customer_store::PgCustomerStore;

/// Main coordinator that manages the database connection
pub struct Customers {
    pool: PgPool,
    config: DatabaseConfig,
}

impl Customers {
    /// Connect to an existing, already-migrated database
    pub async fn connect(config: DatabaseConfig) -> Result<Self, CustomersError> {
        config.validate()?;
        let pool = pool_options(&config)
            .connect_with(connect_options(&config, &config.database))
            .await?;

        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "connected to customer database"
        );
        Ok(Self { pool, config })
    }

    /// Create the database if needed, apply the schema and connect
    pub async fn prepare(config: DatabaseConfig) -> Result<Self, CustomersError> {
        let pool = crate::migration::prepare_database(&config).await?;
        Ok(Self { pool, config })
    }

    /// Connect using `AppConfig::load()`
    pub async fn from_env() -> Result<Self, CustomersError> {
        let app_config = AppConfig::load()?;
        Self::connect(app_config.database).await
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// PostgreSQL store sharing this pool, with the configured operation deadline
    pub fn store(&self) -> PgCustomerStore {
        PgCustomerStore::new(self.pool.clone())
            .with_operation_timeout(Duration::from_secs(self.config.operation_timeout_seconds))
    }

    /// Validating manager over [`Customers::store`]
    pub fn manager(&self) -> CustomerManager<PgCustomerStore> {
        CustomerManager::new(self.store())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), CustomersError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Pool options derived from the configured limits
pub(crate) fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let mut pool_options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    // Set max lifetime if specified
    if config.max_lifetime_seconds > 0 {
        pool_options = pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
    }

    pool_options
}

/// Connection settings for `database` on the configured server.
///
/// Credentials are passed as-is, never through a URL.
pub(crate) fn connect_options(config: &DatabaseConfig, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_keep_reserved_characters() {
        let mut config = DatabaseConfig::from_url("postgres://u:p@db:5433/customers").unwrap();
        config.username = "app@svc".to_string();
        config.password = "p@ss/w".to_string();

        let options = connect_options(&config, &config.database);
        assert_eq!(options.get_host(), "db");
        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_username(), "app@svc");
        assert_eq!(options.get_database(), Some("customers"));
    }

    #[test]
    fn test_connect_options_for_maintenance_database() {
        let config = DatabaseConfig::from_url("postgres://u:p@db/customers").unwrap();
        let options = connect_options(&config, config::MAINTENANCE_DATABASE);
        assert_eq!(options.get_database(), Some("postgres"));
        assert_eq!(options.get_port(), 5432);
    }
}
