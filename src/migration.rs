//! Database preparation and schema migration
//!
//! Creates the customer database on first use and applies the `customers`
//! table with its indexes. Every statement is idempotent, so migrating an
//! existing database is a no-op.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use crate::core::{Customers, connect_options, pool_options};
use crate::errors::CustomersError;
use config::DatabaseConfig;
use customer_store::ValidatedIdentifier;

/// Table definition; gender is restricted to the persisted values
pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS customers (
    id SERIAL PRIMARY KEY,
    revision BIGINT NOT NULL DEFAULT 1,
    firstname VARCHAR(100) NOT NULL,
    lastname VARCHAR(100) NOT NULL,
    birthdate DATE NOT NULL,
    gender VARCHAR(6) NOT NULL CHECK (gender IN ('Male', 'Female')),
    email VARCHAR(254) NOT NULL,
    address VARCHAR(200) NOT NULL
)";

/// One index per sortable and filterable column
pub const CREATE_INDEXES_SQL: [&str; 6] = [
    "CREATE INDEX IF NOT EXISTS customers_firstname_idx ON customers (firstname)",
    "CREATE INDEX IF NOT EXISTS customers_lastname_idx ON customers (lastname)",
    "CREATE INDEX IF NOT EXISTS customers_birthdate_idx ON customers (birthdate)",
    "CREATE INDEX IF NOT EXISTS customers_gender_idx ON customers (gender)",
    "CREATE INDEX IF NOT EXISTS customers_email_idx ON customers (email)",
    "CREATE INDEX IF NOT EXISTS customers_address_idx ON customers (address)",
];

impl Customers {
    /// Apply the schema to the connected database
    pub async fn migrate(&self) -> Result<(), CustomersError> {
        apply_schema(self.pool()).await
    }
}

/// Create the `customers` table and its indexes
pub async fn apply_schema(pool: &PgPool) -> Result<(), CustomersError> {
    tracing::info!("creating customers table");
    customer_store::debug_log!("Creating table with SQL: {}", CREATE_TABLE_SQL);
    sqlx::query(CREATE_TABLE_SQL).execute(pool).await?;

    for index_sql in CREATE_INDEXES_SQL {
        customer_store::debug_log!("Creating index with SQL: {}", index_sql);
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}

/// Make sure the configured database exists and carries the schema.
///
/// Returns a pool connected to the target database. A database created by this
/// call is dropped again if the schema cannot be applied.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<PgPool, CustomersError> {
    config.validate()?;
    let name = ValidatedIdentifier::new(&config.database)?;

    let server = connect_server(config).await?;
    let created = match database_exists(&server, name.as_str()).await {
        Ok(true) => false,
        Ok(false) => {
            tracing::info!(database = name.as_str(), "database doesn't exist, creating");
            let create_sql = format!("CREATE DATABASE \"{}\"", name.as_str());
            if let Err(e) = sqlx::query(&create_sql).execute(&server).await {
                server.close().await;
                return Err(e.into());
            }
            true
        }
        Err(e) => {
            server.close().await;
            return Err(e.into());
        }
    };

    let prepared = match pool_options(config)
        .connect_with(connect_options(config, &config.database))
        .await
    {
        Ok(pool) => match apply_schema(&pool).await {
            Ok(()) => Ok(pool),
            Err(e) => {
                pool.close().await;
                Err(e)
            }
        },
        Err(e) => Err(e.into()),
    };

    if prepared.is_err() && created {
        let drop_sql = format!("DROP DATABASE IF EXISTS \"{}\"", name.as_str());
        if let Err(e) = sqlx::query(&drop_sql).execute(&server).await {
            tracing::warn!(database = name.as_str(), error = %e, "rollback of database creation failed");
        }
    }
    server.close().await;

    if prepared.is_ok() {
        tracing::info!(database = name.as_str(), created, "customer database ready");
    }
    prepared
}

/// Remove database `name` from the server described by `config`
pub async fn drop_database(config: &DatabaseConfig, name: &str) -> Result<(), CustomersError> {
    let name = ValidatedIdentifier::new(name)?;
    let server = connect_server(config).await?;

    tracing::info!(database = name.as_str(), "dropping database");
    let drop_sql = format!("DROP DATABASE IF EXISTS \"{}\"", name.as_str());
    let result = sqlx::query(&drop_sql).execute(&server).await;
    server.close().await;

    result?;
    Ok(())
}

async fn connect_server(config: &DatabaseConfig) -> Result<PgPool, CustomersError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .connect_with(connect_options(config, config::MAINTENANCE_DATABASE))
        .await?;
    Ok(pool)
}

async fn database_exists(server: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    let found = sqlx::query_scalar::<_, i32>("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(name)
        .fetch_optional(server)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use customer_store::IdentifierError;

    #[tokio::test]
    async fn test_drop_database_rejects_bad_name_before_connecting() {
        // Nothing listens on port 1, so reaching the server would fail differently
        let config = DatabaseConfig::from_url("postgres://u:p@127.0.0.1:1/customers").unwrap();

        let err = drop_database(&config, "1customers; DROP TABLE x").await.unwrap_err();
        assert!(matches!(
            err,
            CustomersError::InvalidDatabaseName(IdentifierError::InvalidStartCharacter(_))
        ));
        assert!(err.to_string().starts_with("Invalid database name: "));
    }
}
