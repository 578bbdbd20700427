//! `CustomerStore` operations against PostgreSQL

use super::core::PgCustomerStore;
use super::transaction::CustomerTransaction;
use super::CUSTOMER_COLUMNS;
use crate::customer::Customer;
use crate::errors::StoreError;
use crate::query_builder::{CustomerListFilter, CustomerViewOptions, QueryBuilder, QueryFilter};
use crate::traits::CustomerStore;
use crate::CUSTOMER_TABLE;
use async_trait::async_trait;
use serde_json::json;

impl PgCustomerStore {
    fn select_base_sql() -> String {
        format!("SELECT {} FROM {}", CUSTOMER_COLUMNS, CUSTOMER_TABLE)
    }

    /// Revision check and conditional write, inside `tx`
    async fn apply_update(
        tx: &mut CustomerTransaction,
        customer: &Customer,
    ) -> Result<Customer, StoreError> {
        let current = tx.current_revision(customer.id).await?;
        if current != customer.revision {
            return Err(StoreError::Changed);
        }
        tx.write(customer).await
    }
}

#[async_trait]
impl CustomerStore for PgCustomerStore {
    async fn create(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.bounded("create customer", async {
            let sql = format!(
                "INSERT INTO {} (firstname, lastname, birthdate, gender, email, address) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING id, revision",
                CUSTOMER_TABLE
            );
            crate::debug_log!("[CREATE] SQL: {}", sql);

            let (id, revision) = sqlx::query_as::<_, (i32, i64)>(&sql)
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(customer.birth_date)
                .bind(customer.gender.as_str())
                .bind(&customer.email)
                .bind(&customer.address)
                .fetch_one(&self.db_pool)
                .await
                .map_err(|e| StoreError::database("create customer", e))?;

            tracing::debug!(id, revision, "customer created");
            Ok(Customer {
                id,
                revision,
                ..customer
            })
        })
        .await
    }

    async fn get(&self, id: i32) -> Result<Customer, StoreError> {
        self.bounded("get customer", async {
            let query = QueryBuilder::new().filter(QueryFilter::eq("id", json!(id)));
            let (sql, params) = query.to_sql(&Self::select_base_sql());

            let mut sqlx_query = sqlx::query_as::<_, Customer>(&sql);
            for param in params {
                sqlx_query = bind_json_param!(sqlx_query, param);
            }

            sqlx_query
                .fetch_optional(&self.db_pool)
                .await
                .map_err(|e| StoreError::database(format!("get customer {}", id), e))?
                .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn count(&self, filter: &CustomerListFilter) -> Result<i64, StoreError> {
        self.bounded("count customers", async {
            let count_base = format!("SELECT COUNT(*) FROM {}", CUSTOMER_TABLE);
            let (sql, params) = QueryBuilder::for_count(filter).to_sql(&count_base);
            crate::debug_log!("[COUNT] SQL: {}", sql);

            let mut sqlx_query = sqlx::query_scalar::<_, i64>(&sql);
            for param in params {
                sqlx_query = bind_json_param!(sqlx_query, param);
            }

            sqlx_query
                .fetch_one(&self.db_pool)
                .await
                .map_err(|e| StoreError::database("count customers", e))
        })
        .await
    }

    async fn list(
        &self,
        filter: &CustomerListFilter,
        options: &CustomerViewOptions,
    ) -> Result<Vec<Customer>, StoreError> {
        // Rejected before a connection is even acquired
        let query = QueryBuilder::for_listing(filter, options)?;

        self.bounded("list customers", async {
            let (sql, params) = query.to_sql(&Self::select_base_sql());
            crate::debug_log!("[LIST] SQL: {}", sql);
            crate::trace_log!("[LIST] params: {:?}", params);

            let mut sqlx_query = sqlx::query_as::<_, Customer>(&sql);
            for param in params {
                sqlx_query = bind_json_param!(sqlx_query, param);
            }

            sqlx_query
                .fetch_all(&self.db_pool)
                .await
                .map_err(|e| StoreError::database("list customers", e))
        })
        .await
    }

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.bounded("update customer", async {
            let mut tx = CustomerTransaction::begin(&self.db_pool).await?;

            match Self::apply_update(&mut tx, &customer).await {
                Ok(updated) => {
                    tx.commit().await?;
                    tracing::debug!(id = updated.id, revision = updated.revision, "customer updated");
                    Ok(updated)
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::warn!(id = customer.id, error = %rollback_err, "rollback failed");
                    }
                    if err.is_retryable() {
                        tracing::warn!(
                            id = customer.id,
                            revision = customer.revision,
                            "customer changed since it was read"
                        );
                    }
                    Err(err)
                }
            }
        })
        .await
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.bounded("delete customer", async {
            let sql = format!("DELETE FROM {} WHERE id = $1", CUSTOMER_TABLE);
            let result = sqlx::query(&sql)
                .bind(id)
                .execute(&self.db_pool)
                .await
                .map_err(|e| StoreError::database(format!("delete customer {}", id), e))?;

            if result.rows_affected() == 0 {
                tracing::debug!(id, "delete matched no customer");
            }
            Ok(())
        })
        .await
    }
}
