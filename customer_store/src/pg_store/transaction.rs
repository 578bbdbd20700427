//! Transaction support for the optimistic-concurrency update
//!
//! Wraps a sqlx transaction opened at REPEATABLE READ, so two updaters of the
//! same row cannot both commit against the revision they read.

use super::CUSTOMER_COLUMNS;
use crate::customer::Customer;
use crate::errors::StoreError;
use crate::{DbPool, CUSTOMER_TABLE};
use sqlx::{Postgres, Transaction};

pub struct CustomerTransaction {
    tx: Transaction<'static, Postgres>,
}

impl CustomerTransaction {
    /// Begin a new REPEATABLE READ transaction
    pub async fn begin(pool: &DbPool) -> Result<Self, StoreError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| StoreError::database("begin transaction", e))?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::database("set isolation level", e))?;

        Ok(Self { tx })
    }

    /// Revision currently stored for `id`, as seen by this transaction
    pub async fn current_revision(&mut self, id: i32) -> Result<i64, StoreError> {
        let sql = format!("SELECT revision FROM {} WHERE id = $1", CUSTOMER_TABLE);
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| StoreError::database(format!("read revision of customer {}", id), e))?
            .ok_or(StoreError::NotFound(id))
    }

    /// Overwrite every mutable field and bump the revision.
    ///
    /// The write is conditional on `customer.revision`; a row that moved on
    /// in the meantime yields `StoreError::Changed`.
    pub async fn write(&mut self, customer: &Customer) -> Result<Customer, StoreError> {
        let sql = format!(
            "UPDATE {} SET firstname = $1, lastname = $2, birthdate = $3, gender = $4, \
             email = $5, address = $6, revision = revision + 1 \
             WHERE id = $7 AND revision = $8 RETURNING {}",
            CUSTOMER_TABLE, CUSTOMER_COLUMNS
        );
        crate::debug_log!("[UPDATE] SQL: {}", sql);

        sqlx::query_as::<_, Customer>(&sql)
            .bind(&customer.first_name)
            .bind(&customer.last_name)
            .bind(customer.birth_date)
            .bind(customer.gender.as_str())
            .bind(&customer.email)
            .bind(&customer.address)
            .bind(customer.id)
            .bind(customer.revision)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| StoreError::database(format!("update customer {}", customer.id), e))?
            .ok_or(StoreError::Changed)
    }

    /// Commit the transaction
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::database("commit transaction", e))
    }

    /// Rollback the transaction
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| StoreError::database("rollback transaction", e))
    }
}
