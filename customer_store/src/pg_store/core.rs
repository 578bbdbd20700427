use crate::errors::StoreError;
use crate::DbPool;
use std::future::Future;
use std::time::Duration;

/// PostgreSQL-backed customer store
#[derive(Clone)]
pub struct PgCustomerStore {
    pub(crate) db_pool: DbPool,
    pub(crate) operation_timeout: Option<Duration>,
}

impl std::fmt::Debug for PgCustomerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCustomerStore")
            .field("pool_size", &self.db_pool.size())
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

impl PgCustomerStore {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            db_pool,
            operation_timeout: None,
        }
    }

    /// Abort any operation that runs longer than `timeout`; an open
    /// transaction is rolled back when its future is dropped
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &DbPool {
        &self.db_pool
    }

    pub(crate) async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match self.operation_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
                tracing::warn!(operation, timeout_ms = limit.as_millis() as u64, "store operation timed out");
                Err(StoreError::Timeout { operation })
            }),
            None => fut.await,
        }
    }
}
