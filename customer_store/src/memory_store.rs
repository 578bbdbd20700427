//! In-memory customer store
//!
//! Honors the same contract as the PostgreSQL store: identity and revision
//! assignment, the persisted gender constraint, prefix filters, whitelisted
//! ordering with an id tie-breaker, pagination and the revision check.

use crate::customer::Customer;
use crate::errors::StoreError;
use crate::query_builder::{CustomerListFilter, CustomerViewOptions};
use crate::traits::CustomerStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<i32, Customer>,
    last_id: i32,
}

/// Store double backed by a map; clones share the same rows
#[derive(Debug, Clone, Default)]
pub struct MemoryCustomerStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, regardless of any filter
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_gender(operation: &str, customer: &Customer) -> Result<(), StoreError> {
        if customer.gender.is_persistable() {
            Ok(())
        } else {
            Err(StoreError::storage(
                operation,
                format!(
                    "gender {:?} violates the customers gender constraint",
                    customer.gender.as_str()
                ),
            ))
        }
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create(&self, customer: Customer) -> Result<Customer, StoreError> {
        Self::check_gender("create customer", &customer)?;

        let mut state = self.state.write().await;
        state.last_id += 1;
        let created = Customer {
            id: state.last_id,
            revision: 1,
            ..customer
        };
        state.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i32) -> Result<Customer, StoreError> {
        self.state
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn count(&self, filter: &CustomerListFilter) -> Result<i64, StoreError> {
        let state = self.state.read().await;
        let count = state.rows.values().filter(|c| filter.matches(c)).count();
        Ok(count as i64)
    }

    async fn list(
        &self,
        filter: &CustomerListFilter,
        options: &CustomerViewOptions,
    ) -> Result<Vec<Customer>, StoreError> {
        let order_field = options.order_field()?;
        let sort_order = options.sort_order();

        let state = self.state.read().await;
        // BTreeMap iteration is already ascending by id
        let mut matching: Vec<Customer> = state
            .rows
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();

        if let Some(field) = order_field {
            // Stable sort keeps ascending ids among equal keys
            matching.sort_by(|a, b| sort_order.apply(field.compare(a, b)));
        }

        Ok(options.pagination().window(matching))
    }

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .rows
            .get_mut(&customer.id)
            .ok_or(StoreError::NotFound(customer.id))?;

        if stored.revision != customer.revision {
            return Err(StoreError::Changed);
        }
        Self::check_gender(&format!("update customer {}", customer.id), &customer)?;

        *stored = Customer {
            revision: stored.revision + 1,
            ..customer
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.state.write().await.rows.remove(&id);
        Ok(())
    }
}
