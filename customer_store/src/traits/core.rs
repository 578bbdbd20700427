use crate::customer::Customer;
use crate::query_builder::{CustomerListFilter, CustomerViewOptions};
use crate::StoreError;
use async_trait::async_trait;

/// Persistence operations for customers.
///
/// Every operation is cancelled by dropping its future; implementations must
/// not leave partial writes behind when that happens.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert the customer, returning it with its assigned id and revision
    async fn create(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Fetch a customer, or `StoreError::NotFound`
    async fn get(&self, id: i32) -> Result<Customer, StoreError>;

    /// Number of customers matching the filter
    async fn count(&self, filter: &CustomerListFilter) -> Result<i64, StoreError>;

    /// Customers matching the filter, ordered and paginated per `options`
    async fn list(
        &self,
        filter: &CustomerListFilter,
        options: &CustomerViewOptions,
    ) -> Result<Vec<Customer>, StoreError>;

    /// Replace every mutable field if `customer.revision` is still current.
    ///
    /// Fails with `StoreError::Changed` when another write got there first.
    async fn update(&self, customer: Customer) -> Result<Customer, StoreError>;

    /// Remove the customer; succeeds whether or not the row existed
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}
