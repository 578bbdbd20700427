//! Validating front for a customer store
//!
//! Writes are validated before they reach the store; reads pass straight
//! through. Store errors, `Changed` included, are returned untouched so
//! callers can refetch and retry.

use customer_store::validation;
use customer_store::{
    Customer, CustomerListFilter, CustomerStore, CustomerViewOptions, StoreError,
    ValidationErrors,
};

#[derive(Debug, Clone)]
pub struct CustomerManager<S> {
    store: S,
}

impl<S: CustomerStore> CustomerManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run every field check against today's date
    pub fn validate(&self, customer: &Customer) -> Result<(), ValidationErrors> {
        validation::validate(customer)
    }

    /// Validate and insert; the store is not touched when validation fails
    pub async fn create(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.validate(&customer)?;
        self.store.create(customer).await
    }

    pub async fn get(&self, id: i32) -> Result<Customer, StoreError> {
        self.store.get(id).await
    }

    pub async fn count(&self, filter: &CustomerListFilter) -> Result<i64, StoreError> {
        self.store.count(filter).await
    }

    pub async fn list(
        &self,
        filter: &CustomerListFilter,
        options: &CustomerViewOptions,
    ) -> Result<Vec<Customer>, StoreError> {
        self.store.list(filter, options).await
    }

    /// Validate and apply under the revision check
    pub async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.validate(&customer)?;
        self.store.update(customer).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.store.delete(id).await
    }
}
