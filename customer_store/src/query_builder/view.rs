//! View options: ordering and pagination requested by the caller

use crate::errors::StoreError;
use crate::query_builder::ordering::{OrderField, SortOrder};
use crate::query_builder::pagination::Pagination;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerViewOptions {
    /// Field name to order by; empty or `None` keeps the backend's order
    pub order_by: Option<String>,
    pub order_desc: bool,
    pub offset: u64,
    pub limit: u64,
}

impl CustomerViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, desc: bool) -> Self {
        self.order_by = Some(field.into());
        self.order_desc = desc;
        self
    }

    pub fn page(mut self, offset: u64, limit: u64) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Resolve `order_by` against the whitelist
    pub fn order_field(&self) -> Result<Option<OrderField>, StoreError> {
        match self.order_by.as_deref() {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some),
        }
    }

    pub fn sort_order(&self) -> SortOrder {
        if self.order_desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new()
            .with_offset(self.offset)
            .with_limit(self.limit)
    }
}
