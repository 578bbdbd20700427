//! Query builder utilities
//!
//! Builds the WHERE / ORDER BY / LIMIT-OFFSET fragments for customer listing
//! from a small, whitelisted vocabulary of fields.

pub mod builder;
pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;
pub mod view;


pub use builder::QueryBuilder;
pub use filter::{CustomerListFilter, QueryFilter, QueryOperator};
pub use ordering::{OrderField, SortOrder};
pub use pagination::Pagination;
pub use view::CustomerViewOptions;
