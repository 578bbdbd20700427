//! Traits for customer persistence
//!
//! The store is consumed only through this contract, so the manager can run
//! over PostgreSQL or the in-memory implementation alike.

pub mod core;

pub use core::CustomerStore;
