//! Inventory domain module.
//!
//! This crate contains the business rules for products and stock
//! transactions, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod product;
pub mod transaction;

pub use product::{NewProduct, Product};
pub use transaction::{NewTransaction, Transaction, TransactionType};
