//! Inventory store boundary.
//!
//! Owns `Product` and `Transaction` records and enforces the stock invariant
//! on every write. Handlers only ever see the [`InventoryStore`] trait.

mod schema;
pub mod sqlite;
pub mod r#trait;

pub use r#trait::{InventoryStore, StoreError, StoreResult};
pub use sqlite::SqliteInventoryStore;
