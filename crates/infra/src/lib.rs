//! Infrastructure layer: persistence and configuration.

pub mod config;
pub mod store;


pub use config::{Config, ConfigError};
pub use store::{InventoryStore, SqliteInventoryStore, StoreError, StoreResult};
