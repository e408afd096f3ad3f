use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{DomainError, ProductId, TransactionId};
use stockroom_inventory::{NewProduct, NewTransaction, Product, Transaction};

pub type StoreResult<T> = Result<T, StoreError>;

/// Inventory store operation error.
///
/// Domain rejections (validation, missing product, insufficient stock) pass
/// through untouched so callers can map them precisely; everything else is
/// an infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A persisted row could not be mapped back to a domain value.
    #[error("corrupt row: {0}")]
    Decode(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            StoreError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Persistence for products and their stock transactions.
///
/// ## Write semantics
///
/// - `apply_transaction` is all-or-nothing: the product quantity update and
///   the transaction row are committed together or not at all. Concurrent
///   calls against the same product are serialized.
/// - A sale that exceeds the on-hand quantity fails with
///   `DomainError::InsufficientStock` and writes nothing.
/// - `delete_product` cascades to the product's transactions.
/// - `delete_transaction` removes the record only; the product quantity is
///   not restored.
/// - Both deletes are idempotent and report whether a row was removed.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> StoreResult<ProductId>;

    async fn apply_transaction(&self, tx: NewTransaction) -> StoreResult<TransactionId>;

    async fn delete_product(&self, id: ProductId) -> StoreResult<bool>;

    async fn delete_transaction(&self, id: TransactionId) -> StoreResult<bool>;

    /// Exact-match lookup; the first product (lowest id) wins when names repeat.
    async fn find_product_id_by_name(&self, name: &str) -> StoreResult<Option<ProductId>>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// All transactions, newest first.
    async fn list_transactions(&self) -> StoreResult<Vec<Transaction>>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn create_product(&self, product: NewProduct) -> StoreResult<ProductId> {
        (**self).create_product(product).await
    }

    async fn apply_transaction(&self, tx: NewTransaction) -> StoreResult<TransactionId> {
        (**self).apply_transaction(tx).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<bool> {
        (**self).delete_product(id).await
    }

    async fn delete_transaction(&self, id: TransactionId) -> StoreResult<bool> {
        (**self).delete_transaction(id).await
    }

    async fn find_product_id_by_name(&self, name: &str) -> StoreResult<Option<ProductId>> {
        (**self).find_product_id_by_name(name).await
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        (**self).list_products().await
    }

    async fn list_transactions(&self) -> StoreResult<Vec<Transaction>> {
        (**self).list_transactions().await
    }
}
