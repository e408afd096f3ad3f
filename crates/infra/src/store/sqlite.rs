//! SQLite-backed inventory store.
//!
//! ## Atomicity
//!
//! `apply_transaction` runs in a single database transaction:
//!
//! 1. Claim the product row with a no-op `UPDATE` (takes the write lock)
//! 2. Load the product row
//! 3. Decide the new quantity with the pure domain rule
//! 4. Write the new quantity
//! 5. Insert the transaction row with a non-decreasing timestamp
//! 6. Commit
//!
//! SQLite admits one writer at a time. Because the first statement is a
//! write, the lock is taken before anything is read, so the check in 3 always
//! sees the latest committed quantity. Competing writers wait on the busy
//! timeout instead of failing. A failed step never leaves a quantity change
//! without its transaction record (or vice versa).

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::instrument;

use stockroom_core::{DomainError, ProductId, TransactionId};
use stockroom_inventory::{NewProduct, NewTransaction, Product, Transaction, TransactionType};

use super::r#trait::{InventoryStore, StoreError, StoreResult};
use super::schema;
use crate::config::Config;

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    quantity: i64,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::from_parts(ProductId::new(row.id), row.name, row.quantity, row.price)
    }
}

#[derive(Debug, FromRow)]
struct TransactionRow {
    id: i64,
    product_id: i64,
    transaction_type: String,
    quantity: i64,
    timestamp: i64,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoreError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::from_str(&row.transaction_type)
            .map_err(|e| StoreError::Decode(format!("transaction {}: {e}", row.id)))?;
        let timestamp = DateTime::<Utc>::from_timestamp_micros(row.timestamp).ok_or_else(|| {
            StoreError::Decode(format!(
                "transaction {}: timestamp {} out of range",
                row.id, row.timestamp
            ))
        })?;
        Ok(Transaction::from_parts(
            TransactionId::new(row.id),
            ProductId::new(row.product_id),
            transaction_type,
            row.quantity,
            timestamp,
        ))
    }
}

/// How long a writer waits for the database write lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// SQLite inventory store.
///
/// Constructed once at startup and shared; `close()` drains the pool on
/// shutdown.
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: Arc<SqlitePool>,
}

impl SqliteInventoryStore {
    /// Open the database described by `config` and bootstrap the schema.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // Every connection to `:memory:` is its own database, so pin exactly
        // one connection for the lifetime of the pool.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };
        let options = if config.is_in_memory() {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        };

        let pool = pool_options.connect_with(options).await?;
        schema::bootstrap(&pool).await?;

        tracing::info!(database_url = %config.database_url, "inventory store ready");
        Ok(Self::new(pool))
    }

    /// Wrap an existing pool. The schema must already exist.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("inventory store closed");
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    #[instrument(skip(self, product), fields(name = %product.name()), err)]
    async fn create_product(&self, product: NewProduct) -> StoreResult<ProductId> {
        let result = sqlx::query("INSERT INTO product (name, quantity, price) VALUES (?1, ?2, ?3)")
            .bind(product.name())
            .bind(product.quantity())
            .bind(product.price())
            .execute(&*self.pool)
            .await?;

        let id = ProductId::new(result.last_insert_rowid());
        tracing::info!(product_id = %id, "product created");
        Ok(id)
    }

    #[instrument(
        skip(self, tx),
        fields(
            product_id = %tx.product_id(),
            transaction_type = %tx.transaction_type(),
            quantity = tx.quantity()
        ),
        err
    )]
    async fn apply_transaction(&self, tx: NewTransaction) -> StoreResult<TransactionId> {
        let mut db_tx = self.pool.begin().await?;

        let claimed = sqlx::query("UPDATE product SET quantity = quantity WHERE id = ?1")
            .bind(tx.product_id().get())
            .execute(&mut *db_tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Err(DomainError::not_found().into());
        }

        let product: Product = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity, price FROM product WHERE id = ?1",
        )
        .bind(tx.product_id().get())
        .fetch_one(&mut *db_tx)
        .await?
        .into();

        let new_quantity = match product.quantity_after(&tx) {
            Ok(q) => q,
            Err(e) => {
                if let DomainError::InsufficientStock { .. } = e {
                    tracing::warn!(available = product.quantity(), "sale rejected");
                }
                return Err(e.into());
            }
        };

        sqlx::query("UPDATE product SET quantity = ?1 WHERE id = ?2")
            .bind(new_quantity)
            .bind(tx.product_id().get())
            .execute(&mut *db_tx)
            .await?;

        let latest: Option<i64> =
            sqlx::query_scalar("SELECT MAX(timestamp) FROM stock_transaction")
                .fetch_one(&mut *db_tx)
                .await?;
        let now = Utc::now().timestamp_micros();
        let timestamp = latest.map_or(now, |latest| latest.max(now));

        let inserted = sqlx::query(
            r#"
            INSERT INTO stock_transaction (product_id, transaction_type, quantity, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(tx.product_id().get())
        .bind(tx.transaction_type().as_str())
        .bind(tx.quantity())
        .bind(timestamp)
        .execute(&mut *db_tx)
        .await?;

        db_tx.commit().await?;

        let id = TransactionId::new(inserted.last_insert_rowid());
        tracing::info!(transaction_id = %id, new_quantity, "transaction applied");
        Ok(id)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete_product(&self, id: ProductId) -> StoreResult<bool> {
        let mut db_tx = self.pool.begin().await?;

        let cascaded = sqlx::query("DELETE FROM stock_transaction WHERE product_id = ?1")
            .bind(id.get())
            .execute(&mut *db_tx)
            .await?
            .rows_affected();
        let removed = sqlx::query("DELETE FROM product WHERE id = ?1")
            .bind(id.get())
            .execute(&mut *db_tx)
            .await?
            .rows_affected()
            > 0;

        db_tx.commit().await?;

        if removed {
            tracing::info!(cascaded_transactions = cascaded, "product deleted");
        } else {
            tracing::debug!("delete of absent product ignored");
        }
        Ok(removed)
    }

    #[instrument(skip(self), fields(transaction_id = %id), err)]
    async fn delete_transaction(&self, id: TransactionId) -> StoreResult<bool> {
        let removed = sqlx::query("DELETE FROM stock_transaction WHERE id = ?1")
            .bind(id.get())
            .execute(&*self.pool)
            .await?
            .rows_affected()
            > 0;

        if removed {
            tracing::info!("transaction deleted");
        } else {
            tracing::debug!("delete of absent transaction ignored");
        }
        Ok(removed)
    }

    #[instrument(skip(self), err)]
    async fn find_product_id_by_name(&self, name: &str) -> StoreResult<Option<ProductId>> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM product WHERE name = ?1 ORDER BY id ASC LIMIT 1")
                .bind(name)
                .fetch_optional(&*self.pool)
                .await?;
        Ok(id.map(ProductId::new))
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity, price FROM product ORDER BY id ASC",
        )
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_transactions(&self) -> StoreResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, product_id, transaction_type, quantity, timestamp
            FROM stock_transaction
            ORDER BY timestamp DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }
}
