//! Schema bootstrap (idempotent).

use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS product (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT    NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity >= 0),
        price    REAL    NOT NULL CHECK (price >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stock_transaction (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        product_id       INTEGER NOT NULL REFERENCES product(id) ON DELETE CASCADE,
        transaction_type TEXT    NOT NULL CHECK (transaction_type IN ('purchase', 'sale')),
        quantity         INTEGER NOT NULL CHECK (quantity > 0),
        timestamp        INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_product_name ON product (name)",
    "CREATE INDEX IF NOT EXISTS idx_stock_transaction_product ON stock_transaction (product_id)",
    "CREATE INDEX IF NOT EXISTS idx_stock_transaction_timestamp ON stock_transaction (timestamp)",
];

pub(crate) async fn bootstrap(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(*statement).execute(pool).await?;
    }
    Ok(())
}
