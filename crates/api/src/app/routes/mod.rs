use axum::{
    routing::{get, post},
    Router,
};

pub mod products;
pub mod system;
pub mod transactions;

/// Router for all inventory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(products::index))
        .route("/add", post(products::add_product))
        .route("/products", get(products::products_table))
        .route("/delete/:id", get(products::delete_product))
        .route("/get_product_id", get(products::get_product_id))
        .route("/transaction", post(transactions::add_transaction))
        .route("/transaction_history", get(transactions::transaction_history))
        .route("/delete_transaction/:id", get(transactions::delete_transaction))
}
