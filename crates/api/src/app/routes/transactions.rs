use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};

use stockroom_core::{DomainError, Entity};

use crate::app::{dto, errors, services::AppServices, views};

pub async fn add_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<dto::TransactionForm>,
) -> axum::response::Response {
    let tx = match form.parse() {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let product_id = tx.product_id();

    match services.store.apply_transaction(tx).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) if matches!(e.domain(), Some(DomainError::NotFound)) => errors::text_error(
            StatusCode::NOT_FOUND,
            format!("Product with ID {product_id} not found"),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn transaction_history(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let transactions = match services.store.list_transactions().await {
        Ok(t) => t,
        Err(e) => return errors::store_error_to_response(e),
    };
    let names = match services.store.list_products().await {
        Ok(products) => products
            .into_iter()
            .map(|p| (p.id(), p.name().to_string()))
            .collect::<HashMap<_, _>>(),
        Err(e) => return errors::store_error_to_response(e),
    };

    views::transaction_history(&transactions, &names).into_response()
}

pub async fn delete_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_transaction_id(&id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.delete_transaction(id).await {
        Ok(_) => Redirect::to("/transaction_history").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
