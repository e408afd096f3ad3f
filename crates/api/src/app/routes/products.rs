use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::app::{dto, errors, services::AppServices, views};

pub async fn index(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store.list_products().await {
        Ok(products) => views::index(&products).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn products_table(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store.list_products().await {
        Ok(products) => views::products_table(&products).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<dto::AddProductForm>,
) -> axum::response::Response {
    let product = match form.parse() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.create_product(product).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.delete_product(id).await {
        Ok(_) => Redirect::to("/products").into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product_id(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ProductLookupQuery>,
) -> axum::response::Response {
    let name = match query.parse() {
        Ok(n) => n,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match services.store.find_product_id_by_name(&name).await {
        Ok(Some(id)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "product_id": id })),
        )
            .into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "Product not found"),
        Err(e) => {
            tracing::error!("product lookup failed: {e}");
            errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
