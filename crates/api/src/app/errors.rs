use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;
use stockroom_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        e @ (StoreError::Decode(_) | StoreError::Database(_)) => {
            tracing::error!("store failure: {e}");
            text_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => text_error(StatusCode::BAD_REQUEST, msg),
        DomainError::NotFound => text_error(StatusCode::NOT_FOUND, "Product not found"),
        DomainError::InsufficientStock {
            requested,
            available,
        } => text_error(
            StatusCode::CONFLICT,
            format!("Insufficient stock for sale (requested {requested}, available {available})"),
        ),
    }
}

pub fn text_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, message.into()).into_response()
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
