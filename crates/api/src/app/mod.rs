//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared handles passed to every handler
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: form/query DTOs and the parse-and-validate boundary
//! - `errors.rs`: consistent error responses
//! - `views.rs`: server-rendered HTML

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use stockroom_infra::InventoryStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The store is constructed (and later closed) by the caller.
pub fn build_app(store: Arc<dyn InventoryStore>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
