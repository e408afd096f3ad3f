use std::sync::Arc;

use anyhow::Context;

use stockroom_infra::{Config, SqliteInventoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = Config::from_env().context("invalid configuration")?;

    let store = SqliteInventoryStore::connect(&config)
        .await
        .with_context(|| format!("failed to open inventory store at {}", config.database_url))?;

    let app = stockroom_api::app::build_app(Arc::new(store.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => tracing::error!("failed to listen for ctrl-c: {e}"),
    }
}
