mod api;
mod db;
mod error;
mod metrics;
mod state;

use crate::db::init_db;
use crate::state::AppState;
use anyhow::Result;
use portal_common::config::AppConfig;
use portal_common::CertificateStore;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    let db = init_db(&config.database).await?;
    let state = AppState::new(CertificateStore::new(db));

    let app = api::router(state, config.body_limit_bytes);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("server running on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
