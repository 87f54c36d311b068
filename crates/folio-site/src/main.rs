mod config;
mod error;
mod render;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use folio_common::state::SiteState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting folio-site");

    let config = Config::from_env()?;
    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.store.data_dir.display(),
        redis = config.store.redis_url.is_some(),
        latency_ms = config.store.latency.as_millis(),
        "configuration loaded"
    );

    let store = config.store.open().await;
    let state = Arc::new(SiteState::open(store).await);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "site ready");

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;

    info!("site shut down");
    Ok(())
}
