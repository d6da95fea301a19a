use kitaayase_worker::cache::EdgeCache;
use kitaayase_worker::config::Config;
use kitaayase_worker::odpt::OdptClient;
use kitaayase_worker::web::{AppState, create_router};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "kitaayase_worker=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let client = OdptClient::new(config.odpt.clone())?;
    let cache = EdgeCache::new(&config.cache);
    let state = AppState::new(cache, client);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        upstream = %config.odpt.base_url,
        "Chiyoda line status listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
