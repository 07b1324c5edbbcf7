mod routes;
mod state;

use anyhow::{Context, Result};
use notion_ical_core::notion::{EventFetcher, NotionClient};
use notion_ical_core::{Config, FeedCache};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    init_logging();

    run()
        .await
        .inspect_err(|e| tracing::error!("Failed to start server: {:#}", e))
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn")),
        )
        .init();
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let client = NotionClient::new(&config).context("Failed to create Notion client")?;
    let fetcher = EventFetcher::new(
        Arc::new(client),
        config.property_names.clone(),
        config.max_pages,
    );
    let cache = FeedCache::new(fetcher, Duration::from_secs(config.cache_ttl_secs));

    let app = routes::app(AppState::new(cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on port {}", config.port);
    tracing::info!("Calendar feed: http://localhost:{}/calendar.ics", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
