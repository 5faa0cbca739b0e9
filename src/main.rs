//! Game Storefront - IGDB catalog proxy server
//!
//! Serves the filtered game catalog and keeps the shared IGDB token fresh.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use game_storefront::api::create_router;
use game_storefront::{spawn_token_refresh_task, AppState, Config};

/// Main entry point for the storefront proxy server.
///
/// # Startup Sequence
/// 1. Load `.env` (if any) and initialize tracing
/// 2. Load configuration from environment variables
/// 3. Create the shared IGDB client
/// 4. Start background token refresh task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "game_storefront=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Game Storefront server");

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        warn!("{}; IGDB requests will fail until credentials are set", e);
    }
    info!(
        "Configuration loaded: port={}, igdb_api_url={}, token_refresh_interval={}s",
        config.server_port, config.igdb_api_url, config.token_refresh_interval
    );

    let state = AppState::from_config(&config).context("failed to build IGDB client")?;

    let refresh_handle = if config.token_refresh_interval > 0 {
        info!("Background token refresh task started");
        Some(spawn_token_refresh_task(
            state.igdb.clone(),
            config.token_refresh_interval,
        ))
    } else {
        info!("Background token refresh disabled; tokens are acquired on demand");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the refresh task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = refresh_handle {
        handle.abort();
        warn!("Token refresh task aborted");
    }
}
