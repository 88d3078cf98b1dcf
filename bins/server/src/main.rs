//! PurchaseFX API Server
//!
//! Main entry point: records purchases and converts them with Treasury
//! exchange rates.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use purchasefx_api::{AppState, create_router};
use purchasefx_core::ReconciliationService;
use purchasefx_core::storage::TransactionStore;
use purchasefx_shared::AppConfig;
use purchasefx_treasury::TreasuryClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purchasefx=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Open transaction store
    let store = TransactionStore::from_config(&config.storage)?;
    info!(
        provider = store.provider_name(),
        bucket = store.bucket(),
        "Transaction store ready"
    );

    // Create Treasury client
    let treasury = TreasuryClient::from_config(&config.treasury)?;
    info!(
        endpoint = %config.treasury.base_url,
        max_attempts = config.treasury.max_attempts,
        "Treasury client configured"
    );

    // Create application state
    let state = AppState::new(ReconciliationService::new(
        Arc::new(store),
        Arc::new(treasury),
    ));

    // Create router
    let app = create_router(state, &config.server);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server exited");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down the server");
}
