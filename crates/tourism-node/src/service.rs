//! Service wiring: store, ledger, router and the HTTP listener.

use crate::config::{NodeConfig, StorageBackend};
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tourism_api::{create_router, AppState, Metrics};
use tourism_governance::GovernanceLedger;
use tourism_storage::{GovernanceStore, JsonFileStore, MemoryStore};
use tracing::{info, warn};

/// Open the configured store backend.
pub fn build_store(config: &NodeConfig) -> anyhow::Result<Box<dyn GovernanceStore>> {
    let store: Box<dyn GovernanceStore> = match config.storage.backend {
        StorageBackend::Json => {
            let store = JsonFileStore::open(config.dataset_path())?;
            info!(path = %store.path().display(), "Using JSON file store");
            Box::new(store)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store, governance data will not survive a restart");
            Box::new(MemoryStore::new())
        }
    };
    Ok(store)
}

/// Build the router and its shared state from configuration.
pub fn build_app(config: &NodeConfig) -> anyhow::Result<(Router, AppState)> {
    let store = build_store(config)?;
    let ledger = GovernanceLedger::with_rules(store, config.governance.clone());
    let state = AppState::new(ledger, Metrics::new()?);
    let router = create_router(state.clone(), config.api.max_body_size);
    Ok((router, state))
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    config: &NodeConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let (router, _state) = build_app(config)?;

    info!(addr = %listener.local_addr()?, name = %config.name, "Governance API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Governance API stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn run(config: NodeConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.api.http_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", config.api.http_addr, e))?;
    serve(listener, &config, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
