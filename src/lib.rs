//! # Travel List
//!
//! A small CRUD service over a single `MongoDB` collection of travel records,
//! plus static serving for the bundled web client.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Travel List                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌────────────────────────┐ │
//! │  │  API Layer  │→ │   Service   │→ │ Storage (TravelRepo)   │ │
//! │  │   (Axum)    │  │   Layer     │  │  MongoDB | in-memory   │ │
//! │  └─────────────┘  └─────────────┘  └────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::storage::create_repository;

/// Run the travel list service.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Connects the storage backend
/// 3. Starts the HTTP server
/// 4. Handles graceful shutdown and closes the storage connection
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The storage backend is unreachable
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Travel List"
    );

    let repository = create_repository(&config.storage).await?;
    info!(backend = %config.storage.backend, "Storage initialized");

    let state = AppState::new(Arc::new(config.clone()), Arc::clone(&repository));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    repository.close().await;

    served?;
    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
