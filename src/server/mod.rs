//! HTTP surface
//!
//! Stremio addon protocol routes plus the install page, health check and a
//! debug endpoint for inspecting how a title is parsed.

pub mod handlers;
pub mod install;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::addon::Addon;

/// Application version reported by the manifest and health check
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state
pub struct AppState {
    addon: Addon,
}

impl AppState {
    pub fn new(addon: Addon) -> Self {
        Self { addon }
    }

    pub fn addon(&self) -> &Addon {
        &self.addon
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/manifest.json", get(handlers::manifest))
        .route("/stream/{media_type}/{id}", get(handlers::stream))
        .route("/install", get(install::install_page))
        .route("/health", get(handlers::health))
        .route("/test", get(handlers::inspect))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(addon: Addon, addr: &str) -> Result<()> {
    let app = create_router(Arc::new(AppState::new(addon)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
