// ============================================================================
// moviedim-cli/src/server/mod.rs
// ============================================================================
//
// HTTP SERVICE: axum Router and Server Loop
//
// Routes:
// - POST /calculate     detect by file path or Plex rating key
// - POST /aspect-ratio  legacy single-field variant
// - GET  /health        liveness probe
//
// Requests share nothing but the immutable AppState. Detection is blocking
// and runs on tokio's blocking pool.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use moviedim_core::{
    AspectRatioDetector, AspectRatioEstimator, CatalogCredentials, CatalogLookup, CoreConfig,
    CoreResult, PathResolver, PlexClient,
};
use tokio::net::TcpListener;

pub mod error;
pub mod handlers;

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<dyn AspectRatioEstimator>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub resolver: Arc<PathResolver>,
    /// Configured Plex credentials; requests may override them.
    pub credentials: Arc<CatalogCredentials>,
}

impl AppState {
    pub fn new(
        estimator: Arc<dyn AspectRatioEstimator>,
        catalog: Arc<dyn CatalogLookup>,
        resolver: PathResolver,
        credentials: CatalogCredentials,
    ) -> Self {
        Self {
            estimator,
            catalog,
            resolver: Arc::new(resolver),
            credentials: Arc::new(credentials),
        }
    }

    /// State backed by the ffmpeg detector and the Plex client.
    pub fn from_config(config: &CoreConfig) -> CoreResult<Self> {
        Ok(Self::new(
            Arc::new(AspectRatioDetector::from_config(config)),
            Arc::new(PlexClient::new(config.plex_timeout)?),
            PathResolver::new(&config.video_root),
            CatalogCredentials::from_config(config),
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/calculate", post(handlers::calculate))
        .route("/aspect-ratio", post(handlers::legacy_aspect_ratio))
        .with_state(state)
}

/// Serves until Ctrl-C or SIGTERM.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
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
    log::info!("Shutdown signal received");
}
