//! PlayOX Server - HTTP API for tic-tac-toe against the computer
//!
//! This crate provides the web backend:
//! - REST API for creating, listing and playing games
//! - Static file serving for the browser front end

mod error;
mod routes;
mod state;

use anyhow::Context;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use routes::games::{GameView, MoveRequest, MoveView};
pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    /// Seed for the computer opponent, random when `None`
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: "html".to_string(),
            seed: None,
        }
    }
}

impl ServerConfig {
    /// Resolve `host` (a name, IPv4 or IPv6 literal) to candidate listen addresses
    pub async fn listen_addrs(&self) -> anyhow::Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("cannot resolve listen host {}", self.host))?
            .collect();
        if addrs.is_empty() {
            anyhow::bail!("listen host {} resolved to no addresses", self.host);
        }
        Ok(addrs)
    }

    /// Bind the first resolved address that accepts a listener
    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        let addrs = self.listen_addrs().await?;
        TcpListener::bind(addrs.as_slice())
            .await
            .with_context(|| format!("failed to bind {}:{}", self.host, self.port))
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Game API
        .route(
            "/api/games",
            get(routes::games::list_games).post(routes::games::create_game),
        )
        .route("/api/games/{id}", get(routes::games::get_game))
        .route(
            "/api/games/{id}/moves",
            get(routes::games::list_moves).post(routes::games::submit_move),
        )
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server, running until Ctrl-C
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let listener = config.bind().await?;
    let state = Arc::new(ServerState::with_seed(config.seed));
    let router = create_router(&config, state);

    tracing::info!("PlayOX server starting on http://{}", listener.local_addr()?);
    tracing::info!("Static files served from: {}", config.static_dir);
    if let Some(seed) = config.seed {
        tracing::info!("Computer opponent seeded with {}", seed);
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PlayOX server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
