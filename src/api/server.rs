//! HTTP API server
//!
//! This module provides the Axum server wiring for the ranking engine,
//! including graceful shutdown via a broadcast channel.

use crate::api::handlers;
use crate::engine::RankingEngine;
use crate::metrics::MetricsCollector;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port to bind the API server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Shared state for the API server
#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<RankingEngine>,
    pub metrics: Arc<MetricsCollector>,
}

/// HTTP server exposing the engine operations
pub struct ApiServer {
    config: ApiServerConfig,
    state: ApiState,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(
        config: ApiServerConfig,
        engine: Arc<RankingEngine>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state: ApiState { engine, metrics },
            shutdown_tx,
        }
    }

    /// Start the API server; resolves once the server has shut down
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid API server address")?;

        let app = self.create_router();
        let listener = TcpListener::bind(addr).await?;

        info!("API server listening on http://{}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API server shutdown signal received");
            })
            .await?;

        info!("API server stopped");
        Ok(())
    }

    /// Create the Axum router with all engine endpoints
    fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::root_handler))
            .route("/health", get(handlers::health_handler))
            .route("/metrics", get(handlers::metrics_handler))
            .route("/api/stats", get(handlers::stats_handler))
            .route("/api/categories", get(handlers::categories_handler))
            .route("/api/companies", get(handlers::list_companies_handler))
            .route("/api/companies/{slug}", get(handlers::company_handler))
            .route(
                "/api/companies/{slug}/ratings",
                get(handlers::company_ratings_handler),
            )
            .route(
                "/api/companies/{slug}/comments",
                get(handlers::company_comments_handler),
            )
            .route("/api/vote/matchup", get(handlers::matchup_handler))
            .route("/api/vote", post(handlers::vote_handler))
            .route("/api/leaderboard", get(handlers::leaderboard_handler))
            .route(
                "/api/leaderboard/users",
                get(handlers::user_leaderboard_handler),
            )
            .route("/api/ratings", post(handlers::rating_handler))
            .route("/api/comments", post(handlers::comment_handler))
            .route(
                "/api/comments/{id}/upvote",
                post(handlers::upvote_comment_handler),
            )
            .with_state(self.state.clone())
    }

    /// Stop the API server
    pub fn stop(&self) -> Result<()> {
        info!("Stopping API server...");

        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to API server: {}", e);
        }

        Ok(())
    }
}
