//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the role's two handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Stop when the shutdown future resolves

use axum::{
    extract::State,
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::chain::{ChainedHandler, DownstreamError, ResponseEnvelope, ServiceRole};
use crate::config::ChainConfig;
use crate::http::request::Message;
use crate::http::response::HealthStatus;

/// Error type for server setup and serving.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build handler: {0}")]
    Handler(#[from] DownstreamError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ChainedHandler>,
}

/// HTTP server for one chain service.
pub struct ChainServer {
    router: Router,
    config: ChainConfig,
}

impl ChainServer {
    /// Create a new server for the given (validated) configuration.
    pub fn new(config: ChainConfig) -> Result<Self, ServerError> {
        let handler = ChainedHandler::from_config(&config)?;
        if let Some(downstream) = handler.downstream() {
            tracing::info!(
                service = config.role().service_name(),
                downstream = %downstream.target(),
                timeout_ms = downstream.timeout().as_millis() as u64,
                "Downstream configured"
            );
        }

        let state = AppState {
            handler: Arc::new(handler),
        };
        let router = Self::build_router(config.role(), state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(role: ServiceRole, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(role.endpoint(), get(chain_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Router for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.service.bind_address();
        TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        let role = self.config.role();
        tracing::info!(
            service = role.service_name(),
            role = %role,
            address = %addr,
            endpoint = role.endpoint(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!(service = role.service_name(), "Shutdown signal received");
            })
            .await?;

        tracing::info!(service = role.service_name(), "HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

/// Liveness check. No downstream interaction.
async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

/// Business endpoint: one hop of the chain.
async fn chain_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    message: Message,
) -> ResponseEnvelope {
    state.handler.handle(&headers, message.as_str()).await
}
