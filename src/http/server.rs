//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all endpoints
//! - Wire up middleware (tracing, timeout, body limit, request ID, metrics)
//! - Bind server to listener
//! - Stop accepting on shutdown signal and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::endpoints;
use crate::observability::metrics;
use crate::registry::Registry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

/// HTTP server for the simple JSON protocol.
pub struct SimpleJsonServer {
    router: Router,
    config: ServerConfig,
}

impl SimpleJsonServer {
    /// Create a server over a frozen handler registry.
    pub fn new(config: ServerConfig, registry: Registry) -> Self {
        tracing::info!(handlers = ?registry, "Handler registry built");

        let state = AppState {
            registry: Arc::new(registry),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(endpoints::root))
            .route("/search", get(endpoints::search).post(endpoints::search))
            .route("/query", post(endpoints::query))
            .route(
                "/annotations",
                post(endpoints::annotations).options(endpoints::annotations_preflight),
            )
            .route("/tag-keys", post(endpoints::tag_keys))
            .route("/tag-values", post(endpoints::tag_values))
            .with_state(state)
            .route_layer(middleware::from_fn(metrics::track_requests))
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, e.g. for driving requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
