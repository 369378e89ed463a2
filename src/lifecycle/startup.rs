//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize logging and metrics from configuration
//! - Bind the listener once the handler registry is complete
//! - Translate OS signals into a graceful shutdown
//!
//! # Design Decisions
//! - Fail fast: bind errors are returned to the caller
//! - A metrics exporter that cannot start is logged, not fatal

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::SimpleJsonServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_termination;
use crate::observability::{logging, metrics};
use crate::registry::Registry;

/// Run the server with `registry` until SIGINT/SIGTERM.
pub async fn serve(config: ServerConfig, registry: Registry) -> Result<(), std::io::Error> {
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        handlers = registry.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_termination().await;
        shutdown.trigger();
    });

    SimpleJsonServer::new(config, registry)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
