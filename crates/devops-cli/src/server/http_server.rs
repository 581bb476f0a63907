//! Plain HTTP server with graceful shutdown.

use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult, shutdown_signal};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a shutdown signal.
pub async fn serve_http(app: Router, config: ServerConfig) -> ServerResult<()> {
    config.validate().map_err(|validation_error| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            error = %validation_error,
            "Invalid server configuration"
        );
        ServerError::invalid_config(&validation_error)
    })?;

    let listener = bind(config.server_addr()).await?;
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces, ensure a firewall is configured"
        );
    }

    let started = Instant::now();
    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
    .await;
    let uptime_secs = started.elapsed().as_secs();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs,
                "Shutdown completed"
            );
            Ok(())
        }
        Err(source) => {
            let error = ServerError::Runtime(source);
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                error_code = error.error_code(),
                suggestion = error.suggestion(),
                uptime_secs,
                "Server stopped with a fatal error"
            );
            Err(error)
        }
    }
}

async fn bind(addr: SocketAddr) -> ServerResult<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %addr,
                "Server is ready and listening for connections"
            );
            Ok(listener)
        }
        Err(source) => {
            let error = ServerError::bind_error(addr.to_string(), source);
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %addr,
                error = %error,
                error_code = error.error_code(),
                recoverable = error.is_recoverable(),
                suggestion = error.suggestion(),
                "Failed to bind to address"
            );
            Err(error)
        }
    }
}
