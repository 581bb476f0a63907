//! Shutdown trigger for `axum::serve`.

use std::future::{Future, pending};
use std::io;
use std::time::Duration;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on the first Ctrl+C or SIGTERM.
///
/// A signal whose handler cannot be installed is logged and never fires.
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    let received = tokio::select! {
        name = listen("SIGINT", tokio::signal::ctrl_c()) => name,
        name = listen("SIGTERM", terminate()) => name,
    };

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        signal = received,
        timeout_secs = shutdown_timeout.as_secs(),
        "Shutdown signal received, draining in-flight requests"
    );
}

async fn listen(name: &'static str, signal: impl Future<Output = io::Result<()>>) -> &'static str {
    if let Err(error) = signal.await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal = name,
            error = %error,
            "Failed to install signal handler"
        );
        pending::<()>().await;
    }
    name
}

#[cfg(unix)]
async fn terminate() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()> {
    pending().await
}
