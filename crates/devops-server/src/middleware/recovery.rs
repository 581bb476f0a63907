//! Request timeouts and panic recovery.
//!
//! Both failures leave the server as the same JSON `500` envelope the handlers
//! produce, so clients never see an empty body.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "devops_server::middleware::recovery";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Request timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run before it is answered with a `500`.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RecoveryConfig {
    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Extension trait for `axum::`[`Router`] to apply recovery middleware.
pub trait RouterRecoveryExt<S> {
    /// Bounds every request by the configured timeout and turns panics into
    /// JSON errors.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(middleware_error))
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
    }
}

async fn middleware_error(error: BoxError) -> Error {
    if error.is::<Elapsed>() {
        tracing::error!(target: TRACING_TARGET, "Request timeout exceeded");
        return ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("request cancelled by the timeout layer");
    }

    tracing::error!(target: TRACING_TARGET, error = %error, "Middleware failed");
    ErrorKind::InternalServerError
        .with_message("An unexpected error occurred")
        .with_context(error.to_string())
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(target: TRACING_TARGET, panic = detail, "Handler panicked");

    ErrorKind::InternalServerError
        .with_message("An unexpected panic occurred")
        .with_context(detail.to_owned())
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    fn server() -> anyhow::Result<TestServer> {
        let app = Router::new()
            .route("/slow", get(slow))
            .route("/boom", get(boom))
            .with_recovery(&RecoveryConfig { request_timeout: 1 });
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn timeout_becomes_json_error() -> anyhow::Result<()> {
        let response = server()?.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&serde_json::json!({ "error": "Request timeout" }));
        Ok(())
    }

    #[tokio::test]
    async fn panic_becomes_json_error() -> anyhow::Result<()> {
        let response = server()?.get("/boom").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&serde_json::json!({ "error": "An unexpected panic occurred" }));
        Ok(())
    }

    #[test]
    fn default_timeout() {
        assert_eq!(
            RecoveryConfig::default().request_timeout(),
            Duration::from_secs(30)
        );
    }
}
