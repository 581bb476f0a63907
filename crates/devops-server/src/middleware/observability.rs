//! Request IDs and request tracing.

use axum::Router;
use axum::http::header;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request ID.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates an `x-request-id` for requests that lack one, opens a tracing
    /// span per request and echoes the ID on the response. Credential headers
    /// are redacted from logs.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
    use crate::service::ServiceState;

    fn server() -> anyhow::Result<TestServer> {
        let app = routes()
            .with_open_api(OpenApiConfig::default())
            .with_observability()
            .with_state(ServiceState::new("1.0.0"));
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn generates_request_id() -> anyhow::Result<()> {
        let response = server()?.get("/health").await;
        response.assert_status_ok();

        let request_id = response.header(REQUEST_ID_HEADER);
        assert!(!request_id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn propagates_request_id() -> anyhow::Result<()> {
        let response = server()?
            .get("/health")
            .add_header(
                header::HeaderName::from_static(REQUEST_ID_HEADER),
                header::HeaderValue::from_static("abc-123"),
            )
            .await;

        assert_eq!(response.header(REQUEST_ID_HEADER), "abc-123");
        Ok(())
    }
}
