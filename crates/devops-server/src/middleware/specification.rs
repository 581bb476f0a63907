//! Generated OpenAPI document and the Scalar reference page.
//!
//! The document is generated from the aide [`ApiRouter`] once, at router
//! construction, and served as a shared [`Extension`].
//!
//! [`ApiRouter`]: aide::axum::ApiRouter

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Where the API document and its reference page are mounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Route serving the generated OpenAPI JSON.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Route serving the Scalar reference page.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Turns a documented [`ApiRouter`] into a plain router that also serves its docs.
///
/// [`ApiRouter`]: aide::axum::ApiRouter
pub trait RouterOpenApiExt<S> {
    /// Mounts the OpenAPI JSON and Scalar UI routes and finishes the router.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = OpenApi {
            info: api_info(),
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

fn api_info() -> Info {
    Info {
        title: "DevOps App API".to_owned(),
        summary: Some("Health checks, demo users and cache lookups".to_owned()),
        description: Some(
            "Liveness and readiness checks across Redis and PostgreSQL, a fixed \
            demo user listing and read access to the Redis cache."
                .to_owned(),
        ),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        ..Info::default()
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;
    use crate::handler::routes;
    use crate::service::ServiceState;

    #[tokio::test]
    async fn serves_openapi_document() -> anyhow::Result<()> {
        let app = routes()
            .with_open_api(OpenApiConfig::default())
            .with_state(ServiceState::new("1.0.0"));
        let server = TestServer::new(app)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let document = response.json::<serde_json::Value>();
        assert_eq!(document["info"]["title"], "DevOps App API");
        assert!(document["paths"]["/health"].is_object());
        assert!(document["paths"]["/ready"].is_object());
        assert!(document["paths"]["/api/users"].is_object());
        assert!(document["paths"]["/api/cache/{key}"].is_object());
        Ok(())
    }

    #[tokio::test]
    async fn serves_scalar_ui() -> anyhow::Result<()> {
        let app = routes()
            .with_open_api(OpenApiConfig::default())
            .with_state(ServiceState::new("1.0.0"));
        let server = TestServer::new(app)?;

        server.get("/api/scalar").await.assert_status_ok();
        Ok(())
    }
}
