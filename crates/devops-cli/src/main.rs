#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use devops_server::handler::{method_not_allowed, routes};
use devops_server::middleware::{RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt};
use devops_server::service::ServiceState;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "devops_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "devops_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "devops_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    cli.validate()?;
    cli.log();

    let state = ServiceState::from_config(&cli.service);
    check_readiness(&state).await;

    let router = create_router(state, &cli.middleware);
    server::serve(router, cli.server)
        .await
        .context("server terminated abnormally")?;

    Ok(())
}

/// Runs one readiness check so misconfigured dependencies show up in the logs.
///
/// The outcome never prevents the server from starting.
async fn check_readiness(state: &ServiceState) {
    match state.health_service().check_readiness().await {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                "dependencies are ready"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_STARTUP,
                error = %error,
                service = ?error.service(),
                "dependencies are not ready, serving anyway"
            );
        }
    }
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost): catches panics and enforces timeouts
/// 2. Observability: request IDs and tracing spans
/// 3. Routes (innermost): handlers, OpenAPI document and the JSON 404/405 fallbacks
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_open_api(middleware.openapi.clone())
        .method_not_allowed_fallback(method_not_allowed)
        .with_observability()
        .with_recovery(&middleware.recovery)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use clap::Parser;
    use devops_server::middleware::{OpenApiConfig, RecoveryConfig};
    use serde_json::{Value, json};

    use super::*;

    fn test_server(state: ServiceState) -> anyhow::Result<TestServer> {
        let middleware = MiddlewareConfig {
            openapi: OpenApiConfig::default(),
            recovery: RecoveryConfig::default(),
        };
        Ok(TestServer::new(create_router(state, &middleware))?)
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() -> anyhow::Result<()> {
        let server = test_server(ServiceState::new("1.0.0"))?;

        let response = server.get("/invalid/endpoint").await;
        response.assert_status_not_found();
        response.assert_header("content-type", "application/json");
        response.assert_json(&json!({ "error": "Resource not found" }));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_method_is_json_405() -> anyhow::Result<()> {
        let server = test_server(ServiceState::new("1.0.0"))?;

        for response in [
            server.delete("/api/users").await,
            server.post("/health").await,
            server.post("/api/openapi.json").await,
        ] {
            response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
            response.assert_header("content-type", "application/json");
            response.assert_json(&json!({ "error": "Method not allowed" }));
        }
        Ok(())
    }

    #[tokio::test]
    async fn serves_openapi_document() -> anyhow::Result<()> {
        let server = test_server(ServiceState::new("1.0.0"))?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();
        let document = response.json::<Value>();
        assert!(document["paths"]["/health"].is_object());
        assert!(document["paths"]["/api/cache/{key}"].is_object());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_collaborator_settings_still_serve() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["devops-app", "--postgres-max-connections", "0"])?;
        cli.validate()?;
        let server = test_server(ServiceState::from_config(&cli.service))?;

        let health = server.get("/health").await;
        health.assert_status_ok();
        assert_eq!(health.json::<Value>()["version"], "1.0.0");

        let ready = server.get("/ready").await;
        ready.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ready.json::<Value>()["status"], "not ready");
        Ok(())
    }
}
