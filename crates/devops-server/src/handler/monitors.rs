//! Liveness and readiness check handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{Health, Readiness};
use crate::service::{HealthService, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "devops_server::handler::monitors";

/// Reports that the process is alive.
#[tracing::instrument(skip_all)]
async fn health(State(health_service): State<HealthService>) -> Result<(StatusCode, Json<Health>)> {
    tracing::trace!(target: TRACING_TARGET, "Health check requested");
    Ok((StatusCode::OK, Json(Health::now(health_service.version()))))
}

fn health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Liveness check")
        .description("Always succeeds while the process is running. Does not contact any dependency.")
        .response::<200, Json<Health>>()
}

/// Reports whether the dependencies answer.
#[tracing::instrument(skip_all)]
async fn readiness(
    State(health_service): State<HealthService>,
) -> Result<(StatusCode, Json<Readiness>)> {
    match health_service.check_readiness().await {
        Ok(()) => {
            tracing::debug!(target: TRACING_TARGET, "Service is ready");
            Ok((StatusCode::OK, Json(Readiness::ready())))
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                service = ?error.service(),
                "Readiness check failed"
            );
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness::not_ready(error.message())),
            ))
        }
    }
}

fn readiness_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Readiness check")
        .description(
            "Pings Redis, then runs `SELECT 1` against PostgreSQL. \
            Only the first failing check is reported.",
        )
        .response::<200, Json<Readiness>>()
        .response::<503, Json<Readiness>>()
}

/// Returns a [`Router`] with the check routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health, health_docs))
        .api_route("/ready", get_with(readiness, readiness_docs))
        .with_path_items(|item| item.tag("Monitors"))
}
