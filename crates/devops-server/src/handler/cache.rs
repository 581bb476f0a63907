//! Cache lookup handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::{Json, Path};
use crate::handler::response::{CacheEntry, ErrorResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{CacheService, ServiceState};

/// Tracing target for cache operations.
const TRACING_TARGET: &str = "devops_server::handler::cache";

/// Path parameters for cache lookups.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CacheKeyPathParams {
    /// Key to look up.
    pub key: String,
}

/// Reads a value from the cache.
#[tracing::instrument(skip_all, fields(key = %path_params.key))]
async fn get_cache_value(
    State(cache_service): State<CacheService>,
    Path(path_params): Path<CacheKeyPathParams>,
) -> Result<(StatusCode, Json<CacheEntry>)> {
    let key = path_params.key;
    let Some(value) = cache_service.get(&key).await? else {
        tracing::debug!(target: TRACING_TARGET, "Cache miss");
        return Err(ErrorKind::NotFound.with_message("Key not found"));
    };

    tracing::debug!(target: TRACING_TARGET, "Cache hit");
    Ok((StatusCode::OK, Json(CacheEntry { key, value })))
}

fn get_cache_value_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get cached value")
        .description("Returns the value stored in Redis under the given key.")
        .response::<200, Json<CacheEntry>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<500, Json<ErrorResponse>>()
        .response::<503, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with the cache routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/api/cache/{key}",
            get_with(get_cache_value, get_cache_value_docs),
        )
        .with_path_items(|item| item.tag("Cache"))
}
