//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use devops_server::handler::{method_not_allowed, routes};
//! use devops_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use devops_server::service::{ServiceConfig, ServiceState};
//!
//! let state = ServiceState::from_config(&ServiceConfig::default());
//! let app: axum::Router = routes()
//!     .with_open_api(OpenApiConfig::default())
//!     .method_not_allowed_fallback(method_not_allowed)
//!     .with_state(state);
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod cache;
mod error;
mod monitors;
mod response;
mod users;

use aide::axum::ApiRouter;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{
    CacheEntry, ErrorResponse, Health, HealthStatus, Readiness, ReadinessStatus, User,
    UserCreated, UserList,
};
use crate::service::ServiceState;

/// Tracing target for unmatched routes.
const TRACING_TARGET: &str = "devops_server::handler::fallback";

async fn fallback(uri: Uri) -> Response {
    tracing::debug!(target: TRACING_TARGET, path = %uri.path(), "No route matched");
    ErrorKind::NotFound.into_response()
}

/// Answers a known path requested with an unsupported method.
///
/// aide's [`ApiRouter`] cannot carry it, so install it with
/// [`Router::method_not_allowed_fallback`] once every route is mounted.
///
/// [`Router::method_not_allowed_fallback`]: axum::Router::method_not_allowed_fallback
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    tracing::debug!(
        target: TRACING_TARGET,
        method = %method,
        path = %uri.path(),
        "Method not allowed"
    );
    ErrorKind::MethodNotAllowed.into_response()
}

/// Returns an [`ApiRouter`] with all routes and a JSON `404` fallback.
///
/// See [`method_not_allowed`] for the matching `405`.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(monitors::routes())
        .merge(users::routes())
        .merge(cache::routes())
        .fallback(fallback)
}
