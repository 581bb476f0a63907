//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - OpenAPI documentation with the Scalar UI ([`RouterOpenApiExt`])
//! - Request IDs and request tracing ([`RouterObservabilityExt`])
//! - Timeouts and panic recovery ([`RouterRecoveryExt`])
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use devops_server::handler::routes;
//! use devops_server::middleware::*;
//! use devops_server::service::ServiceState;
//!
//! let app: axum::Router = routes()
//!     .with_open_api(OpenApiConfig::default())
//!     .with_recovery(&RecoveryConfig::default())
//!     .with_observability()
//!     .with_state(ServiceState::new("1.0.0"));
//! ```

mod observability;
mod recovery;
mod specification;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
