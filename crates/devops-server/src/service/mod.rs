//! Application state, collaborator stores and the services built on them.

mod cache;
mod config;
mod health;
mod state;
pub mod store;

pub use crate::service::cache::CacheService;
pub use crate::service::config::ServiceConfig;
pub use crate::service::health::HealthService;
pub use crate::service::state::ServiceState;
pub use crate::service::store::{CacheStore, RelationalStore};
pub use crate::{Error, ErrorKind, Result};

/// Tracing target for service bootstrap.
pub const TRACING_TARGET_BOOTSTRAP: &str = "devops_server::service::bootstrap";

/// Tracing target for readiness checks.
pub const TRACING_TARGET_READINESS: &str = "devops_server::service::readiness";

/// Collaborator names used in errors and logs.
pub(crate) mod names {
    pub const REDIS: &str = "redis";
    pub const POSTGRES: &str = "postgres";
}
