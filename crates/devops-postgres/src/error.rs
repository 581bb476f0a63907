//! Error types for database operations.

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::result::{ConnectionError, Error};
use diesel_async::pooled_connection::PoolError as DieselPoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

/// Failure of a pool or query operation.
///
/// The readiness check reports its `Display` text verbatim.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Settings that cannot form a connection URL.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database operation timed out ({})", timeout_kind(.0))]
    Timeout(TimeoutType),

    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    #[error("Database query error: {0}")]
    Query(#[from] Error),

    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

fn timeout_kind(timeout: &TimeoutType) -> &'static str {
    match timeout {
        TimeoutType::Wait => "waiting for a pooled connection",
        TimeoutType::Create => "creating a new connection",
        TimeoutType::Recycle => "recycling a connection",
    }
}

impl From<DeadpoolError> for PgError {
    fn from(error: DeadpoolError) -> Self {
        match error {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(hook) => Self::Unexpected(hook.to_string().into()),
            // The pool is always built with `Runtime::Tokio1`.
            DeadpoolError::NoRuntimeSpecified => Self::Unexpected("No runtime specified".into()),
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_names_the_phase() {
        let error = PgError::Timeout(TimeoutType::Create);
        assert_eq!(
            error.to_string(),
            "Database operation timed out (creating a new connection)"
        );
    }

    #[test]
    fn wait_timeout_converts_from_pool() {
        let error = PgError::from(DeadpoolError::Timeout(TimeoutType::Wait));
        assert!(matches!(error, PgError::Timeout(TimeoutType::Wait)));
    }

    #[test]
    fn closed_pool_maps_to_connection_error() {
        let error = PgError::from(DeadpoolError::Closed);
        assert!(matches!(error, PgError::Connection(_)));
    }
}
