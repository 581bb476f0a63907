use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use deadpool::managed::{Pool, Status};
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;

use super::{ConnectionPool, PooledConnection};
use crate::{PgConfig, PgError, PgResult, TRACING_TARGET_CONNECTION, TRACING_TARGET_QUERY};

/// Snapshot of the pool, logged once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgPoolStatus {
    pub max_size: usize,
    /// Open connections, idle or checked out.
    pub size: usize,
    /// Idle connections ready for checkout.
    pub available: usize,
    /// Callers blocked on a checkout.
    pub waiting: usize,
}

impl From<Status> for PgPoolStatus {
    fn from(status: Status) -> Self {
        Self {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
        }
    }
}

/// Checkouts slower than this are logged as a warning.
const SLOW_CHECKOUT: Duration = Duration::from_millis(100);

/// Handle to a shared PostgreSQL pool. Clones share the pool.
#[derive(Clone)]
pub struct PgClient {
    inner: Arc<PgClientInner>,
}

struct PgClientInner {
    pool: ConnectionPool,
    config: PgConfig,
}

impl PgClient {
    /// Builds the pool without connecting; the first [`PgClient::ping`] opens
    /// a connection.
    ///
    /// # Errors
    ///
    /// Fails when the URL cannot be assembled or deadpool rejects the pool
    /// settings.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CONNECTION,
        fields(database_url = %config.database_url_masked())
    )]
    pub fn new(config: PgConfig) -> PgResult<Self> {
        tracing::info!(target: TRACING_TARGET_CONNECTION, "Initializing database client");

        let manager = AsyncDieselConnectionManager::new(config.database_url()?);

        let timeout = config.connection_timeout();
        let pool = Pool::builder(manager)
            .max_size(config.postgres_max_connections as usize)
            .wait_timeout(Some(timeout))
            .create_timeout(Some(timeout))
            .recycle_timeout(Some(timeout))
            .runtime(deadpool::Runtime::Tokio1)
            .build()
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET_CONNECTION,
                    error = %error,
                    "Connection pool rejected its settings"
                );
                PgError::Unexpected(format!("Failed to build connection pool: {error}").into())
            })?;

        Ok(Self {
            inner: Arc::new(PgClientInner { pool, config }),
        })
    }

    /// Checks a connection out of the pool, opening one if none is idle.
    ///
    /// Waits up to the configured timeout.
    async fn get_connection(&self) -> PgResult<PooledConnection> {
        let start = Instant::now();
        let conn = self.inner.pool.get().await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                error = %e,
                elapsed = ?start.elapsed(),
                "Failed to acquire connection from pool"
            );
            PgError::from(e)
        })?;

        let elapsed = start.elapsed();
        if elapsed > SLOW_CHECKOUT {
            tracing::warn!(
                target: TRACING_TARGET_CONNECTION,
                elapsed = ?elapsed,
                "Connection acquisition took longer than expected"
            );
        }

        Ok(conn)
    }

    /// Runs `SELECT 1` on a pooled connection.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY)]
    pub async fn ping(&self) -> PgResult<()> {
        let mut conn = self.get_connection().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                tracing::warn!(target: TRACING_TARGET_QUERY, error = %e, "Connectivity check failed");
                PgError::from(e)
            })?;

        Ok(())
    }

    #[inline]
    pub fn pool_status(&self) -> PgPoolStatus {
        self.inner.pool.status().into()
    }

    #[inline]
    pub fn config(&self) -> &PgConfig {
        &self.inner.config
    }
}

impl fmt::Debug for PgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgClient")
            .field("database_url", &self.inner.config.database_url_masked())
            .field("pool", &self.pool_status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_lazy() {
        let client = PgConfig::default().with_max_connections(4).build().unwrap();
        let status = client.pool_status();
        assert_eq!(status.max_size, 4);
        assert_eq!(status.size, 0);
        assert_eq!(status.available, 0);
    }

    #[test]
    fn debug_masks_password() {
        let client = PgConfig::default()
            .with_credentials("app", "hunter2")
            .build()
            .unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("***"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn ping_fails_without_server() {
        let client = PgConfig::default()
            .with_host("127.0.0.1")
            .with_port(1)
            .with_connection_timeout_secs(1)
            .build()
            .unwrap();

        assert!(client.ping().await.is_err());
    }
}
