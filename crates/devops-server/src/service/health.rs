use std::fmt;
use std::sync::Arc;

use super::names;
use crate::service::{CacheStore, RelationalStore, TRACING_TARGET_READINESS};
use crate::{Error, Result};

/// Liveness and readiness reporting.
///
/// Readiness checks the cache store first, then the relational store, and
/// stops at the first failure. A collaborator that was never established
/// counts as a failed check.
#[derive(Clone)]
pub struct HealthService {
    version: Arc<str>,
    cache: Option<Arc<dyn CacheStore>>,
    database: Option<Arc<dyn RelationalStore>>,
}

impl HealthService {
    /// Creates a health service without any collaborators.
    pub fn new(version: impl Into<Arc<str>>) -> Self {
        Self {
            version: version.into(),
            cache: None,
            database: None,
        }
    }

    /// Attaches the cache store to check.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Attaches the relational store to check.
    pub fn with_database(mut self, database: Arc<dyn RelationalStore>) -> Self {
        self.database = Some(database);
        self
    }

    /// Returns the configured application version.
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Checks the collaborators in order and returns the first failure.
    pub async fn check_readiness(&self) -> Result<()> {
        let Some(cache) = self.cache.as_ref() else {
            return Err(Error::unavailable(names::REDIS, "Redis not available"));
        };

        if let Err(error) = cache.ping().await {
            tracing::warn!(
                target: TRACING_TARGET_READINESS,
                error = %error,
                service = names::REDIS,
                "Cache check failed"
            );
            tracing::debug!(
                target: TRACING_TARGET_READINESS,
                service = names::POSTGRES,
                "Skipping remaining checks"
            );
            return Err(error);
        }

        let Some(database) = self.database.as_ref() else {
            return Err(Error::unavailable(
                names::POSTGRES,
                "PostgreSQL not available",
            ));
        };

        if let Err(error) = database.ping().await {
            tracing::warn!(
                target: TRACING_TARGET_READINESS,
                error = %error,
                service = names::POSTGRES,
                "Database check failed"
            );
            return Err(error);
        }

        tracing::debug!(target: TRACING_TARGET_READINESS, "All checks succeeded");
        Ok(())
    }
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService")
            .field("version", &self.version)
            .field("cache", &self.cache.is_some())
            .field("database", &self.database.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::service::store::mock::{MockCache, MockDatabase};

    fn service(cache: MockCache, database: MockDatabase) -> HealthService {
        HealthService::new("1.0.0")
            .with_cache(Arc::new(cache))
            .with_database(Arc::new(database))
    }

    #[tokio::test]
    async fn ready_when_both_checks_succeed() {
        let service = service(MockCache::new(), MockDatabase::new());
        assert!(service.check_readiness().await.is_ok());
    }

    #[tokio::test]
    async fn reports_only_first_failure() {
        let service = service(
            MockCache::failing("cache down"),
            MockDatabase::failing("database down"),
        );

        let error = service.check_readiness().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.message(), "cache down");
    }

    #[tokio::test]
    async fn database_failure_after_cache_success() {
        let service = service(MockCache::new(), MockDatabase::failing("database down"));

        let error = service.check_readiness().await.unwrap_err();
        assert_eq!(error.service(), Some("postgres"));
        assert_eq!(error.message(), "database down");
    }

    #[tokio::test]
    async fn missing_collaborators_are_not_ready() {
        let error = HealthService::new("1.0.0")
            .check_readiness()
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unavailable);
        assert_eq!(error.message(), "Redis not available");

        let error = HealthService::new("1.0.0")
            .with_cache(Arc::new(MockCache::new()))
            .check_readiness()
            .await
            .unwrap_err();
        assert_eq!(error.message(), "PostgreSQL not available");
    }

    #[test]
    fn debug_hides_collaborators() {
        let debug = format!("{:?}", HealthService::new("2.1.0"));
        assert!(debug.contains("2.1.0"));
        assert!(debug.contains("cache: false"));
    }
}
