//! Application state and dependency injection.

use std::sync::Arc;

use crate::service::{
    CacheService, CacheStore, HealthService, RelationalStore, ServiceConfig,
    TRACING_TARGET_BOOTSTRAP,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). The collaborator
/// handles are established once and shared by every request.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    health_service: HealthService,
    cache_service: CacheService,
}

impl ServiceState {
    /// Creates a state with no collaborators.
    pub fn new(version: impl Into<Arc<str>>) -> Self {
        Self {
            health_service: HealthService::new(version),
            cache_service: CacheService::default(),
        }
    }

    /// Initializes application state from configuration.
    ///
    /// A collaborator whose client cannot be created is logged and left absent,
    /// so the server still starts and reports itself as not ready.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let mut state = Self::new(config.app_version.as_str());

        match config.connect_redis() {
            Ok(client) => {
                tracing::info!(
                    target: TRACING_TARGET_BOOTSTRAP,
                    redis = %client.config(),
                    "Redis client created"
                );
                state = state.with_cache_store(Arc::new(client));
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_BOOTSTRAP,
                    error = %error,
                    "Failed to initialize Redis, continuing without cache"
                );
            }
        }

        match config.connect_postgres() {
            Ok(client) => {
                tracing::info!(
                    target: TRACING_TARGET_BOOTSTRAP,
                    postgres = %client.config(),
                    pool_max_size = client.pool_status().max_size,
                    "PostgreSQL client created"
                );
                state = state.with_relational_store(Arc::new(client));
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET_BOOTSTRAP,
                    error = %error,
                    "Failed to initialize PostgreSQL, continuing without database"
                );
            }
        }

        state
    }

    /// Attaches a cache store.
    pub fn with_cache_store(self, store: Arc<dyn CacheStore>) -> Self {
        Self {
            health_service: self.health_service.with_cache(store.clone()),
            cache_service: CacheService::new(Some(store)),
        }
    }

    /// Attaches a relational store.
    pub fn with_relational_store(self, store: Arc<dyn RelationalStore>) -> Self {
        Self {
            health_service: self.health_service.with_database(store),
            ..self
        }
    }

    /// Returns the health service.
    #[inline]
    pub fn health_service(&self) -> &HealthService {
        &self.health_service
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(health_service: HealthService);
impl_di!(cache_service: CacheService);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn state_without_collaborators() {
        let state = ServiceState::new("1.0.0");
        let error = state.health_service().check_readiness().await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn state_from_default_config_has_collaborators() {
        let state = ServiceState::from_config(&ServiceConfig::default());
        assert_eq!(state.health_service().version(), "1.0.0");
        assert!(state.cache_service.is_available());
    }
}
