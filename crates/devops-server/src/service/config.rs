#[cfg(feature = "config")]
use clap::Args;
use devops_postgres::{PgClient, PgConfig};
use devops_redis::{RedisClient, RedisConfig};
use serde::{Deserialize, Serialize};

use crate::service::names;
use crate::{Error, Result};

/// Default version reported by the liveness check.
const DEFAULT_APP_VERSION: &str = "1.0.0";

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Version reported by the liveness check.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "APP_VERSION", default_value = DEFAULT_APP_VERSION)
    )]
    pub app_version: String,

    /// Redis connection settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub redis_config: RedisConfig,

    /// PostgreSQL connection settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub postgres_config: PgConfig,
}

impl ServiceConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.app_version.trim().is_empty() {
            return Err(Error::config("Application version cannot be empty"));
        }

        self.redis_config.validate().map_err(|e| {
            Error::config(format!("Invalid Redis configuration: {e}")).with_service(names::REDIS)
        })?;

        self.postgres_config.validate().map_err(|e| {
            Error::config(format!("Invalid PostgreSQL configuration: {e}"))
                .with_service(names::POSTGRES)
        })?;

        Ok(())
    }

    /// Creates the Redis client.
    ///
    /// The underlying connection is opened lazily on the first command.
    pub fn connect_redis(&self) -> Result<RedisClient> {
        self.redis_config.clone().build().map_err(|e| {
            Error::external(names::REDIS, format!("Failed to create Redis client: {e}"))
                .with_source(e)
        })
    }

    /// Creates the PostgreSQL connection pool.
    ///
    /// Connections are opened lazily when first checked out.
    pub fn connect_postgres(&self) -> Result<PgClient> {
        self.postgres_config.clone().build().map_err(|e| {
            Error::external(
                names::POSTGRES,
                format!("Failed to create PostgreSQL client: {e}"),
            )
            .with_source(e)
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            app_version: DEFAULT_APP_VERSION.to_owned(),
            redis_config: RedisConfig::default(),
            postgres_config: PgConfig::default(),
        }
    }
}
