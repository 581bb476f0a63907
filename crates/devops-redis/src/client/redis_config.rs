//! Key-value store connection configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{RedisClient, RedisError, RedisResult, TRACING_TARGET_CLIENT};

/// Redis connection configuration.
///
/// ## Example
///
/// ```rust,no_run
/// use devops_redis::RedisConfig;
///
/// let client = RedisConfig::new("localhost", 6379).build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "redis configurations must be used to create clients"]
pub struct RedisConfig {
    /// Redis server hostname or IP address
    #[cfg_attr(
        feature = "config",
        arg(long = "redis-host", env = "REDIS_HOST", default_value = "localhost")
    )]
    pub redis_host: String,

    /// Redis server port
    #[cfg_attr(
        feature = "config",
        arg(long = "redis-port", env = "REDIS_PORT", default_value_t = 6379)
    )]
    pub redis_port: u16,

    /// Upper bound in seconds for connecting and running a single command (1-60)
    #[cfg_attr(
        feature = "config",
        arg(
            long = "redis-timeout-secs",
            env = "REDIS_TIMEOUT_SECS",
            default_value_t = 5
        )
    )]
    pub redis_timeout_secs: u64,
}

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 60;

impl RedisConfig {
    /// Creates a new configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            redis_host: host.into(),
            redis_port: port,
            redis_timeout_secs: 5,
        }
    }

    /// Sets the command timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.redis_timeout_secs = secs;
        self
    }

    /// Returns the command timeout as a Duration.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.redis_timeout_secs)
    }

    /// Returns the connection URL understood by the redis driver.
    pub fn redis_url(&self) -> String {
        // IPv6 literals need brackets inside a URL authority.
        if self.redis_host.contains(':') && !self.redis_host.starts_with('[') {
            format!("redis://[{}]:{}/", self.redis_host, self.redis_port)
        } else {
            format!("redis://{}:{}/", self.redis_host, self.redis_port)
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RedisResult<()> {
        if self.redis_host.trim().is_empty() {
            return Err(RedisError::Config("redis_host cannot be empty".to_string()));
        }

        if self.redis_port == 0 {
            return Err(RedisError::Config("redis_port cannot be 0".to_string()));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.redis_timeout_secs) {
            return Err(RedisError::Config(format!(
                "redis_timeout_secs must be between {} and {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// Validates the configuration and builds a new client.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_CLIENT)]
    pub fn build(self) -> RedisResult<RedisClient> {
        tracing::debug!(target: TRACING_TARGET_CLIENT, "Validating redis configuration");
        self.validate()?;
        RedisClient::new(self)
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::new("localhost", 6379)
    }
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field("redis_timeout_secs", &self.redis_timeout_secs)
            .finish()
    }
}

impl fmt::Display for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RedisConfig(url: {}, timeout: {}s)",
            self.redis_url(),
            self.redis_timeout_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RedisConfig::default();
        assert_eq!(config.redis_host, "localhost");
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn redis_url_from_host_and_port() {
        let config = RedisConfig::new("cache.internal", 6380);
        assert_eq!(config.redis_url(), "redis://cache.internal:6380/");
    }

    #[test]
    fn redis_url_brackets_ipv6() {
        let config = RedisConfig::new("::1", 6379);
        assert_eq!(config.redis_url(), "redis://[::1]:6379/");
    }

    #[test]
    fn validation() {
        assert!(RedisConfig::new("", 6379).validate().is_err());
        assert!(RedisConfig::new("localhost", 0).validate().is_err());
        assert!(
            RedisConfig::default()
                .with_timeout_secs(0)
                .validate()
                .is_err()
        );
        assert!(
            RedisConfig::default()
                .with_timeout_secs(120)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn build_is_lazy() {
        // No server is listening here; construction must still succeed.
        let client = RedisConfig::new("127.0.0.1", 1).build();
        assert!(client.is_ok());
    }
}
