//! Error types for key-value store operations.

use std::time::Duration;

/// Error type for all Redis client operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "redis errors should be handled appropriately"]
pub enum RedisError {
    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The command did not complete within the configured timeout.
    #[error("Redis command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection or command failure reported by the driver.
    #[error("{0}")]
    Client(#[from] redis::RedisError),
}

/// Specialized [`Result`] type for Redis operations.
pub type RedisResult<T, E = RedisError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message() {
        let error = RedisError::Timeout(Duration::from_secs(5));
        assert_eq!(error.to_string(), "Redis command timed out after 5s");
    }

    #[test]
    fn config_message() {
        let error = RedisError::Config("redis_host cannot be empty".into());
        assert_eq!(
            error.to_string(),
            "Configuration error: redis_host cannot be empty"
        );
    }
}
