use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::{RedisConfig, RedisError, RedisResult, TRACING_TARGET_CLIENT, TRACING_TARGET_COMMAND};

/// Redis client shared across request handlers.
///
/// Construction never touches the network. Each command opens a multiplexed
/// connection and the whole exchange is bounded by [`RedisConfig::timeout`].
#[derive(Clone)]
pub struct RedisClient {
    inner: Arc<RedisClientInner>,
}

struct RedisClientInner {
    client: redis::Client,
    config: RedisConfig,
}

impl RedisClient {
    /// Creates a new client with the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection URL derived from the configuration is invalid.
    #[tracing::instrument(
        skip(config),
        target = TRACING_TARGET_CLIENT,
        fields(redis_url = %config.redis_url())
    )]
    pub fn new(config: RedisConfig) -> RedisResult<Self> {
        tracing::info!(target: TRACING_TARGET_CLIENT, "Initializing redis client");

        let client = redis::Client::open(config.redis_url()).map_err(|e| {
            tracing::error!(target: TRACING_TARGET_CLIENT, error = %e, "Failed to create redis client");
            RedisError::from(e)
        })?;

        Ok(Self {
            inner: Arc::new(RedisClientInner { client, config }),
        })
    }

    /// Sends `PING` and waits for the reply.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_COMMAND)]
    pub async fn ping(&self) -> RedisResult<()> {
        self.run("PING", async {
            let mut conn = self.connection().await?;
            let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(())
        })
        .await
    }

    /// Reads the string stored under `key`, returning `None` when the key is absent.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_COMMAND)]
    pub async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        self.run("GET", async {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok::<_, redis::RedisError>(value)
        })
        .await
    }

    /// Gets the configuration used by this client.
    #[inline]
    pub fn config(&self) -> &RedisConfig {
        &self.inner.config
    }

    async fn connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.inner.client.get_multiplexed_async_connection().await
    }

    /// Runs a command future under the configured timeout.
    async fn run<T, F>(&self, command: &'static str, future: F) -> RedisResult<T>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        let timeout = self.inner.config.timeout();
        let start = Instant::now();

        let result = match tokio::time::timeout(timeout, future).await {
            Ok(result) => result.map_err(RedisError::from),
            Err(_elapsed) => Err(RedisError::Timeout(timeout)),
        };

        match &result {
            Ok(_) => {
                tracing::debug!(
                    target: TRACING_TARGET_COMMAND,
                    command,
                    elapsed = ?start.elapsed(),
                    "Command completed"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_COMMAND,
                    command,
                    error = %error,
                    elapsed = ?start.elapsed(),
                    "Command failed"
                );
            }
        }

        result
    }
}

impl fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisClient")
            .field("redis_url", &self.inner.config.redis_url())
            .field("timeout_secs", &self.inner.config.redis_timeout_secs)
            .finish()
    }
}
