use async_trait::async_trait;
use devops_redis::{RedisClient, RedisError};

use super::CacheStore;
use crate::service::names;
use crate::{Error, Result};

fn into_service_error(error: RedisError) -> Error {
    Error::external(names::REDIS, error.to_string()).with_source(error)
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn ping(&self) -> Result<()> {
        RedisClient::ping(self).await.map_err(into_service_error)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        RedisClient::get(self, key).await.map_err(into_service_error)
    }
}
