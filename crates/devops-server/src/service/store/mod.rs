//! Narrow interfaces over the external collaborators.
//!
//! Handlers never see a Redis or Postgres client directly. They go through
//! [`CacheStore`] and [`RelationalStore`], which keeps the production clients
//! swappable for in-memory doubles.

mod postgres;
mod redis;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;

use crate::Result;

/// Key-value store used as a cache.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Checks that the store answers.
    async fn ping(&self) -> Result<()>;

    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// Relational database.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Runs a trivial query to check that the database answers.
    async fn ping(&self) -> Result<()>;
}
