//! Deterministic in-memory collaborators for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{CacheStore, RelationalStore};
use crate::service::names;
use crate::{Error, Result};

/// In-memory cache store.
#[derive(Debug, Default)]
pub struct MockCache {
    entries: HashMap<String, String>,
    failure: Option<String>,
}

impl MockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Makes every call fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            entries: HashMap::new(),
            failure: Some(message.to_owned()),
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::external(names::REDIS, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CacheStore for MockCache {
    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }
}

/// Relational store that either always answers or always fails.
#[derive(Debug, Default)]
pub struct MockDatabase {
    failure: Option<String>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_owned()),
        }
    }
}

#[async_trait]
impl RelationalStore for MockDatabase {
    async fn ping(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::external(names::POSTGRES, message.clone())),
            None => Ok(()),
        }
    }
}
