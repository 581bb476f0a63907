use std::fmt;
use std::sync::Arc;

use super::names;
use crate::service::CacheStore;
use crate::{Error, Result};

/// Read-through access to the cache store.
#[derive(Clone, Default)]
pub struct CacheService {
    store: Option<Arc<dyn CacheStore>>,
}

impl CacheService {
    /// Creates a cache service over the given store, if one is available.
    pub fn new(store: Option<Arc<dyn CacheStore>>) -> Self {
        Self { store }
    }

    /// Returns whether a cache store was established.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Looks up `key`.
    ///
    /// Empty values are reported as absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| Error::unavailable(names::REDIS, "Redis not available"))?;

        let value = store.get(key).await?;
        Ok(value.filter(|value| !value.is_empty()))
    }
}

impl fmt::Debug for CacheService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheService")
            .field("available", &self.is_available())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::service::store::mock::MockCache;

    #[tokio::test]
    async fn unavailable_without_store() {
        let error = CacheService::default().get("key").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unavailable);
        assert_eq!(error.message(), "Redis not available");
    }

    #[tokio::test]
    async fn returns_stored_value() -> anyhow::Result<()> {
        let store = MockCache::new().with_entry("greeting", "hello");
        let service = CacheService::new(Some(Arc::new(store)));
        assert_eq!(service.get("greeting").await?, Some("hello".to_owned()));
        assert_eq!(service.get("missing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn empty_value_is_absent() -> anyhow::Result<()> {
        let store = MockCache::new().with_entry("blank", "");
        let service = CacheService::new(Some(Arc::new(store)));
        assert_eq!(service.get("blank").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn lookup_failure_is_external() {
        let service = CacheService::new(Some(Arc::new(MockCache::failing("timed out"))));
        let error = service.get("key").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.message(), "timed out");
    }
}
