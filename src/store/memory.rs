use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use std::time::{Duration, SystemTime};

use super::CacheStore;
use crate::error::CacheError;

/// An in-memory [`CacheStore`] implementation backed by [`moka`].
///
/// The store is cheap to clone and shares a single underlying cache. There
/// is no out-of-band reader for a process-local store, so this is mostly
/// useful for tests and for deployments where the serving process and the
/// "proxy" are the same binary.
#[derive(Clone)]
pub struct MemoryStore {
    cache: Cache<String, StoredValue>,
}

#[derive(Clone)]
struct StoredValue {
    value: Bytes,
    expires_at: SystemTime,
}

impl MemoryStore {
    /// Creates a new in-memory store holding at most `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self { cache }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn set(&self, key: String, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Ok(());
        }

        let stored = StoredValue {
            value,
            expires_at: SystemTime::now() + ttl,
        };
        self.cache.insert(key, stored).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        if let Some(stored) = self.cache.get(key).await {
            if SystemTime::now() > stored.expires_at {
                self.cache.invalidate(key).await;
                return Ok(None);
            }
            Ok(Some(stored.value.clone()))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.cache.invalidate(key).await;
        Ok(())
    }
}
