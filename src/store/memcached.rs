//! Memcached store implementation.
//!
//! This is the store a front proxy (e.g. nginx with a memcached module)
//! reads from directly. Values go on the wire as the raw response-body
//! bytes — no record wrapper, no codec — so the proxy can serve them
//! without unwrapping anything. TTL enforcement is memcached's own.
//!
//! # Example
//!
//! ```no_run
//! use edge_cache_gateway::store::memcached::MemcachedStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemcachedStore::connect("127.0.0.1:11211").await?;
//! # Ok(())
//! # }
//! ```

use async_memcached::{AsciiProtocol, Client, Error as MemcachedError, Status};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::CacheStore;
use crate::error::CacheError;

/// Memcached [`CacheStore`].
///
/// Cheap to clone; clones share one underlying connection.
#[derive(Clone)]
pub struct MemcachedStore {
    client: Arc<Mutex<Client>>,
    namespace: Option<String>,
}

impl MemcachedStore {
    /// Connects to a single memcached server (e.g. `"127.0.0.1:11211"`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::StoreUnavailable`] if the connection fails.
    pub async fn connect(server: impl AsRef<str>) -> Result<Self, CacheError> {
        let client = Client::new(server.as_ref())
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("memcached connect failed: {e}")))?;

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            namespace: None,
        })
    }

    /// Sets a key-prefix namespace (`"{namespace}:{key}"`).
    ///
    /// The proxy reading this store must prepend the same prefix when it
    /// derives keys, so only set one if the proxy configuration agrees.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    fn make_key(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_owned(),
        }
    }
}

#[async_trait]
impl CacheStore for MemcachedStore {
    async fn set(&self, key: String, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        if ttl.is_zero() {
            return Ok(());
        }

        let namespaced_key = self.make_key(&key);
        // Memcached TTLs are u32 seconds.
        let ttl_secs = ttl.as_secs().min(u32::MAX as u64);

        let mut client = self.client.lock().await;
        client
            .set(
                namespaced_key.as_bytes(),
                value.as_ref(),
                Some(ttl_secs as i64),
                Default::default(),
            )
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("memcached set failed: {e}")))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        let namespaced_key = self.make_key(key);
        let mut client = self.client.lock().await;

        let value = client
            .get(namespaced_key.as_bytes())
            .await
            .map_err(|e| CacheError::StoreUnavailable(format!("memcached get failed: {e}")))?;

        match value {
            Some(data) => {
                let bytes = data.data.ok_or_else(|| {
                    CacheError::StoreUnavailable("memcached value has no data".to_owned())
                })?;
                Ok(Some(Bytes::from(bytes)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let namespaced_key = self.make_key(key);
        let mut client = self.client.lock().await;

        // A miss on delete keeps invalidation idempotent.
        match client.delete(namespaced_key.as_bytes()).await {
            Ok(_) => Ok(()),
            Err(MemcachedError::Protocol(Status::NotFound)) => Ok(()),
            Err(e) => Err(CacheError::StoreUnavailable(format!(
                "memcached delete failed: {e}"
            ))),
        }
    }
}
