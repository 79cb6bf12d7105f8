//! Key-value stores backing the gateway.
//!
//! The gateway requires a [`CacheStore`] implementation to hold published
//! response bodies. This module ships with:
//! - [`memory::MemoryStore`] — a process-local store backed by [`moka`],
//!   used by tests and single-process deployments.
//! - `memcached::MemcachedStore` *(optional)* — a shared store the front
//!   proxy can read directly, enabled by the `memcached-backend` feature.
//!
//! Entries are raw response-body bytes with no serialization envelope, so an
//! out-of-band reader that derives the same key gets the body verbatim.
//! Expiry is the store's job; the gateway never re-checks TTLs.

pub mod memory;

#[cfg(feature = "memcached-backend")]
pub mod memcached;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::error::CacheError;

/// Capability set the gateway needs from a key-value store.
#[async_trait]
pub trait CacheStore: Send + Sync + Clone + 'static {
    /// Stores `value` under `key` for `ttl`, overwriting any existing entry.
    async fn set(&self, key: String, value: Bytes, ttl: Duration) -> Result<(), CacheError>;

    /// Fetches the bytes stored under `key`.
    ///
    /// Returns `Ok(None)` when the store has no value or the entry has
    /// expired. Publish and invalidate never call this; it exists for tests
    /// and for parity with the out-of-band proxy reader.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    /// Removes the entry for `key`, if present.
    ///
    /// Deleting a key that was never stored is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
