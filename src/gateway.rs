//! Publish/invalidate gateway for front-cached responses.
//!
//! The gateway sits between a request-handling pipeline and the key-value
//! store a front proxy reads from. After the pipeline renders a response it
//! calls [`CacheGateway::publish`]; anything that knows a path and version
//! tag can call [`CacheGateway::invalidate`]. The gateway itself holds no
//! entry state — it derives keys, talks to the store, and hands the version
//! tag back to the caller through a side-channel writer.
//!
//! Both operations are single-shot and the gateway's configuration is
//! immutable after construction, so a clone can be used from any number of
//! request-handling tasks without synchronization. Dropping an in-flight
//! future cancels the store call, which degrades to the same outcome as
//! [`CacheError::StoreUnavailable`]: the response is served uncached.

use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::key::{derive_key, DEFAULT_MARKER_NAME, DEFAULT_TTL_SECS};
use crate::store::CacheStore;

/// Per-call overrides for [`CacheGateway::publish`].
///
/// The version tag is received already computed: the origin's
/// version-tag-from-request function is framework-specific and runs on the
/// caller's side, not here.
#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    ttl: Option<Duration>,
    marker_name: Option<String>,
    version_tag: Option<String>,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the gateway's default TTL for this publish.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Overrides the gateway's default marker name for this publish.
    pub fn marker_name(mut self, name: impl Into<String>) -> Self {
        self.marker_name = Some(name.into());
        self
    }

    /// Sets the version tag partitioning this entry. Empty means unversioned.
    pub fn version_tag(mut self, tag: impl Into<String>) -> Self {
        self.version_tag = Some(tag.into());
        self
    }
}

/// Builder for [`CacheGateway`] instances.
pub struct CacheGatewayBuilder<S> {
    store: S,
    ttl: Duration,
    marker_name: String,
}

impl<S> CacheGatewayBuilder<S>
where
    S: CacheStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            marker_name: DEFAULT_MARKER_NAME.to_owned(),
        }
    }

    /// Sets the default TTL applied when a publish carries no override.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the default version-marker name (cookie or header name).
    pub fn marker_name(mut self, name: impl Into<String>) -> Self {
        self.marker_name = name.into();
        self
    }

    pub fn build(self) -> CacheGateway<S> {
        CacheGateway {
            store: self.store,
            ttl: self.ttl,
            marker_name: self.marker_name,
        }
    }
}

/// Hands rendered responses to the store a front proxy reads from.
///
/// Cloning is as cheap as cloning the store handle; clones share the same
/// backing store.
#[derive(Clone)]
pub struct CacheGateway<S> {
    store: S,
    ttl: Duration,
    marker_name: String,
}

impl<S> CacheGateway<S>
where
    S: CacheStore,
{
    /// Builds a gateway with the default TTL (24 h) and marker name (`pv`).
    pub fn new(store: S) -> Self {
        CacheGatewayBuilder::new(store).build()
    }

    /// Returns a builder for overriding the defaults.
    pub fn builder(store: S) -> CacheGatewayBuilder<S> {
        CacheGatewayBuilder::new(store)
    }

    /// The store this gateway writes to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Default TTL applied to published entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Default version-marker name.
    pub fn marker_name(&self) -> &str {
        &self.marker_name
    }

    /// Publishes a rendered response body for the front cache to serve.
    ///
    /// Derives the key from `request_path` (the full path including query
    /// string, byte-identical to what the proxy will derive from) and the
    /// version tag in `options`, then writes `body` to the store. When the
    /// tag is non-empty, `side_channel` is invoked exactly once with
    /// `(marker_name, version_tag)` so the caller can attach the tag to the
    /// outgoing response — as a cookie, a header, whatever fits its stack.
    ///
    /// The store write is attempted first; the side-channel write happens
    /// whenever the tag is non-empty, independent of the store outcome.
    /// The writer fires on every publish with a non-empty tag, even when
    /// the tag is unchanged from the client's previous visit.
    ///
    /// # Errors
    ///
    /// [`CacheError::StoreUnavailable`] when the store write fails. This
    /// must never abort the response cycle: log it and serve the response
    /// uncached.
    pub async fn publish<W>(
        &self,
        request_path: &str,
        body: Bytes,
        mut side_channel: W,
        options: PublishOptions,
    ) -> Result<(), CacheError>
    where
        W: FnMut(&str, &str),
    {
        let marker = options.marker_name.as_deref().unwrap_or(&self.marker_name);
        let ttl = options.ttl.unwrap_or(self.ttl);
        let tag = options.version_tag.as_deref().unwrap_or("");
        let key = derive_key(request_path, Some(tag), marker);

        let stored = self.store.set(key.clone(), body, ttl).await;

        if !tag.is_empty() {
            side_channel(marker, tag);
        }

        match stored {
            Ok(()) => {
                debug!(%key, path = request_path, ttl_secs = ttl.as_secs(), "published response");
                Ok(())
            }
            Err(err) => {
                warn!(%key, path = request_path, error = %err, "publish failed, serving uncached");
                Err(err)
            }
        }
    }

    /// Removes the entry for `(request_path, version_tag, marker_name)`.
    ///
    /// `None` for `version_tag` targets the unversioned entry; `None` for
    /// `marker_name` uses the gateway default. Invalidating a key that was
    /// never published succeeds.
    ///
    /// # Errors
    ///
    /// [`CacheError::StoreUnavailable`] when the store delete fails; same
    /// non-fatal policy as [`publish`](Self::publish).
    pub async fn invalidate(
        &self,
        request_path: &str,
        version_tag: Option<&str>,
        marker_name: Option<&str>,
    ) -> Result<(), CacheError> {
        let marker = marker_name.unwrap_or(&self.marker_name);
        let key = derive_key(request_path, version_tag, marker);

        match self.store.delete(&key).await {
            Ok(()) => {
                debug!(%key, path = request_path, "invalidated entry");
                Ok(())
            }
            Err(err) => {
                warn!(%key, path = request_path, error = %err, "invalidate failed");
                Err(err)
            }
        }
    }
}
