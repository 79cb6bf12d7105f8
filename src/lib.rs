//! Edge Cache Gateway
//! ==================
//!
//! `edge-cache-gateway` is the publish side of a front-cache setup: a
//! reverse proxy (nginx with a memcached module, or anything comparable)
//! serves repeat requests straight out of a shared key-value store, and
//! this crate is how the application puts rendered responses into that
//! store — and takes them out again.
//!
//! Three pieces:
//! - [`key::derive_key`] maps `(request path, version tag, marker name)` to
//!   a deterministic MD5-hex key. The proxy side runs the same derivation.
//! - [`CacheGateway`] publishes response bodies under derived keys with a
//!   TTL, and invalidates them on demand. The version tag travels back to
//!   the client through a caller-supplied side-channel writer (typically a
//!   cookie), so the next request carries it and hits the same variant.
//! - [`store::CacheStore`] is the injected key-value seam, shipped with an
//!   in-memory implementation and an optional memcached one.
//!
//! ```
//! use bytes::Bytes;
//! use edge_cache_gateway::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CacheError> {
//! let gateway = CacheGateway::builder(MemoryStore::new(1_000))
//!     .ttl(std::time::Duration::from_secs(300))
//!     .build();
//!
//! let mut cookies = Vec::new();
//! gateway
//!     .publish(
//!         "/articles/42",
//!         Bytes::from_static(b"<html>rendered</html>"),
//!         |name, value| cookies.push((name.to_owned(), value.to_owned())),
//!         PublishOptions::new().version_tag("v7"),
//!     )
//!     .await?;
//!
//! assert_eq!(cookies, vec![("pv".to_owned(), "v7".to_owned())]);
//!
//! gateway.invalidate("/articles/42", Some("v7"), None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! A store outage never has to reach the client: publish and invalidate
//! return [`CacheError::StoreUnavailable`] for the integrator to log, and
//! the response is simply served uncached.

pub mod error;
pub mod gateway;
pub mod key;
pub mod prelude;
pub mod store;

pub use error::CacheError;
pub use gateway::{CacheGateway, CacheGatewayBuilder, PublishOptions};
pub use key::{derive_key, full_path, DEFAULT_MARKER_NAME, DEFAULT_TTL_SECS};
pub use store::CacheStore;
