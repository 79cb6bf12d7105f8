//! Re-exports for consumers who prefer a single import.
//!
//! ```no_run
//! use edge_cache_gateway::prelude::*;
//! # let store = MemoryStore::new(128);
//! let gateway = CacheGateway::new(store);
//! ```

pub use crate::error::CacheError;
pub use crate::gateway::{CacheGateway, CacheGatewayBuilder, PublishOptions};
pub use crate::key::{derive_key, full_path, DEFAULT_MARKER_NAME, DEFAULT_TTL_SECS};
#[cfg(feature = "memcached-backend")]
pub use crate::store::memcached::MemcachedStore;
pub use crate::store::memory::MemoryStore;
pub use crate::store::CacheStore;
