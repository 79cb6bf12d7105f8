//! Publish against a live memcached instance.
//!
//! Start memcached locally, then:
//!
//! ```sh
//! cargo run --example memcached_publish --features memcached-backend
//! ```
//!
//! A front proxy pointed at the same memcached server and deriving keys the
//! same way will serve the published body without hitting the application.

use bytes::Bytes;
use edge_cache_gateway::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let store = MemcachedStore::connect("127.0.0.1:11211").await?;
    let gateway = CacheGateway::builder(store)
        .ttl(Duration::from_secs(86_400))
        .build();

    gateway
        .publish(
            "/articles/42",
            Bytes::from_static(b"<html>cached by the edge</html>"),
            |name, value| println!("would set cookie {name}={value}"),
            PublishOptions::new(),
        )
        .await?;

    let key = derive_key("/articles/42", None, DEFAULT_MARKER_NAME);
    println!("stored under {key}");
    println!("read back: {:?}", gateway.store().get(&key).await?);

    gateway.invalidate("/articles/42", None, None).await?;
    println!("invalidated");

    Ok(())
}
