//! Publish a rendered page into an in-memory store and read it back the
//! way a front proxy would: by deriving the key independently.
//!
//! ```sh
//! cargo run --example memory_roundtrip
//! ```

use bytes::Bytes;
use edge_cache_gateway::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), CacheError> {
    tracing_subscriber::fmt::init();

    let gateway = CacheGateway::builder(MemoryStore::new(1_000))
        .ttl(Duration::from_secs(300))
        .build();

    let mut cookies = Vec::new();
    gateway
        .publish(
            "/articles/42?lang=en",
            Bytes::from_static(b"<html>rendered article</html>"),
            |name, value| cookies.push((name.to_owned(), value.to_owned())),
            PublishOptions::new().version_tag("v7"),
        )
        .await?;

    println!("marker cookies to set on the response: {cookies:?}");

    let key = derive_key("/articles/42?lang=en", Some("v7"), DEFAULT_MARKER_NAME);
    let hit = gateway.store().get(&key).await?;
    println!("proxy-side read for key {key}: {hit:?}");

    gateway.invalidate("/articles/42?lang=en", Some("v7"), None).await?;
    let after = gateway.store().get(&key).await?;
    println!("after invalidation: {after:?}");

    Ok(())
}
