use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use edge_cache_gateway::prelude::*;

/// Store double whose every operation fails, for outage injection.
#[derive(Clone)]
struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn set(&self, _key: String, _value: Bytes, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::StoreUnavailable("injected set failure".into()))
    }

    async fn get(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
        Err(CacheError::StoreUnavailable("injected get failure".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::StoreUnavailable("injected delete failure".into()))
    }
}

fn no_side_channel(_name: &str, _value: &str) {
    panic!("side channel must not be written without a version tag");
}

#[tokio::test]
async fn publish_then_independent_get_round_trips_body() {
    let gateway = CacheGateway::new(MemoryStore::new(64));
    let body = Bytes::from_static(b"<html>rendered page</html>");

    gateway
        .publish("/articles/42", body.clone(), no_side_channel, PublishOptions::new())
        .await
        .expect("publish succeeds");

    // The reader derives the key on its own, like the proxy would.
    let key = derive_key("/articles/42", None, DEFAULT_MARKER_NAME);
    let read = gateway.store().get(&key).await.expect("get succeeds");
    assert_eq!(read, Some(body));
}

#[tokio::test]
async fn unversioned_publish_uses_reference_key_and_no_side_channel() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    assert_eq!(gateway.ttl(), Duration::from_secs(86_400));
    assert_eq!(gateway.marker_name(), "pv");

    gateway
        .publish(
            "/articles/42",
            Bytes::from_static(b"body"),
            no_side_channel,
            PublishOptions::new(),
        )
        .await
        .expect("publish succeeds");

    // md5("/articles/42&pv=")
    let read = gateway
        .store()
        .get("3ca51264e7f2d98fe3dfbcbbe395e29a")
        .await
        .expect("get succeeds");
    assert_eq!(read, Some(Bytes::from_static(b"body")));
}

#[tokio::test]
async fn versioned_publish_writes_side_channel_once() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    let mut writes = Vec::new();
    gateway
        .publish(
            "/dash",
            Bytes::from_static(b"dashboard"),
            |name, value| writes.push((name.to_owned(), value.to_owned())),
            PublishOptions::new().version_tag("v7"),
        )
        .await
        .expect("publish succeeds");

    assert_eq!(writes, vec![("pv".to_owned(), "v7".to_owned())]);

    // md5("/dash&pv=v7")
    let read = gateway
        .store()
        .get("118279ee8aaf8930395f4e0ceea6b61c")
        .await
        .expect("get succeeds");
    assert_eq!(read, Some(Bytes::from_static(b"dashboard")));
}

#[tokio::test]
async fn empty_version_tag_behaves_like_no_tag() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    gateway
        .publish(
            "/articles/42",
            Bytes::from_static(b"body"),
            no_side_channel,
            PublishOptions::new().version_tag(""),
        )
        .await
        .expect("publish succeeds");

    let key = derive_key("/articles/42", None, DEFAULT_MARKER_NAME);
    assert!(gateway.store().get(&key).await.expect("get succeeds").is_some());
}

#[tokio::test]
async fn invalidate_clears_published_entry() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    gateway
        .publish(
            "/dash",
            Bytes::from_static(b"dashboard"),
            |_, _| {},
            PublishOptions::new().version_tag("v7"),
        )
        .await
        .expect("publish succeeds");

    gateway
        .invalidate("/dash", Some("v7"), None)
        .await
        .expect("invalidate succeeds");

    let key = derive_key("/dash", Some("v7"), DEFAULT_MARKER_NAME);
    assert_eq!(gateway.store().get(&key).await.expect("get succeeds"), None);
}

#[tokio::test]
async fn invalidate_of_never_published_key_is_ok() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    gateway
        .invalidate("/never/published", None, None)
        .await
        .expect("invalidate of missing entry succeeds");

    gateway
        .invalidate("/never/published", Some("v1"), Some("segment"))
        .await
        .expect("invalidate of missing versioned entry succeeds");
}

#[tokio::test]
async fn invalidate_only_touches_matching_variant() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    gateway
        .publish(
            "/dash",
            Bytes::from_static(b"v7 variant"),
            |_, _| {},
            PublishOptions::new().version_tag("v7"),
        )
        .await
        .expect("publish v7 succeeds");
    gateway
        .publish("/dash", Bytes::from_static(b"plain variant"), |_, _| {}, PublishOptions::new())
        .await
        .expect("publish unversioned succeeds");

    gateway
        .invalidate("/dash", Some("v7"), None)
        .await
        .expect("invalidate succeeds");

    let versioned = derive_key("/dash", Some("v7"), DEFAULT_MARKER_NAME);
    let plain = derive_key("/dash", None, DEFAULT_MARKER_NAME);
    assert!(gateway.store().get(&versioned).await.expect("get succeeds").is_none());
    assert_eq!(
        gateway.store().get(&plain).await.expect("get succeeds"),
        Some(Bytes::from_static(b"plain variant"))
    );
}

#[tokio::test]
async fn republish_overwrites_previous_body() {
    let gateway = CacheGateway::new(MemoryStore::new(64));

    gateway
        .publish("/home", Bytes::from_static(b"old"), |_, _| {}, PublishOptions::new())
        .await
        .expect("first publish succeeds");
    gateway
        .publish("/home", Bytes::from_static(b"new"), |_, _| {}, PublishOptions::new())
        .await
        .expect("second publish succeeds");

    let key = derive_key("/home", None, DEFAULT_MARKER_NAME);
    assert_eq!(
        gateway.store().get(&key).await.expect("get succeeds"),
        Some(Bytes::from_static(b"new"))
    );
}

#[tokio::test]
async fn store_failure_surfaces_but_side_channel_still_fires() {
    let gateway = CacheGateway::new(FailingStore);

    let mut writes = Vec::new();
    let result = gateway
        .publish(
            "/dash",
            Bytes::from_static(b"dashboard"),
            |name, value| writes.push((name.to_owned(), value.to_owned())),
            PublishOptions::new().version_tag("v7"),
        )
        .await;

    assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
    // Store write is attempted first, but the marker write does not depend
    // on its outcome.
    assert_eq!(writes, vec![("pv".to_owned(), "v7".to_owned())]);
}

#[tokio::test]
async fn store_failure_without_tag_skips_side_channel() {
    let gateway = CacheGateway::new(FailingStore);

    let result = gateway
        .publish(
            "/dash",
            Bytes::from_static(b"dashboard"),
            no_side_channel,
            PublishOptions::new(),
        )
        .await;

    assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
}

#[tokio::test]
async fn invalidate_surfaces_store_failure() {
    let gateway = CacheGateway::new(FailingStore);

    let result = gateway.invalidate("/dash", None, None).await;
    assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
}
