//! Cache-key derivation.
//!
//! Keys are derived from the full request path (including query string), an
//! optional version tag, and the name of the marker cookie/header that
//! carries the tag back to the client. The front-side proxy runs the same
//! derivation to look entries up, so the canonical string format is part of
//! the wire contract and must not change between releases.

use http::Uri;
use md5::{Digest, Md5};

/// Default name of the version-marker side channel.
pub const DEFAULT_MARKER_NAME: &str = "pv";

/// Default entry time-to-live in seconds (24 hours).
pub const DEFAULT_TTL_SECS: u64 = 86_400;

/// Derives the cache key for a request path and version tag.
///
/// The canonical string is `"{path}&{marker_name}={version_tag}"`, hashed
/// with MD5 and encoded as 32 lowercase hex characters. MD5 is not a
/// security choice here — the key only needs a negligible collision rate
/// across the served path space, and the proxy side computes the same
/// digest.
///
/// `path` is used byte-for-byte: no case folding, no trailing-slash or
/// query-parameter normalization. Two requests share an entry only if their
/// path strings are identical. An absent version tag derives the same key
/// as an empty one.
pub fn derive_key(path: &str, version_tag: Option<&str>, marker_name: &str) -> String {
    let tag = version_tag.unwrap_or("");
    let mut hasher = Md5::new();
    hasher.update(path.as_bytes());
    hasher.update(b"&");
    hasher.update(marker_name.as_bytes());
    hasher.update(b"=");
    hasher.update(tag.as_bytes());
    hex::encode(hasher.finalize())
}

/// Reconstructs the full request path (path plus query string) from a `Uri`.
///
/// The returned string matches what a reverse proxy sees as the request URI,
/// so keys derived from it line up with proxy-side derivation.
pub fn full_path(uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("{}?{}", uri.path(), query),
        None => uri.path().to_owned(),
    }
}
