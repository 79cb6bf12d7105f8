use thiserror::Error;

/// Errors that can occur while publishing to or invalidating the front cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing key-value store could not be reached or timed out.
    ///
    /// A publish failure degrades to "response not cached"; integrators are
    /// expected to log this and still serve the response.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Reserved for future argument validation; currently never returned
    /// (an empty request path is valid — every request has at least `/`).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
