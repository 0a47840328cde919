//! Hierarchical document-store abstraction.
//!
//! A store is a tree of JSON values addressed by `/`-separated paths.
//! Collections are objects whose children are keyed by store-generated
//! tokens. Adapters implement [`DocumentStore`]; the character repository
//! only ever talks to this trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Collection path holding all character records.
pub const CHARACTERS_PATH: &str = "characters";

/// Characters a key segment must not contain.
const FORBIDDEN_KEY_CHARS: &[char] = &['/', '.', '#', '$', '[', ']'];

/// Errors raised by document-store adapters and the repository on top.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-2xx status code.
    #[error("Store returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A payload could not be encoded or decoded.
    #[error("Failed to decode store payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store returned well-formed JSON of the wrong shape.
    #[error("Unexpected payload at '{path}': {detail}")]
    UnexpectedShape { path: String, detail: String },

    /// The addressed record does not exist.
    #[error("Record not found: {id}")]
    NotFound { id: String },

    /// The key cannot address a single child of a collection.
    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),

    /// The configured store location is not an absolute base URL.
    #[error("Invalid store URL: {0}")]
    InvalidBaseUrl(String),
}

impl StoreError {
    /// Whether the failure came from reaching the store rather than from
    /// the request the caller made.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Request(_)
                | StoreError::Status { .. }
                | StoreError::Decode(_)
                | StoreError::UnexpectedShape { .. }
        )
    }
}

/// Remote (or in-process) hierarchical key-value document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All children of the node at `path`. An absent node has no children.
    async fn list_children(&self, path: &str) -> Result<Map<String, Value>, StoreError>;

    /// The value at `path`, or `None` when nothing is stored there.
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Append `value` under `collection` with a store-generated key and
    /// return that key.
    async fn write_new(&self, collection: &str, value: Value) -> Result<String, StoreError>;

    /// Shallow-merge the keys of `patch` into the object at `path`.
    async fn merge(&self, path: &str, patch: Value) -> Result<(), StoreError>;

    /// Remove the node at `path`. Removing an absent node succeeds.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Short adapter name for logs and health output.
    fn kind(&self) -> &'static str;
}

/// Reject keys that would escape or alias a single child node.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains(FORBIDDEN_KEY_CHARS) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Path of child `key` inside `collection`, validating the key.
pub fn child_path(collection: &str, key: &str) -> Result<String, StoreError> {
    validate_key(key)?;
    Ok(format!("{collection}/{key}"))
}

/// Split a path into its non-empty segments.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn child_path_joins_collection_and_key() {
        assert_eq!(
            child_path(CHARACTERS_PATH, "-Nxc123").unwrap(),
            "characters/-Nxc123"
        );
    }

    #[test]
    fn keys_with_path_syntax_are_rejected() {
        for bad in ["", "a/b", "a.b", "#x", "$x", "[0]", "x]"] {
            assert_matches!(validate_key(bad), Err(StoreError::InvalidKey(_)), "{bad}");
        }
    }

    #[test]
    fn segments_skip_empty_parts() {
        let parts: Vec<_> = segments("/characters//abc/").collect();
        assert_eq!(parts, vec!["characters", "abc"]);
    }

    #[test]
    fn unavailable_covers_transport_failures_only() {
        assert!(StoreError::Status {
            status: 503,
            body: String::new()
        }
        .is_unavailable());
        assert!(!StoreError::NotFound { id: "x".into() }.is_unavailable());
        assert!(!StoreError::InvalidKey("a/b".into()).is_unavailable());
    }
}
