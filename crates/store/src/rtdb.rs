//! REST adapter for a hosted realtime document database.
//!
//! Every node is addressable as `{base_url}/{path}.json`:
//!
//! ```text
//! GET    /characters.json          -> object of children, or null
//! GET    /characters/{key}.json    -> record, or null
//! POST   /characters.json          -> {"name": "<generated key>"}
//! PATCH  /characters/{key}.json    -> shallow merge
//! DELETE /characters/{key}.json    -> null (also for absent nodes)
//! ```
//!
//! When an access token is configured it is sent as the `auth` query
//! parameter on every request. Path segments are percent-encoded, so a key
//! containing `?`, `%` or `&` addresses exactly one child.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::document::{segments, DocumentStore, StoreError};

/// Timeout for a single request to the store.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one database instance.
pub struct RealtimeDbStore {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

/// Body returned by `POST` on a collection.
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

impl RealtimeDbStore {
    /// Create a client for the database at `base_url`,
    /// e.g. `https://my-project-default-rtdb.firebaseio.com`.
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Self::with_client(client, base_url, auth_token)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// Fails with [`StoreError::InvalidBaseUrl`] unless `base_url` is an
    /// absolute URL that can carry path segments.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        auth_token: Option<String>,
    ) -> Result<Self, StoreError> {
        let raw = base_url.into();
        let base_url =
            Url::parse(&raw).map_err(|e| StoreError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl(raw));
        }
        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    /// `{base_url}/{path}.json` with every segment of `path` percent-encoded.
    fn url(&self, path: &str) -> Url {
        let mut parts: Vec<String> = segments(path).map(str::to_string).collect();
        match parts.last_mut() {
            Some(last) => last.push_str(".json"),
            None => parts.push(".json".to_string()),
        }

        let mut url = self.base_url.clone();
        if let Ok(mut path_segments) = url.path_segments_mut() {
            path_segments.pop_if_empty().extend(&parts);
        }
        url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.auth_token {
            Some(token) => builder.query(&[("auth", token)]),
            None => builder,
        }
    }

    /// Send a request and decode its JSON body.
    async fn send_json(&self, builder: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = Self::ensure_success(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Return the response unchanged on a 2xx status, otherwise a
    /// [`StoreError::Status`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DocumentStore for RealtimeDbStore {
    async fn list_children(&self, path: &str) -> Result<Map<String, Value>, StoreError> {
        match self.send_json(self.request(Method::GET, path)).await? {
            Value::Null => Ok(Map::new()),
            Value::Object(children) => Ok(children),
            other => Err(StoreError::UnexpectedShape {
                path: path.to_string(),
                detail: format!("expected an object, found {other}"),
            }),
        }
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        match self.send_json(self.request(Method::GET, path)).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    async fn write_new(&self, collection: &str, value: Value) -> Result<String, StoreError> {
        let body = self
            .send_json(self.request(Method::POST, collection).json(&value))
            .await?;
        let pushed: PushResponse = serde_json::from_value(body)?;
        Ok(pushed.name)
    }

    async fn merge(&self, path: &str, patch: Value) -> Result<(), StoreError> {
        self.send_json(self.request(Method::PATCH, path).json(&patch))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.send_json(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "rtdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{child_path, CHARACTERS_PATH};

    fn store(base_url: &str, auth_token: Option<String>) -> RealtimeDbStore {
        RealtimeDbStore::with_client(reqwest::Client::new(), base_url, auth_token).unwrap()
    }

    #[test]
    fn url_appends_json_suffix() {
        let store = store("https://example.firebaseio.com/", None);
        assert_eq!(
            store.url("characters").as_str(),
            "https://example.firebaseio.com/characters.json"
        );
        assert_eq!(
            store.url("/characters/-Nabc/").as_str(),
            "https://example.firebaseio.com/characters/-Nabc.json"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let store = store("http://127.0.0.1:9000/ns/db", None);
        assert_eq!(
            store.url("characters/1").as_str(),
            "http://127.0.0.1:9000/ns/db/characters/1.json"
        );
    }

    #[test]
    fn key_with_query_syntax_stays_in_the_path() {
        let store = store("https://example.firebaseio.com", Some("secret".into()));
        let path = child_path(CHARACTERS_PATH, "abc?x=1&print=silent").unwrap();

        let request = store.request(Method::DELETE, &path).build().unwrap();

        assert_eq!(
            request.url().path(),
            "/characters/abc%3Fx=1&print=silent.json"
        );
        assert_eq!(request.url().query(), Some("auth=secret"));
    }

    #[test]
    fn encoded_separator_in_key_is_escaped_again() {
        let store = store("https://example.firebaseio.com", None);
        let path = child_path(CHARACTERS_PATH, "%2F").unwrap();
        assert_eq!(store.url(&path).path(), "/characters/%252F.json");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for bad in ["not a url", "mailto:someone@example.com"] {
            assert!(matches!(
                RealtimeDbStore::with_client(reqwest::Client::new(), bad, None),
                Err(StoreError::InvalidBaseUrl(_))
            ));
        }
    }

    #[test]
    fn auth_token_is_sent_as_query_parameter() {
        let store = store("https://example.firebaseio.com", Some("secret".into()));
        let request = store.request(Method::GET, "characters").build().unwrap();
        assert_eq!(request.url().query(), Some("auth=secret"));
    }

    #[test]
    fn new_does_not_panic() {
        assert!(RealtimeDbStore::new("http://127.0.0.1:9000", None).is_ok());
    }
}
